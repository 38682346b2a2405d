//! Game configuration.
//!
//! `GameConfig` fixes the shape of a table: card range, seats, stacks,
//! hand size, per-turn minimums and the policy knobs. `Default` is the
//! standard game: cards 2-99, four players, two ascending and two
//! descending stacks bounded by 1 and 100, hands of six.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Largest magnitude allowed for a card or stack bound. Keeps every stack
/// distance and jump target inside `i32`.
pub const CARD_LIMIT: i32 = 1_000_000_000;

/// Largest deck a configuration may ask for.
pub const MAX_DECK_SIZE: usize = 1 << 20;

/// How the policy chooses between options with the same score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Lowest score, then lowest card, then lowest stack id.
    #[default]
    Ordered,
    /// Uniform among the tied-best options, drawn from the trial RNG.
    Seeded,
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lowest card in the deck (inclusive).
    pub deck_low: i32,

    /// Highest card in the deck (inclusive). `deck_high < deck_low` is an empty deck.
    pub deck_high: i32,

    /// Number of seats (1-255).
    pub player_count: usize,

    /// Number of ascending stacks; the same number of descending stacks is added.
    pub stack_pairs: usize,

    /// Starting top of every ascending stack.
    pub stack_min: i32,

    /// Starting top of every descending stack.
    pub stack_max: i32,

    /// Cards dealt to each seat, and the size hands are refilled to.
    pub hand_size: usize,

    /// Cards that must be played per turn while the deck has cards.
    pub min_plays_full: usize,

    /// Cards that must be played per turn once the deck is exhausted.
    pub min_plays_exhausted: usize,

    /// Keep making extra plays while the best option scores at or below this.
    /// `None` plays only the mandatory minimum.
    pub keep_playing_threshold: Option<i32>,

    /// Tie-break rule for equally scored options.
    pub tie_break: TieBreak,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck_low: 2,
            deck_high: 99,
            player_count: 4,
            stack_pairs: 2,
            stack_min: 1,
            stack_max: 100,
            hand_size: 6,
            min_plays_full: 2,
            min_plays_exhausted: 1,
            keep_playing_threshold: Some(-10),
            tie_break: TieBreak::Ordered,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_deck_range(mut self, low: i32, high: i32) -> Self {
        self.deck_low = low;
        self.deck_high = high;
        self
    }

    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn with_stack_pairs(mut self, pairs: usize) -> Self {
        self.stack_pairs = pairs;
        self
    }

    #[must_use]
    pub fn with_stack_bounds(mut self, min: i32, max: i32) -> Self {
        self.stack_min = min;
        self.stack_max = max;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the mandatory plays per turn with a full and with an exhausted deck.
    #[must_use]
    pub fn with_min_plays(mut self, full: usize, exhausted: usize) -> Self {
        self.min_plays_full = full;
        self.min_plays_exhausted = exhausted;
        self
    }

    #[must_use]
    pub fn with_keep_playing_threshold(mut self, threshold: Option<i32>) -> Self {
        self.keep_playing_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Number of cards in a freshly built deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        let span = i64::from(self.deck_high) - i64::from(self.deck_low) + 1;
        usize::try_from(span.max(0)).unwrap_or(usize::MAX)
    }

    /// Total number of stacks on the table.
    #[must_use]
    pub fn stack_count(&self) -> usize {
        self.stack_pairs * 2
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.player_count == 0 || self.player_count > 255 {
            return fail(format!("player_count must be 1-255, got {}", self.player_count));
        }
        if self.stack_pairs == 0 || self.stack_count() > 256 {
            return fail(format!("stack_pairs must be 1-128, got {}", self.stack_pairs));
        }
        let bounds = [
            ("deck_low", self.deck_low),
            ("deck_high", self.deck_high),
            ("stack_min", self.stack_min),
            ("stack_max", self.stack_max),
        ];
        for (name, value) in bounds {
            if !(-CARD_LIMIT..=CARD_LIMIT).contains(&value) {
                return fail(format!("{name} must be within ±{CARD_LIMIT}, got {value}"));
            }
        }
        if self.stack_min >= self.stack_max {
            return fail(format!(
                "stack_min ({}) must be below stack_max ({})",
                self.stack_min, self.stack_max
            ));
        }
        if self.deck_high < self.deck_low - 1 {
            return fail(format!(
                "deck range {}..={} is inverted",
                self.deck_low, self.deck_high
            ));
        }
        if self.deck_size() > MAX_DECK_SIZE {
            return fail(format!(
                "deck of {} cards exceeds {MAX_DECK_SIZE}",
                self.deck_size()
            ));
        }
        if self.hand_size == 0 {
            return fail("hand_size must be at least 1".to_string());
        }
        if self.min_plays_full == 0 || self.min_plays_exhausted == 0 {
            return fail("mandatory plays per turn must be at least 1".to_string());
        }
        Ok(())
    }
}
