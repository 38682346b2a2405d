//! The table: deck, stacks and seats, and the turn protocol that drives them.
//!
//! ## Turn protocol
//!
//! A game moves `Dealing -> InProgress -> Finished(Win | Loss)`. Each turn of
//! the active seat runs:
//!
//! 1. **Mandatory plays**: `min_plays_full` while the deck has cards,
//!    `min_plays_exhausted` after. An empty hand ends the obligation; a
//!    non-empty hand with no legal option loses the game.
//! 2. **Extra plays**: while the best option scores at or below the
//!    keep-playing threshold, keep playing it.
//! 3. **Refill**: draw one card per card played, as far as the deck allows.
//! 4. **Invariants** (skipped on a losing turn): card conservation and hand
//!    bounds. A violation is returned as an error with a dump of the table.
//! 5. **Terminal check**: loss, or win once deck and all hands are empty;
//!    otherwise the next seat becomes active.

use serde::{Deserialize, Serialize};

use crate::core::{
    Card, GameConfig, GameError, GameRng, PlayerId, PlayerMap, StackId, CARD_LIMIT,
};

use super::deck::Deck;
use super::player::Player;
use super::policy::PlayOption;
use super::stack::{Direction, Stack};

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Loss => write!(f, "LOSS"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Dealing,
    InProgress,
    Finished(Outcome),
}

/// One applied play, as recorded in the table history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: PlayerId,
    pub card: Card,
    pub stack: StackId,
    pub score: i32,
    /// Made in the optional phase rather than to meet the minimum.
    pub extra: bool,
}

/// What a single call to [`Table::play_turn`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    pub player: PlayerId,
    pub mandatory: usize,
    pub extra: usize,
    pub drawn: usize,
    pub outcome: Option<Outcome>,
}

pub struct Table {
    config: GameConfig,
    deck: Deck,
    stacks: Vec<Stack>,
    players: PlayerMap<Player>,
    active: PlayerId,
    phase: Phase,
    turns: u32,
    history: Vec<Play>,
    branching_sum: u64,
    branching_samples: u64,
    /// Hand sizes at the last check made with an exhausted deck.
    exhausted_hand_sizes: Option<PlayerMap<usize>>,
    rng: GameRng,
}

impl Table {
    /// Build a table with a freshly shuffled deck drawn from `rng`.
    pub fn new(config: &GameConfig, mut rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        let deck = Deck::new(config.deck_low, config.deck_high, &mut rng);
        Self::with_deck(config, deck, rng)
    }

    /// Build a table around a prepared deck. `rng` still feeds seeded tie-breaks.
    pub fn with_deck(config: &GameConfig, deck: Deck, rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        let in_range = |c: &&Card| (-CARD_LIMIT..=CARD_LIMIT).contains(&c.value());
        if let Some(card) = deck.remaining().iter().find(|c| !in_range(c)) {
            return Err(GameError::InvalidConfig(format!(
                "card {card} is outside ±{CARD_LIMIT}"
            )));
        }

        let pairs = config.stack_pairs;
        let ascending = (0..pairs).map(|i| {
            Stack::new(StackId(i as u8), Direction::Ascending, config.stack_min, config.stack_max)
        });
        let descending = (0..pairs).map(|i| {
            Stack::new(
                StackId((pairs + i) as u8),
                Direction::Descending,
                config.stack_min,
                config.stack_max,
            )
        });

        Ok(Self {
            config: config.clone(),
            deck,
            stacks: ascending.chain(descending).collect(),
            players: PlayerMap::new(config.player_count, Player::new),
            active: PlayerId::new(0),
            phase: Phase::Dealing,
            turns: 0,
            history: Vec::new(),
            branching_sum: 0,
            branching_samples: 0,
            exhausted_hand_sizes: None,
            rng,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    #[must_use]
    pub fn stack(&self, id: StackId) -> Option<&Stack> {
        self.stacks.get(id.index())
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Completed turns.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Every play applied so far, in order.
    #[must_use]
    pub fn history(&self) -> &[Play] {
        &self.history
    }

    /// Sum and count of option counts seen at mandatory decision points.
    #[must_use]
    pub fn branching(&self) -> (u64, u64) {
        (self.branching_sum, self.branching_samples)
    }

    /// Number of cards in play for this game.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.deck.initial_len()
    }

    /// Cards not yet placed on a stack.
    #[must_use]
    pub fn cards_unplayed(&self) -> usize {
        self.deck.len() + self.players.values().map(Player::hand_len).sum::<usize>()
    }

    /// Mandatory plays for the turn about to start.
    #[must_use]
    pub fn min_plays(&self) -> usize {
        if self.deck.is_empty() {
            self.config.min_plays_exhausted
        } else {
            self.config.min_plays_full
        }
    }

    // === Protocol ===

    /// Deal starting hands. Does nothing once dealt.
    pub fn deal(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Dealing {
            return Ok(());
        }
        let hand_size = self.config.hand_size;
        for player in self.players.values_mut() {
            player.draw(&mut self.deck, hand_size);
        }
        self.phase = Phase::InProgress;
        self.check_invariants()
    }

    /// Run one turn for the active seat. Deals first if needed; a finished
    /// table reports its outcome without changing.
    pub fn play_turn(&mut self) -> Result<TurnSummary, GameError> {
        let player = self.active;
        if let Phase::Finished(outcome) = self.phase {
            return Ok(TurnSummary {
                player,
                mandatory: 0,
                extra: 0,
                drawn: 0,
                outcome: Some(outcome),
            });
        }
        self.deal()?;

        let required = self.min_plays();
        let mut mandatory = 0;
        let mut lost = false;

        for _ in 0..required {
            if self.players[player].is_hand_empty() {
                break;
            }
            let count = self.players[player].enumerate_options(&self.stacks);
            self.branching_sum += count as u64;
            self.branching_samples += 1;

            if count == 0 {
                lost = true;
                break;
            }
            let option = self.players[player].select_best(self.config.tie_break, &mut self.rng)?;
            self.apply(player, option, false)?;
            mandatory += 1;
        }

        let mut extra = 0;
        let threshold = if lost { None } else { self.config.keep_playing_threshold };
        if let Some(threshold) = threshold {
            while self.players[player].enumerate_options(&self.stacks) > 0 {
                let option =
                    self.players[player].select_best(self.config.tie_break, &mut self.rng)?;
                if option.score > threshold {
                    break;
                }
                self.apply(player, option, true)?;
                extra += 1;
            }
        }

        let drawn = self.players[player].draw(&mut self.deck, mandatory + extra);
        self.turns += 1;

        let outcome = if lost {
            Some(Outcome::Loss)
        } else {
            self.check_invariants()?;
            if self.deck.is_empty() && self.players.values().all(Player::is_hand_empty) {
                Some(Outcome::Win)
            } else {
                self.active = player.next(self.players.player_count());
                None
            }
        };

        if let Some(outcome) = outcome {
            self.phase = Phase::Finished(outcome);
            log::debug!("game over after {} turns: {}\n{}", self.turns, outcome, self);
        }

        Ok(TurnSummary {
            player,
            mandatory,
            extra,
            drawn,
            outcome,
        })
    }

    /// Play turns until the game ends.
    pub fn play_to_end(&mut self) -> Result<Outcome, GameError> {
        loop {
            if let Some(outcome) = self.play_turn()?.outcome {
                return Ok(outcome);
            }
        }
    }

    fn apply(&mut self, player: PlayerId, option: PlayOption, extra: bool) -> Result<(), GameError> {
        let stack = self
            .stacks
            .get_mut(option.stack.index())
            .ok_or_else(|| GameError::InvalidPlay {
                card: option.card,
                stack: option.stack,
                reason: "no such stack".to_string(),
            })?;
        self.players[player].play(option.card, stack)?;

        log::trace!(
            "{} played {} onto {} (score {}{})",
            player,
            option.card,
            option.stack,
            option.score,
            if extra { ", extra" } else { "" }
        );
        self.history.push(Play {
            player,
            card: option.card,
            stack: option.stack,
            score: option.score,
            extra,
        });
        Ok(())
    }

    // === Invariants ===

    /// Cards on stacks, in hands and in the deck must add up to the pool.
    pub fn check_conservation(&self) -> Result<(), GameError> {
        let on_stacks: usize = self.stacks.iter().map(Stack::len).sum();
        let actual = on_stacks + self.cards_unplayed();
        let expected = self.pool_size();

        if actual != expected {
            return Err(GameError::ConservationViolation {
                expected,
                actual,
                dump: self.to_string(),
            });
        }
        Ok(())
    }

    /// No hand above the hand size; while the deck has cards every hand is
    /// empty or full; once it is exhausted hands never grow.
    pub fn check_hand_bounds(&mut self) -> Result<(), GameError> {
        let limit = self.config.hand_size;
        let previous = self.exhausted_hand_sizes.as_ref();

        for (id, player) in self.players.iter() {
            let size = player.hand_len();
            let reason = if size > limit {
                Some(format!("exceeds hand size {limit}"))
            } else if !self.deck.is_empty() && size != 0 && size != limit {
                Some(format!("must be 0 or {limit} while the deck has cards"))
            } else if previous.is_some_and(|sizes| size > sizes[id]) {
                Some("grew after the deck ran out".to_string())
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(GameError::HandBoundViolation {
                    player: id,
                    size,
                    reason,
                    dump: self.to_string(),
                });
            }
        }

        if self.deck.is_empty() {
            let players = &self.players;
            let sizes = PlayerMap::new(players.player_count(), |id| players[id].hand_len());
            self.exhausted_hand_sizes = Some(sizes);
        }
        Ok(())
    }

    pub fn check_invariants(&mut self) -> Result<(), GameError> {
        self.check_conservation()?;
        self.check_hand_bounds()
    }
}

fn join(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(", ")
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== Table (turn {}) ==", self.turns)?;
        for stack in &self.stacks {
            writeln!(
                f,
                "{} {} top: {} [{}]",
                stack.direction(),
                stack.id(),
                stack.peek(),
                join(stack.cards())
            )?;
        }
        for (id, player) in self.players.iter() {
            writeln!(f, "{} hand: [{}]", id, join(player.hand()))?;
        }
        writeln!(
            f,
            "{} cards left in deck: [{}]",
            self.deck.len(),
            join(self.deck.remaining())
        )?;
        write!(f, "=========")
    }
}
