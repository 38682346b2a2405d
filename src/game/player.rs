//! A seat at the table: its hand and its cached play options.

use smallvec::SmallVec;

use crate::core::{Card, GameError, GameRng, PlayerId, TieBreak};

use super::deck::Deck;
use super::policy::{self, PlayOption};
use super::stack::Stack;

/// Cards in hand, kept sorted ascending.
pub type Hand = SmallVec<[Card; 8]>;

#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    hand: Hand,
    options: Vec<PlayOption>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Hand::new(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn is_hand_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Take cards into hand, keeping it sorted.
    pub fn receive(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            let pos = self.hand.binary_search(&card).unwrap_or_else(|p| p);
            self.hand.insert(pos, card);
        }
        self.options.clear();
    }

    /// Draw up to `n` cards from `deck`; returns how many arrived.
    pub fn draw(&mut self, deck: &mut Deck, n: usize) -> usize {
        let drawn = deck.draw(n);
        let count = drawn.len();
        for card in &drawn {
            log::trace!("{} drew {}", self.id, card);
        }
        self.receive(drawn);
        count
    }

    /// Recompute every legal (card, stack) pair and return how many there are.
    ///
    /// Options are ordered by card, then by stack id.
    pub fn enumerate_options(&mut self, stacks: &[Stack]) -> usize {
        self.options.clear();
        for &card in &self.hand {
            for stack in stacks {
                if stack.accepts(card) {
                    self.options.push(PlayOption {
                        card,
                        stack: stack.id(),
                        score: policy::score(card, stack),
                    });
                }
            }
        }
        self.options.len()
    }

    /// Options from the last enumeration. Cleared by every play or draw.
    #[must_use]
    pub fn options(&self) -> &[PlayOption] {
        &self.options
    }

    /// Best cached option under `tie_break`.
    pub fn select_best(
        &self,
        tie_break: TieBreak,
        rng: &mut GameRng,
    ) -> Result<PlayOption, GameError> {
        policy::select_best(&self.options, tie_break, rng).ok_or(GameError::SelectFromEmpty)
    }

    /// Move `card` from hand onto `stack`.
    pub fn play(&mut self, card: Card, stack: &mut Stack) -> Result<(), GameError> {
        let pos = self.hand.binary_search(&card).map_err(|_| GameError::InvalidPlay {
            card,
            stack: stack.id(),
            reason: format!("{} does not hold it", self.id),
        })?;

        stack.push(card)?;
        self.hand.remove(pos);
        self.options.clear();
        Ok(())
    }
}
