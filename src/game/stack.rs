//! Play stacks and the legality rule.
//!
//! An ascending stack accepts any card above its top, a descending stack any
//! card below. Both also accept the card exactly ten "backwards" from the
//! current top (ten below on ascending, ten above on descending). An empty
//! stack's top is its starting bound.

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameError, StackId};

/// Size of the backwards jump every stack allows.
pub const JUMP_BACK: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Starts at the lower bound, values increase.
    Ascending,
    /// Starts at the upper bound, values decrease.
    Descending,
}

impl Direction {
    /// Whether `card` may be placed on a stack of this direction showing `top`.
    ///
    /// ```
    /// use the_game_sim::core::Card;
    /// use the_game_sim::game::Direction;
    ///
    /// assert!(Direction::Ascending.allows(40, Card(41)));
    /// assert!(Direction::Ascending.allows(40, Card(30)));
    /// assert!(!Direction::Ascending.allows(40, Card(39)));
    /// assert!(Direction::Descending.allows(40, Card(50)));
    /// ```
    #[must_use]
    pub fn allows(self, top: i32, card: Card) -> bool {
        let c = card.value();
        match self {
            Direction::Ascending => c > top || c == top - JUMP_BACK,
            Direction::Descending => c < top || c == top + JUMP_BACK,
        }
    }

    /// Signed distance a play moves the frontier. Negative only for a jump back.
    #[must_use]
    pub fn distance(self, top: i32, card: Card) -> i32 {
        match self {
            Direction::Ascending => card.value() - top,
            Direction::Descending => top - card.value(),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "UP"),
            Direction::Descending => write!(f, "DOWN"),
        }
    }
}

/// One pile on the table. Its history is append-only.
#[derive(Clone, Debug)]
pub struct Stack {
    id: StackId,
    direction: Direction,
    min_bound: i32,
    max_bound: i32,
    cards: Vec<Card>,
}

impl Stack {
    pub fn new(id: StackId, direction: Direction, min_bound: i32, max_bound: i32) -> Self {
        Self {
            id,
            direction,
            min_bound,
            max_bound,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> StackId {
        self.id
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The value a fresh stack shows.
    #[must_use]
    pub fn bound(&self) -> i32 {
        match self.direction {
            Direction::Ascending => self.min_bound,
            Direction::Descending => self.max_bound,
        }
    }

    /// Current top: the last card played, or the bound while empty.
    #[must_use]
    pub fn peek(&self) -> i32 {
        self.cards.last().map_or_else(|| self.bound(), |c| c.value())
    }

    /// Legality of `card` against this stack's current top under `direction`.
    #[must_use]
    pub fn is_legal(&self, card: Card, direction: Direction) -> bool {
        direction.allows(self.peek(), card)
    }

    /// Legality under the stack's own direction.
    #[must_use]
    pub fn accepts(&self, card: Card) -> bool {
        self.is_legal(card, self.direction)
    }

    /// Score of playing `card` here (see [`Direction::distance`]).
    #[must_use]
    pub fn distance(&self, card: Card) -> i32 {
        self.direction.distance(self.peek(), card)
    }

    /// Append `card`. Callers only push options produced by enumeration, so
    /// an illegal card here is an engine fault.
    pub fn push(&mut self, card: Card) -> Result<(), GameError> {
        if !self.accepts(card) {
            return Err(GameError::InvalidPlay {
                card,
                stack: self.id,
                reason: format!("{} stack shows {}", self.direction, self.peek()),
            });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Cards played so far, oldest first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Re-validate the recorded history from the starting bound.
    #[must_use]
    pub fn replay_is_legal(&self) -> bool {
        let mut top = self.bound();
        for &card in &self.cards {
            if !self.direction.allows(top, card) {
                return false;
            }
            top = card.value();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up() -> Stack {
        Stack::new(StackId::new(0), Direction::Ascending, 1, 100)
    }

    fn down() -> Stack {
        Stack::new(StackId::new(1), Direction::Descending, 1, 100)
    }

    #[test]
    fn test_empty_stack_peeks_bound() {
        assert_eq!(up().peek(), 1);
        assert_eq!(down().peek(), 100);
    }

    #[test]
    fn test_ascending_rule_boundaries() {
        let mut stack = up();
        stack.push(Card(40)).unwrap();

        assert!(stack.accepts(Card(41)));
        assert!(stack.accepts(Card(30)));
        assert!(!stack.accepts(Card(40)));
        assert!(!stack.accepts(Card(39)));
        assert!(!stack.accepts(Card(31)));
        assert!(!stack.accepts(Card(29)));
    }

    #[test]
    fn test_descending_rule_boundaries() {
        let mut stack = down();
        stack.push(Card(40)).unwrap();

        assert!(stack.accepts(Card(39)));
        assert!(stack.accepts(Card(50)));
        assert!(!stack.accepts(Card(40)));
        assert!(!stack.accepts(Card(41)));
        assert!(!stack.accepts(Card(49)));
        assert!(!stack.accepts(Card(51)));
    }

    #[test]
    fn test_jump_back_uses_current_top() {
        let mut stack = up();
        stack.push(Card(20)).unwrap();
        stack.push(Card(10)).unwrap();

        assert_eq!(stack.peek(), 10);
        // 20 - 10 = 10 was the jump; from 10 the jump target is 0, not 10 again
        assert!(!stack.accepts(Card(10)));
        assert!(stack.accepts(Card(11)));
    }

    #[test]
    fn test_is_legal_with_foreign_direction() {
        let mut stack = up();
        stack.push(Card(50)).unwrap();

        assert!(stack.is_legal(Card(49), Direction::Descending));
        assert!(!stack.is_legal(Card(49), Direction::Ascending));
    }

    #[test]
    fn test_distance_negative_only_on_jump() {
        let mut asc = up();
        asc.push(Card(50)).unwrap();
        assert_eq!(asc.distance(Card(40)), -10);
        assert_eq!(asc.distance(Card(53)), 3);

        let mut desc = down();
        desc.push(Card(50)).unwrap();
        assert_eq!(desc.distance(Card(60)), -10);
        assert_eq!(desc.distance(Card(48)), 2);
    }

    #[test]
    fn test_push_rejects_illegal_card() {
        let mut stack = down();
        stack.push(Card(80)).unwrap();

        let err = stack.push(Card(85)).unwrap_err();
        assert!(matches!(err, GameError::InvalidPlay { card: Card(85), .. }));
        assert_eq!(stack.cards(), &[Card(80)]);
    }

    #[test]
    fn test_replay_is_legal() {
        let mut stack = up();
        for v in [5, 20, 10, 15, 5] {
            stack.push(Card(v)).unwrap();
        }
        assert!(stack.replay_is_legal());
        assert_eq!(stack.len(), 5);
    }
}
