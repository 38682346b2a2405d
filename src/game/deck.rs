//! The shared draw pile.

use crate::core::{Card, GameRng};

/// Shuffled source of unique cards, drawn from the end.
///
/// Once `is_empty()` reports true the deck never refills.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    initial_len: usize,
    empty: bool,
}

impl Deck {
    /// Build every card in `low..=high` and shuffle it.
    pub fn new(low: i32, high: i32, rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = (low..=high).map(Card::new).collect();
        rng.shuffle(&mut cards);
        Self::from_cards(cards)
    }

    /// Use `cards` in the given order; the last element is drawn first.
    ///
    /// ```
    /// use the_game_sim::core::Card;
    /// use the_game_sim::game::Deck;
    ///
    /// let mut deck = Deck::from_cards(vec![Card(5), Card(15), Card(95)]);
    /// assert_eq!(deck.draw(2), vec![Card(95), Card(15)]);
    /// assert!(!deck.is_empty());
    /// ```
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let initial_len = cards.len();
        Self {
            empty: cards.is_empty(),
            cards,
            initial_len,
        }
    }

    /// Remove up to `n` cards from the top.
    ///
    /// Stops early when the deck runs out; drawing from an empty deck
    /// yields nothing.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        if self.empty {
            return Vec::new();
        }

        let take = n.min(self.cards.len());
        let mut drawn = self.cards.split_off(self.cards.len() - take);
        drawn.reverse();

        if self.cards.is_empty() {
            self.empty = true;
        }
        drawn
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Cards still in the deck, bottom first.
    #[must_use]
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Size of the deck when it was built; the table's card pool.
    #[must_use]
    pub fn initial_len(&self) -> usize {
        self.initial_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_holds_full_range_once() {
        let mut rng = GameRng::new(42);
        let deck = Deck::new(2, 99, &mut rng);

        let mut values: Vec<i32> = deck.remaining().iter().map(|c| c.value()).collect();
        values.sort_unstable();
        assert_eq!(values, (2..=99).collect::<Vec<_>>());
        assert_eq!(deck.initial_len(), 98);
        assert!(!deck.is_empty());
    }

    #[test]
    fn test_empty_range() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::new(10, 9, &mut rng);

        assert!(deck.is_empty());
        assert!(deck.draw(3).is_empty());
    }

    #[test]
    fn test_draw_stops_early_and_marks_empty() {
        let mut deck = Deck::from_cards(vec![Card(1), Card(2), Card(3)]);

        assert_eq!(deck.draw(2), vec![Card(3), Card(2)]);
        assert!(!deck.is_empty());

        assert_eq!(deck.draw(5), vec![Card(1)]);
        assert!(deck.is_empty());
        assert_eq!(deck.len(), 0);

        assert!(deck.draw(1).is_empty());
    }

    #[test]
    fn test_draw_exactly_remaining_marks_empty() {
        let mut deck = Deck::from_cards(vec![Card(7), Card(8)]);
        assert_eq!(deck.draw(2).len(), 2);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = Deck::new(2, 99, &mut GameRng::new(5));
        let b = Deck::new(2, 99, &mut GameRng::new(5));
        assert_eq!(a.remaining(), b.remaining());
    }
}
