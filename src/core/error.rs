//! Engine fault taxonomy.
//!
//! Game outcomes (win, loss) are ordinary values and never appear here.
//! Every variant below is a programming fault or a rejected configuration;
//! bookkeeping faults carry a dump of the table taken when they were raised.

use thiserror::Error;

use super::card::{Card, StackId};
use super::player::PlayerId;

#[derive(Debug, Clone, Error)]
pub enum GameError {
    #[error("invalid play of {card} onto {stack}: {reason}")]
    InvalidPlay {
        card: Card,
        stack: StackId,
        reason: String,
    },

    #[error("card conservation violated: expected {expected} cards, counted {actual}\n{dump}")]
    ConservationViolation {
        expected: usize,
        actual: usize,
        dump: String,
    },

    #[error("hand bound violated for {player} (size {size}): {reason}\n{dump}")]
    HandBoundViolation {
        player: PlayerId,
        size: usize,
        reason: String,
        dump: String,
    },

    #[error("no play options to select from")]
    SelectFromEmpty,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// True for faults raised by the invariant checks rather than a single play.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            GameError::ConservationViolation { .. } | GameError::HandBoundViolation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_card_and_stack() {
        let err = GameError::InvalidPlay {
            card: Card::new(12),
            stack: StackId::new(2),
            reason: "not in hand".to_string(),
        };
        assert_eq!(err.to_string(), "invalid play of 12 onto Stack(2): not in hand");
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_invariant_violations_are_flagged() {
        let err = GameError::ConservationViolation {
            expected: 98,
            actual: 97,
            dump: String::new(),
        };
        assert!(err.is_invariant_violation());
        assert!(err.to_string().starts_with("card conservation violated: expected 98"));
    }
}
