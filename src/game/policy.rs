//! Greedy play selection.
//!
//! The policy does not look ahead and does not coordinate between seats: it
//! takes the legal option that moves a stack's frontier the least. Jump-back
//! plays score negative and therefore always win when available.

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameRng, StackId, TieBreak};

use super::stack::Stack;

/// A legal (card, stack) pair and its score at enumeration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOption {
    pub card: Card,
    pub stack: StackId,
    pub score: i32,
}

impl PlayOption {
    /// Key for `TieBreak::Ordered`.
    fn ordering_key(&self) -> (i32, Card, StackId) {
        (self.score, self.card, self.stack)
    }
}

/// Signed distance `card` would move `stack`'s frontier.
#[must_use]
pub fn score(card: Card, stack: &Stack) -> i32 {
    stack.distance(card)
}

/// Pick the minimum-score option.
///
/// Returns `None` only for an empty slice. `TieBreak::Seeded` consumes one
/// draw from `rng` when more than one option shares the best score.
pub fn select_best(
    options: &[PlayOption],
    tie_break: TieBreak,
    rng: &mut GameRng,
) -> Option<PlayOption> {
    match tie_break {
        TieBreak::Ordered => options.iter().min_by_key(|o| o.ordering_key()).copied(),
        TieBreak::Seeded => {
            let best = options.iter().map(|o| o.score).min()?;
            let tied: Vec<&PlayOption> = options.iter().filter(|o| o.score == best).collect();
            let pick = if tied.len() == 1 {
                0
            } else {
                rng.gen_range_usize(0..tied.len())
            };
            Some(*tied[pick])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(card: i32, stack: u8, score: i32) -> PlayOption {
        PlayOption {
            card: Card(card),
            stack: StackId(stack),
            score,
        }
    }

    #[test]
    fn test_empty_options() {
        let mut rng = GameRng::new(0);
        assert_eq!(select_best(&[], TieBreak::Ordered, &mut rng), None);
        assert_eq!(select_best(&[], TieBreak::Seeded, &mut rng), None);
    }

    #[test]
    fn test_minimum_score_wins() {
        let mut rng = GameRng::new(0);
        let options = [opt(20, 0, 5), opt(30, 2, -10), opt(31, 1, 1)];

        assert_eq!(select_best(&options, TieBreak::Ordered, &mut rng), Some(opt(30, 2, -10)));
        assert_eq!(select_best(&options, TieBreak::Seeded, &mut rng), Some(opt(30, 2, -10)));
    }

    #[test]
    fn test_ordered_tie_break_card_then_stack() {
        let mut rng = GameRng::new(0);
        let options = [opt(50, 3, 4), opt(44, 1, 4), opt(44, 0, 4), opt(60, 2, 9)];

        assert_eq!(select_best(&options, TieBreak::Ordered, &mut rng), Some(opt(44, 0, 4)));
    }

    #[test]
    fn test_seeded_tie_break_stays_among_best_and_is_reproducible() {
        let options = [opt(50, 3, 4), opt(44, 1, 4), opt(44, 0, 4), opt(60, 2, 9)];

        let picks = |seed| {
            let mut rng = GameRng::new(seed);
            (0..20)
                .map(|_| select_best(&options, TieBreak::Seeded, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };

        let first = picks(7);
        assert!(first.iter().all(|o| o.score == 4));
        assert_eq!(first, picks(7));
    }
}
