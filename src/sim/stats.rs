//! Aggregate statistics over many trials.

use serde::{Deserialize, Serialize};

use crate::game::Outcome;

/// What one completed trial contributes to the totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialReport {
    pub index: u64,
    pub outcome: Outcome,
    pub turns: u32,
    pub branching_sum: u64,
    pub branching_samples: u64,
    /// Cards still in the deck or in hands when the game ended.
    pub cards_left: usize,
}

/// Running totals. Merging is a plain sum, so partial results from
/// independent workers can be combined in any order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialStats {
    /// Trials attempted, faulted ones included.
    pub trials: u64,
    pub wins: u64,
    pub losses: u64,
    /// Trials abandoned because of an engine fault.
    pub faulted: u64,
    pub branching_sum: u64,
    pub branching_samples: u64,
    pub total_turns: u64,
    /// Sum of cards left unplayed over lost games.
    pub cards_left_on_loss: u64,
}

impl TrialStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &TrialReport) {
        self.trials += 1;
        match report.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => {
                self.losses += 1;
                self.cards_left_on_loss += report.cards_left as u64;
            }
        }
        self.branching_sum += report.branching_sum;
        self.branching_samples += report.branching_samples;
        self.total_turns += u64::from(report.turns);
    }

    pub fn record_fault(&mut self) {
        self.trials += 1;
        self.faulted += 1;
    }

    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            trials: self.trials + other.trials,
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
            faulted: self.faulted + other.faulted,
            branching_sum: self.branching_sum + other.branching_sum,
            branching_samples: self.branching_samples + other.branching_samples,
            total_turns: self.total_turns + other.total_turns,
            cards_left_on_loss: self.cards_left_on_loss + other.cards_left_on_loss,
        }
    }

    /// Wins over trials, in `[0, 1]`.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.wins as f64 / self.trials as f64
        }
    }

    /// Mean number of legal options per mandatory decision point.
    #[must_use]
    pub fn avg_branching_factor(&self) -> f64 {
        if self.branching_samples == 0 {
            0.0
        } else {
            self.branching_sum as f64 / self.branching_samples as f64
        }
    }

    #[must_use]
    pub fn avg_turns(&self) -> f64 {
        let finished = self.wins + self.losses;
        if finished == 0 {
            0.0
        } else {
            self.total_turns as f64 / finished as f64
        }
    }

    #[must_use]
    pub fn avg_cards_left_on_loss(&self) -> f64 {
        if self.losses == 0 {
            0.0
        } else {
            self.cards_left_on_loss as f64 / self.losses as f64
        }
    }
}

impl std::fmt::Display for TrialStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wins: {}", self.wins)?;
        writeln!(f, "Losses: {}", self.losses)?;
        if self.faulted > 0 {
            writeln!(f, "Faulted: {}", self.faulted)?;
        }
        writeln!(f, "Winrate of {:.2} %", self.win_rate() * 100.0)?;
        writeln!(
            f,
            "Players had an average of {:.2} options each turn",
            self.avg_branching_factor()
        )?;
        write!(f, "Games lasted {:.2} turns on average", self.avg_turns())?;
        if self.losses > 0 {
            write!(
                f,
                "\nLost games left {:.2} cards unplayed on average",
                self.avg_cards_left_on_loss()
            )?;
        }
        Ok(())
    }
}
