//! Batch trial driver.
//!
//! Every trial builds its own `Table` from a per-trial RNG stream
//! (`GameRng::for_trial`), so trial `i` plays the same game whether the
//! batch runs serially or across a rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameError, GameRng};
use crate::game::Table;

use super::stats::{TrialReport, TrialStats};

/// What to do when a trial hits an engine fault.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Stop the batch and return the fault.
    #[default]
    AbortRun,
    /// Log the fault, count the trial as faulted and continue.
    SkipTrial,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub trials: u64,
    pub seed: u64,
    pub parallel: bool,
    pub fault_policy: FaultPolicy,
    pub game: GameConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            seed: 42,
            parallel: false,
            fault_policy: FaultPolicy::AbortRun,
            game: GameConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }
}

pub struct TrialRunner {
    config: RunConfig,
    root: GameRng,
}

impl TrialRunner {
    pub fn new(config: RunConfig) -> Result<Self, GameError> {
        config.game.validate()?;
        Ok(Self {
            root: GameRng::new(config.seed),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Build the table trial `index` would play, before dealing.
    pub fn table_for(&self, index: u64) -> Result<Table, GameError> {
        Table::new(&self.config.game, self.root.for_trial(index))
    }

    /// Play trial `index` to completion.
    pub fn run_trial(&self, index: u64) -> Result<TrialReport, GameError> {
        let mut table = self.table_for(index)?;
        let outcome = table.play_to_end()?;
        let (branching_sum, branching_samples) = table.branching();

        log::info!("trial {index}: {outcome}");
        Ok(TrialReport {
            index,
            outcome,
            turns: table.turns(),
            branching_sum,
            branching_samples,
            cards_left: table.cards_unplayed(),
        })
    }

    /// Run the whole batch and return the totals.
    pub fn run(&self) -> Result<TrialStats, GameError> {
        self.run_with(|index| self.run_trial(index))
    }

    /// Run the batch with `play` producing each trial's report. The fault
    /// policy applies to every error `play` returns.
    pub fn run_with<F>(&self, play: F) -> Result<TrialStats, GameError>
    where
        F: Fn(u64) -> Result<TrialReport, GameError> + Sync,
    {
        log::debug!(
            "running {} trials (seed {}, parallel: {})",
            self.config.trials,
            self.config.seed,
            self.config.parallel
        );

        if self.config.parallel {
            (0..self.config.trials)
                .into_par_iter()
                .map(|index| self.trial_stats(index, play(index)))
                .try_reduce(TrialStats::new, |a, b| Ok(a.merge(&b)))
        } else {
            let mut stats = TrialStats::new();
            for index in 0..self.config.trials {
                stats = stats.merge(&self.trial_stats(index, play(index))?);
            }
            Ok(stats)
        }
    }

    /// One trial's contribution, with the fault policy applied.
    fn trial_stats(
        &self,
        index: u64,
        result: Result<TrialReport, GameError>,
    ) -> Result<TrialStats, GameError> {
        let mut stats = TrialStats::new();
        match result {
            Ok(report) => stats.record(&report),
            Err(err) => {
                let kind = if err.is_invariant_violation() {
                    "invariant violation"
                } else {
                    "engine fault"
                };
                let origin = self.root.for_trial(index).state();
                log::error!(
                    "trial {index} {kind} (rng {}): {err}",
                    serde_json::to_string(&origin).unwrap_or_default()
                );
                match self.config.fault_policy {
                    FaultPolicy::AbortRun => return Err(err),
                    FaultPolicy::SkipTrial => stats.record_fault(),
                }
            }
        }
        Ok(stats)
    }
}
