//! Monte Carlo trials over the rules engine.
//!
//! - `runner`: builds one table per trial and plays it out, serially or in parallel
//! - `stats`: per-trial reports and mergeable totals

pub mod runner;
pub mod stats;

pub use runner::{FaultPolicy, RunConfig, TrialRunner};
pub use stats::{TrialReport, TrialStats};
