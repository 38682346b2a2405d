//! # the-game-sim
//!
//! A rules engine and trial runner for the cooperative card game *The Game*.
//!
//! Cards 2-99 are shuffled into a shared deck. Players hold six cards each
//! and place them on four stacks: two count up from 1, two count down from
//! 100. A card may always go ten "backwards" from a stack's top. Each turn a
//! player must play two cards (one once the deck is exhausted), then refills
//! the hand. The table wins when every card is placed and loses when the
//! active player cannot make a required play.
//!
//! ## Design
//!
//! - **Explicit state**: every operation takes the `Table`, `Stack`,
//!   `Player` or `Deck` it works on; there is no shared global table.
//!
//! - **Deterministic**: hands are sorted, options are enumerated in
//!   card-then-stack order, ties are broken by a configured rule, and all
//!   randomness flows from a seeded `GameRng`.
//!
//! - **Faults are values**: broken invariants come back as `GameError`s with
//!   a state dump, so the trial runner can abort or skip a trial.
//!
//! ## Modules
//!
//! - `core`: cards, seats, configuration, RNG, errors
//! - `game`: deck, stacks, players, greedy policy, turn protocol
//! - `sim`: trial runner and statistics

pub mod core;
pub mod game;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Card, GameConfig, GameError, GameRng, GameRngState, PlayerId, PlayerMap, StackId, TieBreak,
};

pub use crate::game::{
    Deck, Direction, Outcome, Phase, Play, PlayOption, Player, Stack, Table, TurnSummary,
};

pub use crate::sim::{FaultPolicy, RunConfig, TrialReport, TrialRunner, TrialStats};
