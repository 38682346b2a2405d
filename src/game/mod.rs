//! The rules engine for The Game.
//!
//! - `deck`: the shared draw pile
//! - `stack`: play stacks and the legality rule (including the jump back)
//! - `policy`: greedy option scoring and selection
//! - `player`: hands and legal-move enumeration
//! - `table`: the turn protocol and invariant checks

pub mod deck;
pub mod player;
pub mod policy;
pub mod stack;
pub mod table;

pub use deck::Deck;
pub use player::{Hand, Player};
pub use policy::{select_best, PlayOption};
pub use stack::{Direction, Stack, JUMP_BACK};
pub use table::{Outcome, Phase, Play, Table, TurnSummary};
