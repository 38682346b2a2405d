//! Core building blocks: cards, seats, configuration, RNG and the fault type.
//!
//! Nothing in here knows the turn protocol; the `game` module builds on
//! these types.

pub mod card;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use card::{Card, StackId};
pub use config::{GameConfig, TieBreak, CARD_LIMIT, MAX_DECK_SIZE};
pub use error::GameError;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
