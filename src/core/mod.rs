//! Core engine types: sides, actions, the board, RNG, and errors.
//!
//! This module contains the fundamental building blocks the rules and
//! turn machinery are written against.

pub mod action;
pub mod board;
pub mod error;
pub mod rng;
pub mod side;

pub use action::Action;
pub use board::{
    Board, GamePosition, Observation, OBSERVATION_LEN, PIT_COUNT, STARTING_SEEDS, TOTAL_SEEDS,
};
pub use error::EngineError;
pub use rng::GameRng;
pub use side::Side;
