//! Game rules: sowing mechanics and outcome determination.
//!
//! [`sowing`] applies one action to a board and reports the capture and
//! extra-turn signals; [`outcome`] decides when a position is terminal
//! and what it is worth. Both are pure functions over
//! [`crate::core::Board`] - the turn controller in [`crate::env`]
//! sequences them.

pub mod outcome;
pub mod sowing;

pub use outcome::{
    is_game_over, outcome, reward, GameOutcome, DRAW_REWARD, INVALID_ACTION_REWARD, LOSS_REWARD,
    WIN_REWARD,
};
pub use sowing::{sow, Capture, SowResult, RING_SIZE};
