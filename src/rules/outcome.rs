//! Terminal detection, outcome, and reward.
//!
//! The game ends the moment either side's six pits are all empty,
//! regardless of whose turn it is. Seeds still on the other side stay
//! where they are; they are not swept into a score. Outcomes compare
//! scores only, and strictly: a tie is a draw, never a win.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Side};

/// Reward for winning a finished game.
pub const WIN_REWARD: f64 = 100.0;
/// Reward for a drawn finished game.
pub const DRAW_REWARD: f64 = 0.0;
/// Reward for losing a finished game.
pub const LOSS_REWARD: f64 = -100.0;
/// Penalty for an illegal action attempt in training mode.
pub const INVALID_ACTION_REWARD: f64 = -1.0;

/// Result of a game relative to a reference side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The reference side's score is strictly higher.
    Win,
    /// Both scores are equal.
    Draw,
    /// The reference side's score is strictly lower.
    Lose,
}

impl GameOutcome {
    /// Compare two scores from the reference side's point of view.
    #[must_use]
    pub fn from_scores(reference: u8, other: u8) -> Self {
        match reference.cmp(&other) {
            std::cmp::Ordering::Greater => GameOutcome::Win,
            std::cmp::Ordering::Equal => GameOutcome::Draw,
            std::cmp::Ordering::Less => GameOutcome::Lose,
        }
    }
}

/// Whether the game has ended: either side's pits sum to zero.
#[must_use]
pub fn is_game_over(board: &Board) -> bool {
    board.side_sum(Side::Player) == 0 || board.side_sum(Side::Opponent) == 0
}

/// The outcome relative to `reference`.
///
/// Only meaningful once [`is_game_over`] is true; mid-game it reports
/// the running score comparison.
#[must_use]
pub fn outcome(board: &Board, reference: Side) -> GameOutcome {
    GameOutcome::from_scores(board.score(reference), board.score(reference.opposite()))
}

/// The reward signal for `side`.
///
/// Mid-game: the score difference, floored at -1. Terminal: +/-100 for
/// a decisive result, 0 for a draw.
#[must_use]
pub fn reward(board: &Board, side: Side) -> f64 {
    if !is_game_over(board) {
        let diff =
            i32::from(board.score(side)) - i32::from(board.score(side.opposite()));
        return f64::from(diff.max(-1));
    }

    match outcome(board, side) {
        GameOutcome::Win => WIN_REWARD,
        GameOutcome::Draw => DRAW_REWARD,
        GameOutcome::Lose => LOSS_REWARD,
    }
}
