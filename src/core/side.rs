//! Relative side labels.
//!
//! Sides are perspectives, not fixed identities: the same board can be
//! read from either side by swapping which pits and score are "mine".
//! `Player` is whichever side is driving the current call chain;
//! `Opponent` is the other one.

use serde::{Deserialize, Serialize};

/// One of the two sides of the board, relative to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The driving side (the learner in training mode, the requester in
    /// play mode).
    Player,
    /// The other side.
    Opponent,
}

impl Side {
    /// The side opposite this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Array index for per-side storage (`Player` = 0, `Opponent` = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}
