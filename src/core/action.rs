//! Action representation: a validated pit index.
//!
//! An action names one of the acting side's six pits. Construction
//! validates the range, so every `Action` in circulation is a usable
//! index; whether the pit currently holds seeds is a separate legality
//! check made against a board.

use serde::{Deserialize, Serialize};

use super::board::PIT_COUNT;
use super::error::EngineError;

/// A pit index in `0..6`, always valid by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Action(u8);

impl Action {
    /// All six actions in ascending pit order.
    pub const ALL: [Action; PIT_COUNT] = [
        Action(0),
        Action(1),
        Action(2),
        Action(3),
        Action(4),
        Action(5),
    ];

    /// Create an action, rejecting indices outside `0..6`.
    pub fn new(index: usize) -> Result<Self, EngineError> {
        if index < PIT_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(EngineError::InvalidAction { action: index })
        }
    }

    /// The pit index this action sows from.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for Action {
    type Error = EngineError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::new(index)
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> usize {
        action.index()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pit {}", self.0)
    }
}
