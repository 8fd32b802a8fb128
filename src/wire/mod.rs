//! Canonical external representation of a game position.
//!
//! The wire form is always expressed from the perspective of whichever
//! side is making the current request: `side_*` fields are "mine",
//! `other_side_*` fields are "theirs", and `other_side_to_start`
//! carries the turn indicator. A fully stateless service round-trips
//! this struct on every call and reconstructs the engine from it.
//!
//! Decoding enforces the 48-seed invariant before any engine value is
//! constructed; a payload that fails the check never becomes a
//! position. Perspective rotation ([`WireState::flipped`]) is a pure
//! transform on the wire struct and belongs to the caller - the engine
//! only ever reasons about acting side vs other side.

use serde::{Deserialize, Serialize};

use crate::core::{Board, EngineError, GamePosition, Side, PIT_COUNT, TOTAL_SEEDS};

/// A game position as seen by the requesting side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireState {
    /// The requesting side's pit contents.
    pub side_pits: [u8; PIT_COUNT],
    /// The requesting side's score.
    pub side_score: u8,
    /// The other side's pit contents.
    pub other_side_pits: [u8; PIT_COUNT],
    /// The other side's score.
    pub other_side_score: u8,
    /// True when the other side acts next.
    pub other_side_to_start: bool,
}

impl WireState {
    /// Encode a position from the player perspective.
    #[must_use]
    pub fn encode(position: &GamePosition) -> Self {
        Self {
            side_pits: *position.board.pits(Side::Player),
            side_score: position.board.score(Side::Player),
            other_side_pits: *position.board.pits(Side::Opponent),
            other_side_score: position.board.score(Side::Opponent),
            other_side_to_start: position.to_act == Side::Opponent,
        }
    }

    /// Seeds accounted for across both sides' pits and scores.
    #[must_use]
    pub fn total_seeds(&self) -> u32 {
        let pits: u32 = self
            .side_pits
            .iter()
            .chain(self.other_side_pits.iter())
            .map(|&s| u32::from(s))
            .sum();
        pits + u32::from(self.side_score) + u32::from(self.other_side_score)
    }

    /// Reconstruct the position, rejecting payloads that do not
    /// account for all 48 seeds.
    pub fn decode(&self) -> Result<GamePosition, EngineError> {
        let total = self.total_seeds();
        if total != TOTAL_SEEDS {
            return Err(EngineError::MalformedState { total });
        }

        let board = Board::from_parts(
            self.side_pits,
            self.side_score,
            self.other_side_pits,
            self.other_side_score,
        );
        let to_act = if self.other_side_to_start {
            Side::Opponent
        } else {
            Side::Player
        };

        Ok(GamePosition::new(board, to_act))
    }

    /// Swap which side's fields are "mine".
    ///
    /// An involution: flipping twice returns the original.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            side_pits: self.other_side_pits,
            side_score: self.other_side_score,
            other_side_pits: self.side_pits,
            other_side_score: self.side_score,
            other_side_to_start: !self.other_side_to_start,
        }
    }
}
