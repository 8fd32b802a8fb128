//! Board state: the canonical game position.
//!
//! ## Board
//!
//! Two ordered rows of six pits plus one score store per side, 48 seeds
//! in total. The board is a small `Copy` value: the sowing engine
//! returns fresh boards rather than mutating shared ones, and history
//! snapshots are plain copies that later play can never alias.
//!
//! ## GamePosition
//!
//! A board paired with the turn indicator (which side acts next). This
//! is the complete unit of game state a stateless service round-trips
//! per request.
//!
//! ## Invariant
//!
//! After every transition: both sides' pits plus both scores account
//! for exactly [`TOTAL_SEEDS`] seeds.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::Action;
use super::side::Side;

/// Pits per side.
pub const PIT_COUNT: usize = 6;

/// Seeds in every pit at game start.
pub const STARTING_SEEDS: u8 = 4;

/// Seeds on the board at all times (2 sides x 6 pits x 4 seeds).
pub const TOTAL_SEEDS: u32 = 48;

/// Length of the flat observation vector: own pits, own score, other
/// pits, other score.
pub const OBSERVATION_LEN: usize = 14;

/// Flat observation from one side's perspective:
/// `[mine_pit0..5, mine_score, theirs_pit0..5, theirs_score]`.
pub type Observation = [u8; OBSERVATION_LEN];

/// Pit and store contents for both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Pit seed counts, indexed by [`Side::index`].
    pits: [[u8; PIT_COUNT]; 2],
    /// Score store contents, indexed by [`Side::index`].
    scores: [u8; 2],
}

impl Board {
    /// The starting board: four seeds in every pit, empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pits: [[STARTING_SEEDS; PIT_COUNT]; 2],
            scores: [0; 2],
        }
    }

    /// Assemble a board from player-relative parts.
    ///
    /// Does not check the seed invariant; validated construction from
    /// external data goes through [`crate::wire::WireState::decode`].
    #[must_use]
    pub fn from_parts(
        player_pits: [u8; PIT_COUNT],
        player_score: u8,
        opponent_pits: [u8; PIT_COUNT],
        opponent_score: u8,
    ) -> Self {
        Self {
            pits: [player_pits, opponent_pits],
            scores: [player_score, opponent_score],
        }
    }

    /// Assemble a board from `side`-relative parts.
    #[must_use]
    pub fn from_side_parts(
        side: Side,
        own_pits: [u8; PIT_COUNT],
        own_score: u8,
        other_pits: [u8; PIT_COUNT],
        other_score: u8,
    ) -> Self {
        match side {
            Side::Player => Self::from_parts(own_pits, own_score, other_pits, other_score),
            Side::Opponent => Self::from_parts(other_pits, other_score, own_pits, own_score),
        }
    }

    /// A side's pit row.
    #[must_use]
    pub fn pits(&self, side: Side) -> &[u8; PIT_COUNT] {
        &self.pits[side.index()]
    }

    /// A side's score store contents.
    #[must_use]
    pub fn score(&self, side: Side) -> u8 {
        self.scores[side.index()]
    }

    /// Sum of one side's pit contents.
    #[must_use]
    pub fn side_sum(&self, side: Side) -> u32 {
        self.pits[side.index()].iter().map(|&s| u32::from(s)).sum()
    }

    /// Total seeds across both sides' pits and both stores.
    #[must_use]
    pub fn total_seeds(&self) -> u32 {
        self.side_sum(Side::Player)
            + self.side_sum(Side::Opponent)
            + u32::from(self.scores[0])
            + u32::from(self.scores[1])
    }

    /// Whether `side` may sow from `action` (the pit holds a seed).
    #[must_use]
    pub fn is_legal(&self, side: Side, action: Action) -> bool {
        self.pits[side.index()][action.index()] > 0
    }

    /// Pit indices `side` may sow from, in ascending order.
    ///
    /// Empty iff the side has no seeds left, which implies the game is
    /// over: a side with seeds anywhere always has at least one legal
    /// pit.
    #[must_use]
    pub fn allowed_moves(&self, side: Side) -> SmallVec<[Action; PIT_COUNT]> {
        Action::ALL
            .iter()
            .copied()
            .filter(|&a| self.is_legal(side, a))
            .collect()
    }

    /// The flat observation vector from `side`'s perspective.
    #[must_use]
    pub fn observation(&self, side: Side) -> Observation {
        let mut obs = [0u8; OBSERVATION_LEN];
        let other = side.opposite();
        obs[..PIT_COUNT].copy_from_slice(self.pits(side));
        obs[PIT_COUNT] = self.score(side);
        obs[PIT_COUNT + 1..2 * PIT_COUNT + 1].copy_from_slice(self.pits(other));
        obs[2 * PIT_COUNT + 1] = self.score(other);
        obs
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}, {}, {:?}, {}",
            self.pits(Side::Player),
            self.score(Side::Player),
            self.pits(Side::Opponent),
            self.score(Side::Opponent)
        )
    }
}

/// A board plus the turn indicator: everything needed to resume a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GamePosition {
    /// The board contents.
    pub board: Board,
    /// The side that acts next.
    pub to_act: Side,
}

impl GamePosition {
    /// Create a position from parts.
    #[must_use]
    pub fn new(board: Board, to_act: Side) -> Self {
        Self { board, to_act }
    }

    /// The starting position with `to_act` to move.
    #[must_use]
    pub fn initial(to_act: Side) -> Self {
        Self::new(Board::new(), to_act)
    }

    /// Legal pit indices for the side about to act, ascending.
    #[must_use]
    pub fn allowed_moves(&self) -> SmallVec<[Action; PIT_COUNT]> {
        self.board.allowed_moves(self.to_act)
    }

    /// Observation from the acting side's perspective.
    #[must_use]
    pub fn observation(&self) -> Observation {
        self.board.observation(self.to_act)
    }
}
