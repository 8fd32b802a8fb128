//! Engine error taxonomy.
//!
//! Four failure classes cover every way a caller can misuse the engine:
//!
//! - `InvalidAction`: the chosen pit is empty or the index is outside 0..5
//! - `MalformedState`: a wire payload violates the 48-seed invariant
//! - `PolicyViolation`: an injected policy returned an illegal action
//! - `GameAlreadyOver`: an action was attempted on a terminal position
//!
//! Training-mode stepping recovers `InvalidAction` locally (penalty
//! reward, truncation counter); play mode surfaces it. `MalformedState`
//! only ever occurs at the decode boundary, before any engine value is
//! built. `PolicyViolation` is recovered inside the opponent cascade via
//! a logged random-legal fallback; the variant exists for callers that
//! drive policies directly.

use thiserror::Error;

/// Errors that can occur while driving a game.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The source pit is empty or the index is outside 0..5.
    #[error("invalid action: pit {action} is empty or out of range")]
    InvalidAction {
        /// The offending pit index as supplied by the caller.
        action: usize,
    },

    /// A wire payload does not account for all 48 seeds.
    #[error("malformed state: seeds total {total}, expected 48")]
    MalformedState {
        /// Seed total found across both sides' pits and scores.
        total: u32,
    },

    /// An injected policy returned a pit the acting side cannot play.
    #[error("policy violation: returned illegal action {action}")]
    PolicyViolation {
        /// The illegal pit index the policy returned.
        action: usize,
    },

    /// An action was attempted after the game reached a terminal state.
    #[error("game is already over")]
    GameAlreadyOver,
}
