//! # mancala-engine
//!
//! A two-side sowing-and-capture rules engine (six pits per side, one
//! score store per side, 48 seeds), built to serve two masters:
//!
//! 1. **Training loops**: a gym-style environment whose `step` drives
//!    one player action plus the opponent's full reply through an
//!    injected policy callback.
//! 2. **Stateless play services**: an atomic one-action-per-call mode
//!    where every request carries the whole game position over an
//!    invariant-checked wire form and no server-side session exists.
//!
//! ## Design Principles
//!
//! 1. **Owned state**: the board is a small `Copy` value; the sowing
//!    engine returns fresh boards and history entries snapshot by
//!    value. Nothing aliases.
//!
//! 2. **Policy-agnostic**: the engine is correct under any opponent
//!    policy, random or adversarial. Illegal policy answers are
//!    recovered with a logged random-legal fallback.
//!
//! 3. **Checked boundaries**: wire payloads prove the 48-seed
//!    invariant before any engine value exists; illegal actions never
//!    mutate anything.
//!
//! ## Modules
//!
//! - `core`: sides, actions, the board, RNG, error taxonomy
//! - `rules`: sowing mechanics, terminal detection, rewards
//! - `policy`: opponent policy trait and baseline implementations
//! - `history`: append-only audit trail of one game
//! - `wire`: canonical external representation
//! - `env`: the turn controller in both operating modes

pub mod core;
pub mod env;
pub mod history;
pub mod policy;
pub mod rules;
pub mod wire;

// Re-export commonly used types
pub use crate::core::{
    Action, Board, EngineError, GamePosition, GameRng, Observation, Side, OBSERVATION_LEN,
    PIT_COUNT, STARTING_SEEDS, TOTAL_SEEDS,
};

pub use crate::rules::{
    is_game_over, outcome, reward, sow, Capture, GameOutcome, SowResult, DRAW_REWARD,
    INVALID_ACTION_REWARD, LOSS_REWARD, WIN_REWARD,
};

pub use crate::policy::{NullPolicy, OpponentPolicy, RandomPolicy};

pub use crate::history::{History, HistoryEntry};

pub use crate::wire::WireState;

pub use crate::env::{EnvConfig, MancalaEnv, StepInfo, StepResult, TurnState};
