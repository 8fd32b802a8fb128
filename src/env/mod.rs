//! The turn controller: a playable game environment.
//!
//! ## State machine
//!
//! `PlayerTurn` and `OpponentTurn` alternate except when the sowing
//! engine grants an extra turn; `GameOver` wins over everything the
//! moment either side's pits are empty, even mid-cascade. The turn
//! indicator lives on the [`GamePosition`]; [`MancalaEnv::turn_state`]
//! derives the machine state from it so the terminal transition cannot
//! be missed.
//!
//! ## Operating modes
//!
//! - **Training episodes** ([`MancalaEnv::step`]): one call drives one
//!   player action plus, unless an extra turn was earned, the full
//!   opponent cascade through the injected policy. Illegal actions are
//!   penalised (no mutation, reward -1) and ten consecutive ones
//!   truncate the episode.
//! - **Atomic play** ([`MancalaEnv::step_in_play_mode`]): one call
//!   applies exactly one action for whichever side the indicator
//!   names. The caller owns policy invocation; a stateless service
//!   reconstructs the engine per request from the wire form.
//!
//! Every environment carries a `game_id` correlation value that tags
//! its tracing events, so interleaved games stay separable in logs.

use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{
    Action, EngineError, GamePosition, GameRng, Observation, Side, PIT_COUNT,
};
use crate::history::History;
use crate::policy::{NullPolicy, OpponentPolicy};
use crate::rules::{self, GameOutcome, INVALID_ACTION_REWARD};
use crate::wire::WireState;

/// Monotonic correlation id source; one id per game, process-wide.
static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

fn next_game_id() -> u64 {
    NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed)
}

/// Tunable environment settings.
#[derive(Clone, Copy, Debug)]
pub struct EnvConfig {
    /// Consecutive illegal player actions before a training episode is
    /// truncated.
    pub invalid_action_limit: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            invalid_action_limit: 10,
        }
    }
}

impl EnvConfig {
    /// Create a config with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the consecutive-invalid-action truncation limit.
    #[must_use]
    pub fn with_invalid_action_limit(mut self, limit: u32) -> Self {
        self.invalid_action_limit = limit;
        self
    }
}

/// The turn state machine's observable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    /// The player acts next.
    PlayerTurn,
    /// The opponent acts next.
    OpponentTurn,
    /// Terminal: either side's pits are empty.
    GameOver,
}

/// Outcome flags reported alongside every training step.
///
/// Mirrors the running score comparison from the player's perspective,
/// whether or not the game is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// The player's score is strictly ahead.
    pub is_success: bool,
    /// The scores are level.
    pub is_draw: bool,
    /// The player's score is strictly behind.
    pub is_loss: bool,
}

impl StepInfo {
    fn from_outcome(outcome: GameOutcome) -> Self {
        Self {
            is_success: outcome == GameOutcome::Win,
            is_draw: outcome == GameOutcome::Draw,
            is_loss: outcome == GameOutcome::Lose,
        }
    }
}

/// Everything a training step returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    /// Observation from the player's perspective after the step.
    pub observation: Observation,
    /// Reward signal for the player.
    pub reward: f64,
    /// The game reached a terminal position.
    pub terminated: bool,
    /// The episode was cut off by the invalid-action limit.
    pub truncated: bool,
    /// Running outcome flags.
    pub info: StepInfo,
}

/// A single game owned by one call chain.
///
/// Construct with [`MancalaEnv::new`] for training episodes, or with
/// the `start_in_play_mode_*` constructors for stateless play.
pub struct MancalaEnv {
    position: GamePosition,
    opponent_policy: Box<dyn OpponentPolicy>,
    rng: GameRng,
    seed: Option<u64>,
    invalid_count: u32,
    valid_step_count: u32,
    history: History,
    config: EnvConfig,
    game_id: u64,
}

impl MancalaEnv {
    /// Create a training-mode environment and start the first episode.
    ///
    /// The starting side is drawn at random; when the opponent starts,
    /// its cascade runs immediately so the environment always hands
    /// the learner a player-to-move position.
    #[must_use]
    pub fn new(opponent_policy: Box<dyn OpponentPolicy>, seed: Option<u64>) -> Self {
        Self::with_config(opponent_policy, seed, EnvConfig::default())
    }

    /// Create a training-mode environment with explicit settings.
    #[must_use]
    pub fn with_config(
        opponent_policy: Box<dyn OpponentPolicy>,
        seed: Option<u64>,
        config: EnvConfig,
    ) -> Self {
        let mut env = Self {
            position: GamePosition::initial(Side::Player),
            opponent_policy,
            rng: GameRng::from_entropy(),
            seed: None,
            invalid_count: 0,
            valid_step_count: 0,
            history: History::new(),
            config,
            game_id: 0,
        };
        env.reset(seed);
        env
    }

    /// Create a play-mode environment at the starting position.
    ///
    /// Play mode never consults a policy: each request supplies its
    /// own action.
    #[must_use]
    pub fn start_in_play_mode_initial(is_player_turn: bool) -> Self {
        let to_act = if is_player_turn {
            Side::Player
        } else {
            Side::Opponent
        };
        Self::from_position(GamePosition::initial(to_act))
    }

    /// Create a play-mode environment from a wire payload.
    ///
    /// Fails with `MalformedState` before any engine state is built if
    /// the payload does not account for all 48 seeds.
    pub fn start_in_play_mode_midgame(wire: &WireState) -> Result<Self, EngineError> {
        Ok(Self::from_position(wire.decode()?))
    }

    fn from_position(position: GamePosition) -> Self {
        let game_id = next_game_id();
        let mut history = History::new();
        history.record_initial(position);
        debug!(game_id, state = %position.board, "initial state");

        Self {
            position,
            opponent_policy: Box::new(NullPolicy),
            rng: GameRng::from_entropy(),
            seed: None,
            invalid_count: 0,
            valid_step_count: 0,
            history,
            config: EnvConfig::default(),
            game_id,
        }
    }

    /// Start a fresh training episode and return the first
    /// observation.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        self.seed = seed;
        self.rng = match seed {
            Some(s) => GameRng::new(s),
            None => GameRng::from_entropy(),
        };
        self.game_id = next_game_id();
        self.position = GamePosition::initial(Side::Player);
        self.invalid_count = 0;
        self.valid_step_count = 0;
        self.history = History::new();
        self.history.record_initial(self.position);

        // Decide who starts at random; an opponent start plays out
        // immediately so the learner only ever moves from PlayerTurn.
        if !self.rng.gen_bool(0.5) {
            self.position.to_act = Side::Opponent;
            self.opponent_takes_turns_if_not_game_over();
        }

        debug!(game_id = self.game_id, state = %self.position.board, "reset");
        self.observation()
    }

    /// Drive one training step: the player's action plus, unless an
    /// extra turn was earned, the full opponent cascade.
    ///
    /// Errors with `GameAlreadyOver` when called on a terminal
    /// position; check [`MancalaEnv::is_game_over`] first.
    pub fn step(&mut self, action: Action) -> Result<StepResult, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameAlreadyOver);
        }

        // No state change happens on invalid moves, only a penalty;
        // the episode truncates after too many in a row.
        if !self.position.board.is_legal(Side::Player, action) {
            debug!(game_id = self.game_id, %action, "player attempted invalid action");
            self.invalid_count += 1;
            return Ok(StepResult {
                observation: self.observation(),
                reward: INVALID_ACTION_REWARD,
                terminated: false,
                truncated: self.invalid_count >= self.config.invalid_action_limit,
                info: self.step_info(),
            });
        }
        self.invalid_count = 0;

        let plays_again = self.apply(Side::Player, action);
        if !plays_again {
            self.opponent_takes_turns_if_not_game_over();
        } else {
            debug!(
                game_id = self.game_id,
                "extra turn: only the player moves on this step"
            );
        }

        if self.is_game_over() {
            debug!(game_id = self.game_id, "finished a game");
        }
        debug!(
            game_id = self.game_id,
            step = self.valid_step_count,
            state = %self.position.board,
            "step complete"
        );
        self.valid_step_count += 1;

        Ok(StepResult {
            observation: self.observation(),
            reward: rules::reward(&self.position.board, Side::Player),
            terminated: self.is_game_over(),
            truncated: false,
            info: self.step_info(),
        })
    }

    /// Apply exactly one action for whichever side the turn indicator
    /// names, advancing the indicator by one ply.
    ///
    /// Callers pre-check legality via [`MancalaEnv::allowed_moves`];
    /// an illegal action or a terminal position is rejected outright
    /// with no mutation.
    pub fn step_in_play_mode(&mut self, action: Action) -> Result<(), EngineError> {
        if self.is_game_over() {
            return Err(EngineError::GameAlreadyOver);
        }

        let side = self.position.to_act;
        if !self.position.board.is_legal(side, action) {
            return Err(EngineError::InvalidAction {
                action: action.index(),
            });
        }

        self.apply(side, action);
        debug!(
            game_id = self.game_id,
            state = %self.position.board,
            "play-mode step complete"
        );
        Ok(())
    }

    /// The canonical wire form, from the player perspective.
    #[must_use]
    pub fn get_serialised_form(&self) -> WireState {
        WireState::encode(&self.position)
    }

    /// Observation from the player's perspective.
    #[must_use]
    pub fn observation(&self) -> Observation {
        self.position.board.observation(Side::Player)
    }

    /// Legal pit indices for the side about to act, ascending.
    #[must_use]
    pub fn allowed_moves(&self) -> SmallVec<[Action; PIT_COUNT]> {
        self.position.allowed_moves()
    }

    /// Whether the game has reached a terminal position.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        rules::is_game_over(&self.position.board)
    }

    /// The state machine's current state.
    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        if self.is_game_over() {
            TurnState::GameOver
        } else {
            match self.position.to_act {
                Side::Player => TurnState::PlayerTurn,
                Side::Opponent => TurnState::OpponentTurn,
            }
        }
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> &GamePosition {
        &self.position
    }

    /// The recorded transition trail for this game.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    fn step_info(&self) -> StepInfo {
        StepInfo::from_outcome(rules::outcome(&self.position.board, Side::Player))
    }

    /// Apply a pre-validated action for `side`: board, turn indicator,
    /// history, logging.
    ///
    /// Returns whether `side` earned an extra turn.
    fn apply(&mut self, side: Side, action: Action) -> bool {
        let result = match rules::sow(&self.position.board, side, action) {
            Ok(result) => result,
            // Both call sites validate legality first; an empty source
            // pit here is an engine bug.
            Err(err) => panic!("apply of pre-validated action failed: {err}"),
        };

        self.position.board = result.board;
        self.position.to_act = if result.plays_again {
            side
        } else {
            side.opposite()
        };

        if let Some(capture) = result.capture {
            debug!(
                game_id = self.game_id,
                side = %side,
                pit = capture.pit,
                mirror = capture.mirror,
                seeds = capture.seeds,
                "capture"
            );
        }

        self.history.record_transition(action, self.position);
        result.plays_again
    }

    /// Run the opponent cascade: consult the policy, validate, apply,
    /// and repeat while extra turns keep coming and the game is live.
    /// Hands the turn back to the player on exit.
    fn opponent_takes_turns_if_not_game_over(&mut self) {
        let mut plays_again = true;
        while plays_again && !self.is_game_over() {
            let observation = self.position.board.observation(Side::Opponent);
            let chosen = self.opponent_policy.choose_action(self.seed, &observation);

            let action = if self.position.board.is_legal(Side::Opponent, chosen) {
                chosen
            } else {
                // Recovered PolicyViolation: keep self-play alive with
                // a uniformly random legal substitute.
                warn!(
                    game_id = self.game_id,
                    action = chosen.index(),
                    "policy returned illegal action, substituting a random legal move"
                );
                self.random_legal_action(Side::Opponent)
            };

            plays_again = self.apply(Side::Opponent, action);
        }
        self.position.to_act = Side::Player;
    }

    /// A uniformly random legal action for `side`.
    fn random_legal_action(&mut self, side: Side) -> Action {
        let moves = self.position.board.allowed_moves(side);
        // The cascade only runs while the game is live, and a live
        // game means both sides still hold seeds.
        assert!(!moves.is_empty(), "no legal moves for {side} in a live game");
        moves[self.rng.gen_range_usize(0..moves.len())]
    }
}

impl std::fmt::Display for MancalaEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "legend: [p_side],[p_score],[o_side],[o_score]")?;
        writeln!(f, "current_state: {}", self.position.board)?;
        writeln!(f, "history:")?;
        write!(f, "{}", self.history)
    }
}
