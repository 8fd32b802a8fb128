//! Opponent policies: how the non-driving side picks its moves.
//!
//! Policies are trait-based so the training loop can inject anything
//! from a uniform-random baseline to a model-backed agent. The engine
//! treats the policy as an opaque, blocking callback
//! `(seed, observation) -> action`; the observation is always rotated
//! to the acting side's perspective before the call.
//!
//! A policy must return a pit the acting side can actually play. The
//! turn controller validates every returned action and recovers from a
//! violation with a logged random-legal fallback, so a buggy policy
//! degrades a self-play loop instead of killing it.

use crate::core::{Action, GameRng, Observation};

/// Policy for choosing the non-driving side's actions.
pub trait OpponentPolicy: Send {
    /// Choose an action for the acting side.
    ///
    /// `observation` is laid out from the acting side's perspective:
    /// its own pits occupy the first six slots. `seed` is the game's
    /// seed, forwarded so deterministic policies can reproduce runs.
    fn choose_action(&mut self, seed: Option<u64>, observation: &Observation) -> Action;
}

/// A uniformly random legal move for the observing side, if any.
///
/// Reads the acting side's pits off the first six observation slots.
/// Returns `None` when every own pit is empty (the game is over and
/// the engine would not have asked).
#[must_use]
pub fn random_legal_move(observation: &Observation, rng: &mut GameRng) -> Option<Action> {
    let legal: Vec<Action> = Action::ALL
        .iter()
        .copied()
        .filter(|a| observation[a.index()] > 0)
        .collect();
    rng.choose(&legal).copied()
}

/// Uniform random opponent.
///
/// Honours the forwarded seed: the internal RNG is created lazily from
/// the seed of the first call, so the same seed replays the same game.
#[derive(Debug, Default)]
pub struct RandomPolicy {
    rng: Option<GameRng>,
}

impl RandomPolicy {
    /// Create a policy that seeds itself from the first call's seed
    /// (or OS entropy when the game is unseeded).
    #[must_use]
    pub fn new() -> Self {
        Self { rng: None }
    }

    /// Create a policy with an explicit seed, ignoring forwarded ones.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(GameRng::new(seed)),
        }
    }
}

impl OpponentPolicy for RandomPolicy {
    fn choose_action(&mut self, seed: Option<u64>, observation: &Observation) -> Action {
        let rng = self.rng.get_or_insert_with(|| match seed {
            Some(s) => GameRng::new(s),
            None => GameRng::from_entropy(),
        });

        // A side that can act always has a legal pit; the placeholder
        // is only reachable if the caller asks on a finished game.
        random_legal_move(observation, rng).unwrap_or(Action::ALL[0])
    }
}

/// Inert placeholder policy for play mode, where the engine never
/// consults a policy: each request supplies its own action.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPolicy;

impl OpponentPolicy for NullPolicy {
    fn choose_action(&mut self, _seed: Option<u64>, _observation: &Observation) -> Action {
        Action::ALL[0]
    }
}

/// Sanity check used before trusting a policy's answer.
#[must_use]
pub fn is_policy_action_legal(observation: &Observation, action: Action) -> bool {
    observation[action.index()] > 0
}
