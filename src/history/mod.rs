//! Append-only audit trail of a single game.
//!
//! Every transition records the action that produced a position and
//! the action taken from it, plus a by-value snapshot of the position
//! itself. Snapshots are plain copies: later engine mutation can never
//! rewrite a recorded entry.
//!
//! Invariants:
//! - the first entry has no `pre_action` (nothing produced the start)
//! - a terminal entry has no `post_action` (nothing was played from it)
//!
//! Uses `im::Vector` so cloning a history (e.g. handing a move trace
//! to a caller mid-game) is O(1) and shares no mutable structure.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Action, GamePosition};

/// One recorded state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The action that led into this position; `None` for the start.
    pub pre_action: Option<Action>,
    /// Snapshot of the position at this point.
    pub position: GamePosition,
    /// The action played from this position; `None` until one is, and
    /// forever for a terminal entry.
    pub post_action: Option<Action>,
}

/// Ordered, append-only sequence of game transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vector<HistoryEntry>,
}

impl History {
    /// An empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vector::new(),
        }
    }

    /// Record the starting position. Must be the first record.
    pub fn record_initial(&mut self, position: GamePosition) {
        debug_assert!(self.entries.is_empty(), "initial entry must come first");
        self.entries.push_back(HistoryEntry {
            pre_action: None,
            position,
            post_action: None,
        });
    }

    /// Record that `action` was played, producing `position`.
    ///
    /// Closes the previous entry's `post_action` and appends the new
    /// snapshot.
    pub fn record_transition(&mut self, action: Action, position: GamePosition) {
        debug_assert!(!self.entries.is_empty(), "record_initial must come first");
        if let Some(last) = self.entries.back_mut() {
            last.post_action = Some(action);
        }
        self.entries.push_back(HistoryEntry {
            pre_action: Some(action),
            position,
            post_action: None,
        });
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in recording order.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The entry at `index`, if recorded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            write!(f, "\t{}", entry.position.board)?;
            match entry.post_action {
                Some(action) => writeln!(f, " -> {action}")?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}
