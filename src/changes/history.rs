// ChangeLog - ordered history of accepted changes and the pending-undo slot

use crate::changes::action::{ChangeAction, ChangeType};
use crate::changes::error::{ChangeError, ChangeResult};
use crate::drawing::Feature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Identifier of the map layer a change was made on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A change action as retained in the history
///
/// The surface target is dropped on conversion; entries own only plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub features: Vec<Feature>,
    /// Layer that was current when the change was accepted
    pub layer: Option<LayerId>,
    /// Monotonic position in the history, starting at 1
    pub version: u64,
    pub timestamp: DateTime<Utc>,
}

impl ChangeLogEntry {
    pub fn from_action(action: ChangeAction, layer: Option<LayerId>, version: u64) -> Self {
        Self {
            change_type: action.change_type,
            features: action.features,
            layer,
            version,
            timestamp: Utc::now(),
        }
    }
}

/// Single-slot staging area between "popped from the log" and "reverted"
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PendingUndo {
    #[default]
    Empty,
    Staged(ChangeLogEntry),
}

impl PendingUndo {
    pub fn is_empty(&self) -> bool {
        matches!(self, PendingUndo::Empty)
    }

    pub fn entry(&self) -> Option<&ChangeLogEntry> {
        match self {
            PendingUndo::Empty => None,
            PendingUndo::Staged(entry) => Some(entry),
        }
    }
}

/// Where the log is in the undo cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoState {
    /// Nothing staged
    Idle,
    /// One entry popped and waiting to be reverted
    PendingReversion,
}

/// Append-only history of accepted changes
///
/// Entries are kept in acceptance order, most recent at the back. When a
/// history limit is set the oldest entries are dropped past it.
#[derive(Debug, Default)]
pub struct ChangeLog {
    entries: VecDeque<ChangeLogEntry>,
    pending_undo: PendingUndo,
    next_version: u64,
    max_history: Option<usize>,
}

impl ChangeLog {
    /// Create an unbounded change log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a change log that keeps at most `max_history` entries
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            max_history: Some(max_history),
            ..Self::default()
        }
    }

    /// Version the next recorded entry will get
    ///
    /// # Errors
    /// `VersionOverflow` once an entry with `u64::MAX` has been pushed.
    pub fn next_version(&self) -> ChangeResult<u64> {
        self.next_version
            .checked_add(1)
            .ok_or(ChangeError::VersionOverflow)
    }

    /// Convert an action into an entry and append it, returning its version
    pub fn record(&mut self, action: ChangeAction, layer: Option<LayerId>) -> ChangeResult<u64> {
        let version = self.next_version()?;
        self.push_change(ChangeLogEntry::from_action(action, layer, version));
        Ok(version)
    }

    /// Append an entry to the tail of the log
    pub fn push_change(&mut self, entry: ChangeLogEntry) {
        log::debug!(
            "change logged: {} v{} on layer {:?}",
            entry.change_type,
            entry.version,
            entry.layer
        );
        self.next_version = self.next_version.max(entry.version);
        self.entries.push_back(entry);

        if let Some(max) = self.max_history {
            while self.entries.len() > max {
                self.entries.pop_front();
            }
        }
    }

    /// Move the tail entry into the pending-undo slot
    ///
    /// On an empty log the slot is set to `PendingUndo::Empty`.
    pub fn pop_last_change(&mut self) -> &PendingUndo {
        self.pending_undo = match self.entries.pop_back() {
            Some(entry) => PendingUndo::Staged(entry),
            None => PendingUndo::Empty,
        };
        &self.pending_undo
    }

    /// Reset the pending-undo slot, returning whatever was staged
    pub fn clear_pending_undo(&mut self) -> Option<ChangeLogEntry> {
        match std::mem::take(&mut self.pending_undo) {
            PendingUndo::Staged(entry) => Some(entry),
            PendingUndo::Empty => None,
        }
    }

    pub fn pending_undo(&self) -> &PendingUndo {
        &self.pending_undo
    }

    pub fn undo_state(&self) -> UndoState {
        if self.pending_undo.is_empty() {
            UndoState::Idle
        } else {
            UndoState::PendingReversion
        }
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ChangeLogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ChangeLogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Drop all history and any staged entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending_undo = PendingUndo::Empty;
    }
}
