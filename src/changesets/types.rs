// Types for change sets

use crate::changes::ChangeLogEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One change as stored on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub id: Uuid,
    pub change_set_id: Uuid,
    pub entry: ChangeLogEntry,
}

/// A named group of changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub changes: Vec<Change>,
    pub created_at: DateTime<Utc>,
}

impl ChangeSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            changes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Wrap a logged entry as a change of this set and add it
    pub fn push_entry(&mut self, entry: ChangeLogEntry) -> &Change {
        self.changes.push(Change {
            id: Uuid::new_v4(),
            change_set_id: self.id,
            entry,
        });
        &self.changes[self.changes.len() - 1]
    }

    pub fn change(&self, id: &Uuid) -> Option<&Change> {
        self.changes.iter().find(|c| c.id == *id)
    }
}
