// ChangeSetService - read access to server-side change sets

use crate::changesets::types::{Change, ChangeSet};
use crate::changesets::{ChangeSetError, ChangeSetResult};
use uuid::Uuid;

/// Remote change-set service
pub trait ChangeSetService {
    fn get_all_change_sets(&self) -> ChangeSetResult<Vec<ChangeSet>>;

    fn get_change_set_by_id(&self, id: &Uuid) -> ChangeSetResult<ChangeSet>;

    fn get_change_by_id(&self, id: &Uuid) -> ChangeSetResult<Change>;
}

/// Service backed by a vector, for tests and offline use
#[derive(Debug, Default, Clone)]
pub struct InMemoryChangeSetService {
    change_sets: Vec<ChangeSet>,
    offline: bool,
}

impl InMemoryChangeSetService {
    pub fn new(change_sets: Vec<ChangeSet>) -> Self {
        Self {
            change_sets,
            offline: false,
        }
    }

    /// Make every call fail with a service error
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn check_online(&self) -> ChangeSetResult<()> {
        if self.offline {
            Err(ChangeSetError::Service("service unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ChangeSetService for InMemoryChangeSetService {
    fn get_all_change_sets(&self) -> ChangeSetResult<Vec<ChangeSet>> {
        self.check_online()?;
        Ok(self.change_sets.clone())
    }

    fn get_change_set_by_id(&self, id: &Uuid) -> ChangeSetResult<ChangeSet> {
        self.check_online()?;
        self.change_sets
            .iter()
            .find(|set| set.id == *id)
            .cloned()
            .ok_or_else(|| ChangeSetError::NotFound(format!("change set {}", id)))
    }

    fn get_change_by_id(&self, id: &Uuid) -> ChangeSetResult<Change> {
        self.check_online()?;
        self.change_sets
            .iter()
            .find_map(|set| set.change(id))
            .cloned()
            .ok_or_else(|| ChangeSetError::NotFound(format!("change {}", id)))
    }
}
