// ChangeSetStore - cache of the last fetched change sets

use crate::changesets::service::ChangeSetService;
use crate::changesets::types::{Change, ChangeSet};
use crate::changesets::{ChangeSetError, ChangeSetResult};
use crate::messaging::{Notification, NotificationCategory, NotificationProducer};
use ringbuf::traits::Producer;
use uuid::Uuid;

/// Loading status of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStatus {
    pub loading: bool,
    /// Message of the last failed request, cleared on success
    pub last_error: Option<String>,
}

/// Client-side cache over a change-set service
///
/// Every load sets `loading`, calls the service, stores the result on
/// success or resets the slot on failure, and always clears `loading`.
/// Failures are also raised as notifications when a channel is attached.
pub struct ChangeSetStore<Svc: ChangeSetService> {
    service: Svc,
    change_sets: Vec<ChangeSet>,
    change_set: Option<ChangeSet>,
    change: Option<Change>,
    status: LoadStatus,
    notifications: Option<NotificationProducer>,
}

impl<Svc: ChangeSetService> ChangeSetStore<Svc> {
    pub fn new(service: Svc) -> Self {
        Self {
            service,
            change_sets: Vec::new(),
            change_set: None,
            change: None,
            status: LoadStatus::default(),
            notifications: None,
        }
    }

    /// Report load failures on the given notification channel
    pub fn with_notifications(mut self, notifications: NotificationProducer) -> Self {
        self.notifications = Some(notifications);
        self
    }

    pub fn load_all_change_sets(&mut self) -> ChangeSetResult<()> {
        self.status.loading = true;
        let result = self.service.get_all_change_sets();
        self.status.loading = false;

        match result {
            Ok(change_sets) => {
                log::debug!("loaded {} change sets", change_sets.len());
                self.change_sets = change_sets;
                self.status.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.change_sets.clear();
                Err(self.fail("change sets", e))
            }
        }
    }

    pub fn load_change_set_by_id(&mut self, id: &Uuid) -> ChangeSetResult<()> {
        self.status.loading = true;
        let result = self.service.get_change_set_by_id(id);
        self.status.loading = false;

        match result {
            Ok(change_set) => {
                self.change_set = Some(change_set);
                self.status.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.change_set = None;
                Err(self.fail(&format!("change set {}", id), e))
            }
        }
    }

    pub fn load_change_by_id(&mut self, id: &Uuid) -> ChangeSetResult<()> {
        self.status.loading = true;
        let result = self.service.get_change_by_id(id);
        self.status.loading = false;

        match result {
            Ok(change) => {
                log::debug!("loaded change {} ({})", change.id, change.entry.change_type);
                self.change = Some(change);
                self.status.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.change = None;
                Err(self.fail(&format!("change {}", id), e))
            }
        }
    }

    fn fail(&mut self, what: &str, e: ChangeSetError) -> ChangeSetError {
        let message = format!("Failed to load {}: {}", what, e);
        log::error!("{}", message);
        self.status.last_error = Some(e.to_string());

        if let Some(tx) = self.notifications.as_mut()
            && tx
                .try_push(Notification::error(NotificationCategory::ChangeSets, message))
                .is_err()
        {
            log::warn!("notification channel full, dropping notification");
        }

        e
    }

    pub fn change_sets(&self) -> &[ChangeSet] {
        &self.change_sets
    }

    pub fn change_set(&self) -> Option<&ChangeSet> {
        self.change_set.as_ref()
    }

    pub fn change(&self) -> Option<&Change> {
        self.change.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn service_mut(&mut self) -> &mut Svc {
        &mut self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::{ChangeAction, ChangeLog, LayerId};
    use crate::changesets::ChangeSetError;
    use crate::changesets::service::InMemoryChangeSetService;
    use crate::drawing::Feature;
    use crate::messaging::{NotificationLevel, create_notification_channel};
    use ringbuf::traits::Consumer;

    fn sample_set() -> ChangeSet {
        let mut log = ChangeLog::new();
        log.record(ChangeAction::create(Feature::new("f-1")), Some(LayerId::new("l-1"))).unwrap();

        let mut set = ChangeSet::new("Survey 1902");
        for entry in log.entries() {
            set.push_entry(entry.clone());
        }
        set
    }

    #[test]
    fn test_load_all() {
        let set = sample_set();
        let mut store = ChangeSetStore::new(InMemoryChangeSetService::new(vec![set.clone()]));

        store.load_all_change_sets().unwrap();

        assert_eq!(store.change_sets(), &[set]);
        assert!(!store.status().loading);
        assert_eq!(store.status().last_error, None);
    }

    #[test]
    fn test_load_by_id_and_change() {
        let set = sample_set();
        let change_id = set.changes[0].id;
        let mut store = ChangeSetStore::new(InMemoryChangeSetService::new(vec![set.clone()]));

        store.load_change_set_by_id(&set.id).unwrap();
        store.load_change_by_id(&change_id).unwrap();

        assert_eq!(store.change_set().map(|s| s.id), Some(set.id));
        assert_eq!(store.change().map(|c| c.change_set_id), Some(set.id));
    }

    #[test]
    fn test_failure_resets_slot() {
        let set = sample_set();
        let mut store = ChangeSetStore::new(InMemoryChangeSetService::new(vec![set.clone()]));
        store.load_all_change_sets().unwrap();
        store.load_change_set_by_id(&set.id).unwrap();

        store.service_mut().set_offline(true);

        assert!(store.load_all_change_sets().is_err());
        assert!(store.change_sets().is_empty());

        let missing = Uuid::new_v4();
        store.service_mut().set_offline(false);
        let result = store.load_change_set_by_id(&missing);
        assert!(matches!(result, Err(ChangeSetError::NotFound(_))));
        assert!(store.change_set().is_none());
        assert!(!store.status().loading);
        assert!(store.status().last_error.is_some());
    }

    #[test]
    fn test_failed_load_raises_notification() {
        let (tx, mut rx) = create_notification_channel(4);
        let mut service = InMemoryChangeSetService::new(Vec::new());
        service.set_offline(true);
        let mut store = ChangeSetStore::new(service).with_notifications(tx);

        assert!(store.load_all_change_sets().is_err());

        let notification = rx.try_pop().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert_eq!(notification.category, NotificationCategory::ChangeSets);
        assert!(notification.message.starts_with("Failed to load change sets"));
        assert!(rx.try_pop().is_none());
    }

    #[test]
    fn test_successful_load_is_silent() {
        let (tx, mut rx) = create_notification_channel(4);
        let mut store =
            ChangeSetStore::new(InMemoryChangeSetService::new(vec![sample_set()])).with_notifications(tx);

        store.load_all_change_sets().unwrap();
        assert!(rx.try_pop().is_none());
    }
}
