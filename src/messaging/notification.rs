// Notifications shown to the user (undo feedback, rejected changes, load failures)

use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Which part of the editor raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Changes,
    ChangeSets,
}

/// A toast-style message for the user
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub category: NotificationCategory,
    pub message: String,
    /// Unix time in milliseconds
    pub timestamp: i64,
}

impl Notification {
    pub fn new(level: NotificationLevel, category: NotificationCategory, message: String) -> Self {
        Self {
            level,
            category,
            message,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn info(category: NotificationCategory, message: String) -> Self {
        Self::new(NotificationLevel::Info, category, message)
    }

    pub fn error(category: NotificationCategory, message: String) -> Self {
        Self::new(NotificationLevel::Error, category, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::channels::create_notification_channel;
    use ringbuf::traits::{Consumer, Producer};

    #[test]
    fn test_notification_helpers() {
        let info = Notification::info(NotificationCategory::Changes, "Undid draw.update".to_string());
        let error = Notification::error(NotificationCategory::ChangeSets, "Load failed".to_string());

        assert_eq!(info.level, NotificationLevel::Info);
        assert_eq!(error.level, NotificationLevel::Error);
        assert_eq!(error.category, NotificationCategory::ChangeSets);
        assert!(info.timestamp > 0);
    }

    #[test]
    fn test_channel_drops_when_full() {
        let (mut tx, mut rx) = create_notification_channel(1);

        assert!(tx.try_push(Notification::info(NotificationCategory::Changes, "a".into())).is_ok());
        assert!(tx.try_push(Notification::info(NotificationCategory::Changes, "b".into())).is_err());

        assert_eq!(rx.try_pop().map(|n| n.message), Some("a".to_string()));
        assert!(rx.try_pop().is_none());
    }
}
