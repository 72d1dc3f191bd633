// User-facing notifications, delivered over a bounded lock-free channel

pub mod channels;
pub mod notification;

pub use channels::{NotificationConsumer, NotificationProducer, create_notification_channel};
pub use notification::{Notification, NotificationCategory, NotificationLevel};
