// Notification channel between the editor core and whatever displays toasts

use crate::messaging::notification::Notification;
use ringbuf::{HeapRb, traits::Split};

pub type NotificationProducer = ringbuf::HeapProd<Notification>;
pub type NotificationConsumer = ringbuf::HeapCons<Notification>;

pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    let rb = HeapRb::<Notification>::new(capacity);
    rb.split()
}
