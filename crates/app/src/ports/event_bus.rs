//! Event bus port — publish/subscribe for domain events.

use std::future::Future;

use homedeck_domain::event::Event;

/// Publishes domain events to interested subscribers.
///
/// Delivery is best-effort: a publisher with nobody listening drops the
/// event, which never fails the operation that produced it.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = ()> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = ()> + Send {
        (**self).publish(event)
    }
}
