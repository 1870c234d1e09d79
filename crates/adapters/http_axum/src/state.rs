//! Shared application state for axum handlers.

use std::sync::Arc;

use homedeck_app::event_bus::InProcessEventBus;
use homedeck_app::ports::EventPublisher;
use homedeck_app::services::Dispatcher;
use homedeck_app::store::DeviceStore;

/// Application state shared across all axum handlers.
///
/// Generic over the event publisher the dispatcher reports to, to avoid
/// dynamic dispatch. `Clone` is implemented manually so the publisher itself
/// does not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<EP> {
    /// Tool-call entry point, owning the device store.
    pub dispatcher: Arc<Dispatcher<EP>>,
    /// Event bus the SSE endpoint subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<EP> Clone for AppState<EP> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<EP> AppState<EP>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from a dispatcher and the bus its
    /// events are published on.
    pub fn new(dispatcher: Dispatcher<EP>, event_bus: Arc<InProcessEventBus>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            event_bus,
        }
    }

    /// The device store behind the dispatcher.
    #[must_use]
    pub fn store(&self) -> &DeviceStore {
        self.dispatcher.store()
    }
}
