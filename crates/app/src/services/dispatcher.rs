//! Command dispatcher — turns tool calls into store operations and events.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use homedeck_domain::entity::{Change, Outcome};
use homedeck_domain::error::HomeError;
use homedeck_domain::event::Event;
use homedeck_domain::id::CallId;
use homedeck_domain::status::{StatusCategory, StatusReport};
use homedeck_domain::time::local_clock_reading;
use homedeck_domain::value::Power;

use crate::catalog::Operation;
use crate::command::{Command, ToolCall};
use crate::ports::EventPublisher;
use crate::store::DeviceStore;

/// Answer to one tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// Wire name of the operation, as received.
    pub operation: String,
    /// `false` when the call was refused.
    pub ok: bool,
    pub message: String,
    pub changes: Vec<Change>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusReport>,
}

impl Reply {
    fn from_outcome(operation: Operation, outcome: Outcome) -> Self {
        Self {
            operation: operation.name().to_string(),
            ok: true,
            message: outcome.message,
            changes: outcome.changes,
            status: None,
        }
    }

    fn from_status(operation: Operation, report: StatusReport) -> Self {
        Self {
            operation: operation.name().to_string(),
            ok: true,
            message: report.render(),
            changes: Vec::new(),
            status: Some(report),
        }
    }

    fn refused(operation: &str, err: &HomeError) -> Self {
        Self {
            operation: operation.to_string(),
            ok: false,
            message: refusal(err),
            changes: Vec::new(),
            status: None,
        }
    }
}

/// Polite, user-facing wording of `err`.
#[must_use]
pub fn refusal(err: &HomeError) -> String {
    match err {
        HomeError::UnknownLocation(err) => format!(
            "Sorry, '{}' is not a valid {} location. Valid locations are: {}.",
            err.location,
            err.device,
            err.device.valid_locations().join(", ")
        ),
        HomeError::UnknownCategory(err) => format!(
            "Sorry, I don't know the device type '{}'. Valid types are: {}.",
            err.category,
            StatusCategory::NAMES.join(", ")
        ),
        HomeError::UnknownOperation(err) => {
            format!("Sorry, I can't do '{}' in this house.", err.name)
        }
        HomeError::InvalidArgument(err) => format!("Sorry, I couldn't do that: {err}."),
    }
}

/// Entry point for tool calls.
///
/// Parsing and validation happen before the store is touched, so a
/// rejected call never changes anything and publishes nothing.
///
/// Mutating calls are serialized through `publish_order` from the store
/// write until their last event is out, so the bus carries changes in the
/// order the store applied them.
pub struct Dispatcher<P> {
    store: Arc<DeviceStore>,
    publisher: P,
    publish_order: Mutex<()>,
}

impl<P: EventPublisher> Dispatcher<P> {
    /// Create a dispatcher driving `store` and reporting to `publisher`.
    pub fn new(store: Arc<DeviceStore>, publisher: P) -> Self {
        Self {
            store,
            publisher,
            publish_order: Mutex::new(()),
        }
    }

    /// The store this dispatcher drives.
    #[must_use]
    pub fn store(&self) -> &DeviceStore {
        &self.store
    }

    /// Parse, validate and run one tool call.
    ///
    /// Publishes one `state_changed` event per change, plus a
    /// `scene_activated` event for scenes. All events of one call share a
    /// [`CallId`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownOperation`] for a name outside the
    /// catalog, or any error produced while parsing the arguments.
    #[tracing::instrument(skip(self, call), fields(operation = %call.name))]
    pub async fn dispatch(&self, call: &ToolCall) -> Result<Reply, HomeError> {
        let operation: Operation = call.name.parse()?;
        let command = Command::parse(operation, &call.arguments)?;
        Ok(self.run(operation, command).await)
    }

    /// Like [`dispatch`](Self::dispatch), but renders errors into a polite
    /// refusal so the caller always gets a [`Reply`].
    pub async fn respond(&self, call: &ToolCall) -> Reply {
        match self.dispatch(call).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(operation = %call.name, error = %err, "call refused");
                Reply::refused(&call.name, &err)
            }
        }
    }

    /// Run an already-parsed command and publish its events.
    ///
    /// Read-only operations bypass the publish ordering and emit nothing.
    pub async fn run(&self, operation: Operation, command: Command) -> Reply {
        if !operation.is_mutation() {
            return self.execute(operation, command);
        }

        let _order = self.publish_order.lock().await;
        let reply = self.execute(operation, command);

        let call_id = CallId::new();
        for change in &reply.changes {
            self.publisher
                .publish(Event::state_changed(call_id, change.clone()))
                .await;
        }
        if let Command::Scene(scene) = command {
            self.publisher
                .publish(Event::scene_activated(call_id, scene))
                .await;
        }

        reply
    }

    /// Run an already-parsed command against the store, without publishing.
    pub fn execute(&self, operation: Operation, command: Command) -> Reply {
        match command {
            Command::Device(primitive) => {
                Reply::from_outcome(operation, self.store.apply(primitive))
            }
            Command::AllLights(Power::On) => {
                Reply::from_outcome(operation, self.store.turn_on_all_lights())
            }
            Command::AllLights(Power::Off) => {
                Reply::from_outcome(operation, self.store.turn_off_all_lights())
            }
            Command::Scene(scene) => {
                Reply::from_outcome(operation, self.store.activate_scene(scene))
            }
            Command::Status(category) => {
                Reply::from_status(operation, self.store.status_of(category))
            }
            Command::CurrentDatetime => {
                Reply::from_outcome(operation, Outcome::new(local_clock_reading(), Vec::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use homedeck_domain::event::EventPayload;
    use homedeck_domain::location::{AcLocation, LightLocation};
    use homedeck_domain::scene::Scene;
    use homedeck_domain::value::AttributeValue;

    // ── Spy publisher ──────────────────────────────────────────────

    #[derive(Default)]
    struct SpyPublisher {
        events: Mutex<Vec<Event>>,
    }

    impl SpyPublisher {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventPublisher for SpyPublisher {
        fn publish(&self, event: Event) -> impl Future<Output = ()> + Send {
            self.events.lock().unwrap().push(event);
            async {}
        }
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn dispatcher() -> (Dispatcher<Arc<SpyPublisher>>, Arc<SpyPublisher>) {
        let spy = Arc::new(SpyPublisher::default());
        let dispatcher = Dispatcher::new(Arc::new(DeviceStore::new()), Arc::clone(&spy));
        (dispatcher, spy)
    }

    fn call(name: &str, arguments: serde_json::Value) -> ToolCall {
        ToolCall::new(name, arguments)
    }

    // ── Dispatch ───────────────────────────────────────────────────

    #[tokio::test]
    async fn should_apply_toggle_light_and_publish_one_change() {
        let (dispatcher, spy) = dispatcher();

        let reply = dispatcher
            .dispatch(&call(
                "toggle_light",
                json!({"location": "kitchen", "state": "on"}),
            ))
            .await
            .unwrap();

        assert!(reply.ok);
        assert_eq!(reply.operation, "toggle_light");
        assert_eq!(reply.message, "Successfully turned the kitchen light on.");
        assert_eq!(reply.changes.len(), 1);
        assert_eq!(
            dispatcher.store().snapshot().lamps[LightLocation::Kitchen],
            Power::On
        );

        let events = spy.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].payload, EventPayload::StateChanged(_)));
    }

    #[tokio::test]
    async fn should_publish_nothing_when_state_already_holds() {
        let (dispatcher, spy) = dispatcher();

        let reply = dispatcher
            .dispatch(&call("lock_door", json!({"location": "front"})))
            .await
            .unwrap();

        assert!(reply.changes.is_empty());
        assert_eq!(reply.message, "The front door is already locked.");
        assert!(spy.events().is_empty());
    }

    #[tokio::test]
    async fn should_share_call_id_across_scene_events() {
        let (dispatcher, spy) = dispatcher();

        let reply = dispatcher
            .dispatch(&call("activate_guest_mode", json!({"confirm": true})))
            .await
            .unwrap();

        let events = spy.events();
        assert_eq!(events.len(), reply.changes.len() + 1);
        assert!(events.iter().all(|e| e.call_id == events[0].call_id));
        assert!(matches!(
            events.last().unwrap().payload,
            EventPayload::SceneActivated {
                scene: Scene::GuestMode
            }
        ));
    }

    #[tokio::test]
    async fn should_use_fresh_call_id_per_dispatch() {
        let (dispatcher, spy) = dispatcher();

        dispatcher
            .dispatch(&call("start_coffee_machine", json!({})))
            .await
            .unwrap();
        dispatcher
            .dispatch(&call("stop_coffee_machine", json!({})))
            .await
            .unwrap();

        let events = spy.events();
        assert_eq!(events.len(), 2);
        assert_ne!(events[0].call_id, events[1].call_id);
    }

    #[tokio::test]
    async fn should_report_turning_ac_on_when_temperature_set() {
        let (dispatcher, _spy) = dispatcher();

        let reply = dispatcher
            .dispatch(&call(
                "set_ac_temperature",
                json!({"location": "room 1", "temperature": 19}),
            ))
            .await
            .unwrap();

        assert_eq!(
            reply.message,
            "Successfully set the AC in room1 to 19°C and turned it on."
        );
        let ac = dispatcher.store().snapshot().ac_units[AcLocation::Room1];
        assert_eq!(ac.power, Power::On);
        assert_eq!(ac.temperature.value(), 19);
    }

    #[tokio::test]
    async fn should_return_status_report_without_changes() {
        let (dispatcher, spy) = dispatcher();

        let reply = dispatcher
            .dispatch(&call("get_device_status", json!({"device_type": "tv"})))
            .await
            .unwrap();

        assert!(reply.message.starts_with("Status for tv: "));
        assert_eq!(
            reply.status.as_ref().map(StatusReport::category),
            Some(StatusCategory::Tv)
        );
        assert!(spy.events().is_empty());
    }

    #[tokio::test]
    async fn should_read_the_clock_without_touching_state() {
        let (dispatcher, spy) = dispatcher();
        let before = dispatcher.store().snapshot();

        let reply = dispatcher
            .dispatch(&call("get_current_datetime", serde_json::Value::Null))
            .await
            .unwrap();

        assert!(reply.message.starts_with("The current date and time is "));
        assert_eq!(dispatcher.store().snapshot(), before);
        assert!(spy.events().is_empty());
    }

    #[tokio::test]
    async fn should_fail_without_side_effects_when_location_is_unknown() {
        let (dispatcher, spy) = dispatcher();
        let before = dispatcher.store().snapshot();

        let err = dispatcher
            .dispatch(&call(
                "toggle_light",
                json!({"location": "garage", "state": "on"}),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, HomeError::UnknownLocation(_)));
        assert_eq!(dispatcher.store().snapshot(), before);
        assert!(spy.events().is_empty());
    }

    #[test]
    fn should_publish_changes_in_store_order_when_calls_race() {
        let spy = Arc::new(SpyPublisher::default());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(DeviceStore::new()),
            Arc::clone(&spy),
        ));
        let mut workers = Vec::new();

        for worker in 0..4 {
            let dispatcher = Arc::clone(&dispatcher);
            workers.push(std::thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                runtime.block_on(async {
                    for round in 0..500 {
                        let state = if (worker + round) % 2 == 0 { "on" } else { "off" };
                        dispatcher
                            .dispatch(&call(
                                "toggle_light",
                                json!({"location": "kitchen", "state": state}),
                            ))
                            .await
                            .unwrap();
                    }
                });
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        let changes: Vec<Change> = spy
            .events()
            .into_iter()
            .filter_map(|event| match event.payload {
                EventPayload::StateChanged(change) => Some(change),
                EventPayload::SceneActivated { .. } => None,
            })
            .collect();
        assert!(!changes.is_empty());
        for pair in changes.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        let kitchen = dispatcher.store().snapshot().lamps[LightLocation::Kitchen];
        assert_eq!(changes.last().unwrap().to, AttributeValue::from(kitchen));
    }

    #[test]
    fn should_keep_scene_events_contiguous_when_scenes_race() {
        let spy = Arc::new(SpyPublisher::default());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(DeviceStore::new()),
            Arc::clone(&spy),
        ));
        let mut workers = Vec::new();

        for worker in 0..4 {
            let dispatcher = Arc::clone(&dispatcher);
            workers.push(std::thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                runtime.block_on(async {
                    for round in 0..100 {
                        let name = if (worker + round) % 2 == 0 {
                            "activate_guest_mode"
                        } else {
                            "activate_sleep_mode"
                        };
                        dispatcher.dispatch(&call(name, json!({}))).await.unwrap();
                    }
                });
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        let events = spy.events();
        let mut finished = Vec::new();
        let mut current = None;
        for event in &events {
            if current != Some(event.call_id) {
                assert!(!finished.contains(&event.call_id));
                if let Some(previous) = current {
                    finished.push(previous);
                }
                current = Some(event.call_id);
            }
        }
    }

    // ── Respond ────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_refuse_politely_and_list_valid_locations() {
        let (dispatcher, _spy) = dispatcher();

        let reply = dispatcher
            .respond(&call("open_blinds", json!({"location": "bathroom"})))
            .await;

        assert!(!reply.ok);
        assert_eq!(reply.operation, "open_blinds");
        assert_eq!(
            reply.message,
            "Sorry, 'bathroom' is not a valid blinds location. Valid locations are: kitchen, room1."
        );
        assert!(reply.changes.is_empty());
    }

    #[tokio::test]
    async fn should_refuse_unknown_operation() {
        let (dispatcher, _spy) = dispatcher();

        let reply = dispatcher
            .respond(&call("get_latest_news", json!({"country": "us"})))
            .await;

        assert!(!reply.ok);
        assert_eq!(
            reply.message,
            "Sorry, I can't do 'get_latest_news' in this house."
        );
    }

    #[tokio::test]
    async fn should_refuse_out_of_range_volume() {
        let (dispatcher, _spy) = dispatcher();

        let reply = dispatcher
            .respond(&call(
                "set_tv_volume",
                json!({"location": "living_room", "volume": 150}),
            ))
            .await;

        assert!(!reply.ok);
        assert_eq!(
            reply.message,
            "Sorry, I couldn't do that: volume 150 must be between 0 and 100."
        );
    }

    #[tokio::test]
    async fn should_refuse_unknown_status_category_listing_valid_types() {
        let (dispatcher, _spy) = dispatcher();

        let reply = dispatcher
            .respond(&call(
                "get_device_status",
                json!({"device_type": "security_system"}),
            ))
            .await;

        assert!(!reply.ok);
        assert!(reply.message.contains("'security_system'"));
        assert!(reply.message.contains("coffee_machine"));
    }

    #[tokio::test]
    async fn should_serialize_reply_without_status_for_mutations() {
        let (dispatcher, _spy) = dispatcher();

        let reply = dispatcher
            .respond(&call("turn_on_all_lights", json!({})))
            .await;
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["operation"], "turn_on_all_lights");
        assert_eq!(json["ok"], true);
        assert_eq!(json["message"], "All lights have been turned on.");
        assert_eq!(json["changes"].as_array().unwrap().len(), 4);
        assert!(json.get("status").is_none());
    }
}
