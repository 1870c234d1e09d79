//! Event — an immutable record of something that happened to the house.
//!
//! One [`StateChanged`](EventPayload::StateChanged) event is emitted per
//! attribute change; scenes additionally emit
//! [`SceneActivated`](EventPayload::SceneActivated). Events from the same
//! dispatched call share a [`CallId`].

use serde::Serialize;

use crate::entity::Change;
use crate::id::{CallId, EventId};
use crate::scene::Scene;
use crate::time::{Timestamp, now};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    StateChanged(Change),
    SceneActivated { scene: Scene },
}

/// A timestamped, identified [`EventPayload`].
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: EventId,
    pub call_id: CallId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl Event {
    /// Create an event stamped with the current time and a fresh id.
    #[must_use]
    pub fn new(call_id: CallId, payload: EventPayload) -> Self {
        Self {
            id: EventId::new(),
            call_id,
            timestamp: now(),
            payload,
        }
    }

    #[must_use]
    pub fn state_changed(call_id: CallId, change: Change) -> Self {
        Self::new(call_id, EventPayload::StateChanged(change))
    }

    #[must_use]
    pub fn scene_activated(call_id: CallId, scene: Scene) -> Self {
        Self::new(call_id, EventPayload::SceneActivated { scene })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Attribute, EntityRef};
    use crate::location::LightLocation;
    use crate::value::Power;

    #[test]
    fn should_flatten_state_change_into_event_json() {
        let change = Change::between(
            EntityRef::Light(LightLocation::Kitchen),
            Attribute::Power,
            Power::Off,
            Power::On,
        )
        .unwrap();
        let event = Event::state_changed(CallId::new(), change);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "state_changed");
        assert_eq!(json["entity"], "light.kitchen");
        assert_eq!(json["attribute"], "power");
        assert_eq!(json["from"], "off");
        assert_eq!(json["to"], "on");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn should_serialize_scene_activation() {
        let call_id = CallId::new();
        let event = Event::scene_activated(call_id, Scene::SleepMode);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "scene_activated");
        assert_eq!(json["scene"], "sleep_mode");
        assert_eq!(json["call_id"], call_id.to_string());
    }
}
