//! Entity references and the structured result of a state transition.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::location::{
    AcLocation, BlindLocation, COFFEE_MACHINE_LOCATION, DeviceKind, DoorLocation, LightLocation,
    Location, TvLocation,
};
use crate::value::AttributeValue;

/// A single device in the house.
///
/// Renders as `<prefix>.<location>`, e.g. `light.kitchen` or `tv.living_room`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Light(LightLocation),
    AcUnit(AcLocation),
    Tv(TvLocation),
    Door(DoorLocation),
    Blind(BlindLocation),
    CoffeeMachine,
}

impl EntityRef {
    #[must_use]
    pub fn kind(self) -> DeviceKind {
        match self {
            Self::Light(_) => DeviceKind::Light,
            Self::AcUnit(_) => DeviceKind::AcUnit,
            Self::Tv(_) => DeviceKind::Tv,
            Self::Door(_) => DeviceKind::Door,
            Self::Blind(_) => DeviceKind::Blind,
            Self::CoffeeMachine => DeviceKind::CoffeeMachine,
        }
    }

    #[must_use]
    pub fn location(self) -> &'static str {
        match self {
            Self::Light(l) => l.as_str(),
            Self::AcUnit(l) => l.as_str(),
            Self::Tv(l) => l.as_str(),
            Self::Door(l) => l.as_str(),
            Self::Blind(l) => l.as_str(),
            Self::CoffeeMachine => COFFEE_MACHINE_LOCATION,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind().prefix(), self.location())
    }
}

impl Serialize for EntityRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which attribute of an entity changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Power,
    Temperature,
    Channel,
    Volume,
    Lock,
    Position,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Power => "power",
            Self::Temperature => "temperature",
            Self::Channel => "channel",
            Self::Volume => "volume",
            Self::Lock => "lock",
            Self::Position => "position",
        })
    }
}

/// One attribute moving from an old value to a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub entity: EntityRef,
    pub attribute: Attribute,
    pub from: AttributeValue,
    pub to: AttributeValue,
}

impl Change {
    /// Record a change, or `None` when `from == to`.
    pub fn between(
        entity: EntityRef,
        attribute: Attribute,
        from: impl Into<AttributeValue>,
        to: impl Into<AttributeValue>,
    ) -> Option<Self> {
        let (from, to) = (from.into(), to.into());
        (from != to).then_some(Self {
            entity,
            attribute,
            from,
            to,
        })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} -> {}",
            self.entity, self.attribute, self.from, self.to
        )
    }
}

/// Result of applying an operation: a message for humans and the list of
/// changes for programs.
///
/// An empty change list means the requested state already held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub message: String,
    pub changes: Vec<Change>,
}

impl Outcome {
    #[must_use]
    pub fn new(message: impl Into<String>, changes: Vec<Change>) -> Self {
        Self {
            message: message.into(),
            changes,
        }
    }

    /// Whether nothing had to change.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Power;

    #[test]
    fn should_render_entity_ref_with_prefix_and_location() {
        assert_eq!(EntityRef::Light(LightLocation::Room1).to_string(), "light.room1");
        assert_eq!(EntityRef::AcUnit(AcLocation::Kitchen).to_string(), "ac.kitchen");
        assert_eq!(EntityRef::Tv(TvLocation::LivingRoom).to_string(), "tv.living_room");
        assert_eq!(EntityRef::CoffeeMachine.to_string(), "coffee_machine.kitchen");
    }

    #[test]
    fn should_skip_change_when_values_are_equal() {
        let change = Change::between(
            EntityRef::Light(LightLocation::Kitchen),
            Attribute::Power,
            Power::On,
            Power::On,
        );
        assert!(change.is_none());
    }

    #[test]
    fn should_serialize_change_with_entity_string() {
        let change = Change::between(
            EntityRef::Door(DoorLocation::Front),
            Attribute::Lock,
            crate::value::LockState::Locked,
            crate::value::LockState::Unlocked,
        )
        .unwrap();
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "entity": "door.front",
                "attribute": "lock",
                "from": "locked",
                "to": "unlocked",
            })
        );
        assert_eq!(change.to_string(), "door.front lock: locked -> unlocked");
    }

    #[test]
    fn should_report_noop_when_no_changes() {
        let outcome = Outcome::new("The kitchen light is already on.", vec![]);
        assert!(outcome.is_noop());
    }
}
