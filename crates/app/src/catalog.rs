//! Operation catalog — the named operations a tool-calling front end may invoke.
//!
//! Each [`Operation`] carries a static descriptor: its wire name, a
//! description, and the parameters it accepts. [`tool_definitions`] renders
//! the whole catalog as JSON tool definitions.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value, json};

use homedeck_domain::error::UnknownOperationError;
use homedeck_domain::location::{
    AcLocation, BlindLocation, DoorLocation, LightLocation, Location, TvLocation,
};
use homedeck_domain::status::StatusCategory;
use homedeck_domain::value::{Power, Temperature};

macro_rules! define_operations {
    ($($variant:ident => $wire:literal),+ $(,)?) => {
        /// Every operation of the catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $($variant),+
        }

        impl Operation {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name, as sent by the front end.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl FromStr for Operation {
            type Err = UnknownOperationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownOperationError {
                        name: other.to_string(),
                    }),
                }
            }
        }
    };
}

define_operations! {
    ToggleLight => "toggle_light",
    TurnOnAc => "turn_on_ac",
    TurnOffAc => "turn_off_ac",
    SetAcPower => "set_ac_power",
    SetAcTemperature => "set_ac_temperature",
    TurnOnTv => "turn_on_tv",
    TurnOffTv => "turn_off_tv",
    ChangeTvChannel => "change_tv_channel",
    SetTvVolume => "set_tv_volume",
    LockDoor => "lock_door",
    UnlockDoor => "unlock_door",
    OpenBlinds => "open_blinds",
    CloseBlinds => "close_blinds",
    StartCoffeeMachine => "start_coffee_machine",
    StopCoffeeMachine => "stop_coffee_machine",
    GetDeviceStatus => "get_device_status",
    TurnOffAllLights => "turn_off_all_lights",
    TurnOnAllLights => "turn_on_all_lights",
    ActivateGuestMode => "activate_guest_mode",
    ActivateSleepMode => "activate_sleep_mode",
    GetCurrentDatetime => "get_current_datetime",
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted values of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDomain {
    /// One of a fixed set of strings.
    OneOf(&'static [&'static str]),
    /// An integer, optionally bounded on either side.
    Integer { min: Option<i64>, max: Option<i64> },
}

/// Descriptor of one operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub domain: ParamDomain,
}

impl ParamSpec {
    const fn location(description: &'static str, names: &'static [&'static str]) -> Self {
        Self {
            name: "location",
            description,
            required: true,
            domain: ParamDomain::OneOf(names),
        }
    }

    fn schema(&self) -> Value {
        match self.domain {
            ParamDomain::OneOf(values) => json!({
                "type": "string",
                "description": self.description,
                "enum": values,
            }),
            ParamDomain::Integer { min, max } => {
                let mut schema = json!({
                    "type": "integer",
                    "description": self.description,
                });
                if let Some(min) = min {
                    schema["minimum"] = json!(min);
                }
                if let Some(max) = max {
                    schema["maximum"] = json!(max);
                }
                schema
            }
        }
    }
}

const LIGHT_LOCATION: ParamSpec =
    ParamSpec::location("Room where the light is.", LightLocation::NAMES);
const AC_LOCATION: ParamSpec = ParamSpec::location("Room where the AC unit is.", AcLocation::NAMES);
const TV_LOCATION: ParamSpec = ParamSpec::location("Room where the TV is.", TvLocation::NAMES);
const DOOR_LOCATION: ParamSpec = ParamSpec::location("Which door.", DoorLocation::NAMES);
const BLIND_LOCATION: ParamSpec =
    ParamSpec::location("Room where the blinds are.", BlindLocation::NAMES);

const POWER_STATE: ParamSpec = ParamSpec {
    name: "state",
    description: "Whether to turn the device on or off.",
    required: true,
    domain: ParamDomain::OneOf(Power::CHOICES),
};

const TEMPERATURE: ParamSpec = ParamSpec {
    name: "temperature",
    description: "Target temperature in degrees Celsius.",
    required: true,
    domain: ParamDomain::Integer {
        min: Some(Temperature::MIN),
        max: Some(Temperature::MAX),
    },
};

const CHANNEL: ParamSpec = ParamSpec {
    name: "channel",
    description: "Channel number to switch to.",
    required: true,
    domain: ParamDomain::Integer {
        min: Some(1),
        max: None,
    },
};

const VOLUME: ParamSpec = ParamSpec {
    name: "volume",
    description: "Volume level.",
    required: true,
    domain: ParamDomain::Integer {
        min: Some(0),
        max: Some(100),
    },
};

const DEVICE_TYPE: ParamSpec = ParamSpec {
    name: "device_type",
    description: "Which kind of device to report on. Defaults to all.",
    required: false,
    domain: ParamDomain::OneOf(StatusCategory::NAMES),
};

impl Operation {
    /// Human-readable purpose, written for a language model choosing a tool.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ToggleLight => {
                "Turns a light on or off in a specific location. Use this to control lamps."
            }
            Self::TurnOnAc => "Turns on an AC unit in a specific location.",
            Self::TurnOffAc => "Turns off an AC unit in a specific location.",
            Self::SetAcPower => "Turns an AC unit on or off in a specific location.",
            Self::SetAcTemperature => {
                "Sets the temperature for an AC unit in a specific location. Turns the unit on if it is off."
            }
            Self::TurnOnTv => "Turns on the TV. The only valid location is 'living_room'.",
            Self::TurnOffTv => "Turns off the TV. The only valid location is 'living_room'.",
            Self::ChangeTvChannel => {
                "Changes the TV channel. Turns the TV on if it is off. The only valid location is 'living_room'."
            }
            Self::SetTvVolume => {
                "Sets the TV volume between 0 and 100. The only valid location is 'living_room'."
            }
            Self::LockDoor => "Locks the door in the specified location.",
            Self::UnlockDoor => "Unlocks the door in the specified location.",
            Self::OpenBlinds => "Opens the blinds in the specified location.",
            Self::CloseBlinds => "Closes the blinds in the specified location.",
            Self::StartCoffeeMachine => "Starts the coffee machine in the kitchen.",
            Self::StopCoffeeMachine => "Stops the coffee machine in the kitchen.",
            Self::GetDeviceStatus => {
                "Gets the current status of all devices or of a specific type of device."
            }
            Self::TurnOffAllLights => "Turns off all lights in the house.",
            Self::TurnOnAllLights => "Turns on all lights in the house.",
            Self::ActivateGuestMode => {
                "Puts the home into guest mode: turns on the room 1 light and AC, opens all blinds, and unlocks the front door."
            }
            Self::ActivateSleepMode => {
                "Puts the home into sleep mode: turns off all lights and AC units, closes all blinds, and locks all doors."
            }
            Self::GetCurrentDatetime => "Returns the current date and time.",
        }
    }

    /// Parameters accepted by this operation, in declaration order.
    #[must_use]
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            Self::ToggleLight => &[LIGHT_LOCATION, POWER_STATE],
            Self::TurnOnAc | Self::TurnOffAc => &[AC_LOCATION],
            Self::SetAcPower => &[AC_LOCATION, POWER_STATE],
            Self::SetAcTemperature => &[AC_LOCATION, TEMPERATURE],
            Self::TurnOnTv | Self::TurnOffTv => &[TV_LOCATION],
            Self::ChangeTvChannel => &[TV_LOCATION, CHANNEL],
            Self::SetTvVolume => &[TV_LOCATION, VOLUME],
            Self::LockDoor | Self::UnlockDoor => &[DOOR_LOCATION],
            Self::OpenBlinds | Self::CloseBlinds => &[BLIND_LOCATION],
            Self::GetDeviceStatus => &[DEVICE_TYPE],
            Self::StartCoffeeMachine
            | Self::StopCoffeeMachine
            | Self::TurnOffAllLights
            | Self::TurnOnAllLights
            | Self::ActivateGuestMode
            | Self::ActivateSleepMode
            | Self::GetCurrentDatetime => &[],
        }
    }

    /// Whether running this operation may change device state.
    #[must_use]
    pub fn is_mutation(self) -> bool {
        !matches!(self, Self::GetDeviceStatus | Self::GetCurrentDatetime)
    }

    /// JSON tool definition: `name`, `description` and a JSON-schema
    /// `parameters` object.
    #[must_use]
    pub fn tool_definition(self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.params() {
            properties.insert(param.name.to_string(), param.schema());
            if param.required {
                required.push(param.name);
            }
        }

        json!({
            "name": self.name(),
            "description": self.description(),
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        })
    }
}

/// The whole catalog as tool definitions, in catalog order.
#[must_use]
pub fn tool_definitions() -> Vec<Value> {
    Operation::ALL
        .iter()
        .map(|operation| operation.tool_definition())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn should_resolve_every_wire_name_to_its_operation() {
        for operation in Operation::ALL {
            assert_eq!(operation.name().parse::<Operation>().unwrap(), *operation);
        }
    }

    #[test]
    fn should_use_unique_wire_names() {
        let names: HashSet<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn should_reject_unknown_wire_name() {
        let err = "get_weather".parse::<Operation>().unwrap_err();
        assert_eq!(err.name, "get_weather");
    }

    #[test]
    fn should_describe_toggle_light_with_location_enum_and_state() {
        let definition = Operation::ToggleLight.tool_definition();

        assert_eq!(definition["name"], "toggle_light");
        assert_eq!(definition["parameters"]["type"], "object");
        assert_eq!(
            definition["parameters"]["properties"]["location"]["enum"],
            json!(["kitchen", "bathroom", "room1", "room2"])
        );
        assert_eq!(
            definition["parameters"]["properties"]["state"]["enum"],
            json!(["on", "off"])
        );
        assert_eq!(
            definition["parameters"]["required"],
            json!(["location", "state"])
        );
    }

    #[test]
    fn should_bound_temperature_parameter() {
        let definition = Operation::SetAcTemperature.tool_definition();
        let temperature = &definition["parameters"]["properties"]["temperature"];
        assert_eq!(temperature["type"], "integer");
        assert_eq!(temperature["minimum"], 10);
        assert_eq!(temperature["maximum"], 35);
    }

    #[test]
    fn should_leave_channel_without_maximum() {
        let definition = Operation::ChangeTvChannel.tool_definition();
        let channel = &definition["parameters"]["properties"]["channel"];
        assert_eq!(channel["minimum"], 1);
        assert!(channel.get("maximum").is_none());
    }

    #[test]
    fn should_mark_device_type_optional_when_describing_status() {
        let definition = Operation::GetDeviceStatus.tool_definition();
        assert_eq!(definition["parameters"]["required"], json!([]));
        assert!(
            definition["parameters"]["properties"]["device_type"]["enum"]
                .as_array()
                .unwrap()
                .contains(&json!("all"))
        );
    }

    #[test]
    fn should_render_empty_object_schema_when_operation_takes_no_arguments() {
        let definition = Operation::ActivateSleepMode.tool_definition();
        assert_eq!(definition["parameters"]["properties"], json!({}));
    }

    #[test]
    fn should_render_one_definition_per_operation() {
        assert_eq!(tool_definitions().len(), Operation::ALL.len());
    }

    #[test]
    fn should_classify_reads_as_non_mutating() {
        assert!(!Operation::GetDeviceStatus.is_mutation());
        assert!(!Operation::GetCurrentDatetime.is_mutation());
        assert!(Operation::ActivateGuestMode.is_mutation());
    }
}
