//! Tool calls and the typed commands they parse into.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use homedeck_domain::command::Primitive;
use homedeck_domain::error::{HomeError, InvalidArgumentError};
use homedeck_domain::location::Location;
use homedeck_domain::scene::Scene;
use homedeck_domain::status::StatusCategory;
use homedeck_domain::value::{BlindPosition, Channel, LockState, Power, Temperature, Volume};

use crate::catalog::Operation;

/// An operation invocation as produced by a tool-calling front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// A fully validated request, ready to run against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Device(Primitive),
    AllLights(Power),
    Scene(Scene),
    Status(StatusCategory),
    CurrentDatetime,
}

impl Command {
    /// Parse the arguments of `operation`.
    ///
    /// Arguments not named by the operation (such as the `confirm` flag some
    /// front ends send) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::InvalidArgument`] for missing or ill-typed
    /// arguments and out-of-range values, [`HomeError::UnknownLocation`] for
    /// a location outside the device's set, and
    /// [`HomeError::UnknownCategory`] for an unknown status category.
    pub fn parse(operation: Operation, arguments: &Value) -> Result<Self, HomeError> {
        let args = Arguments::new(arguments)?;

        let command = match operation {
            Operation::ToggleLight => Self::Device(Primitive::LightPower {
                location: args.location()?,
                power: args.power()?,
            }),
            Operation::TurnOnAc => Self::Device(Primitive::AcPower {
                location: args.location()?,
                power: Power::On,
            }),
            Operation::TurnOffAc => Self::Device(Primitive::AcPower {
                location: args.location()?,
                power: Power::Off,
            }),
            Operation::SetAcPower => Self::Device(Primitive::AcPower {
                location: args.location()?,
                power: args.power()?,
            }),
            Operation::SetAcTemperature => Self::Device(Primitive::AcTemperature {
                location: args.location()?,
                temperature: Temperature::new(args.integer("temperature")?)?,
            }),
            Operation::TurnOnTv => Self::Device(Primitive::TvPower {
                location: args.location()?,
                power: Power::On,
            }),
            Operation::TurnOffTv => Self::Device(Primitive::TvPower {
                location: args.location()?,
                power: Power::Off,
            }),
            Operation::ChangeTvChannel => Self::Device(Primitive::TvChannel {
                location: args.location()?,
                channel: Channel::new(args.integer("channel")?)?,
            }),
            Operation::SetTvVolume => Self::Device(Primitive::TvVolume {
                location: args.location()?,
                volume: Volume::new(args.integer("volume")?)?,
            }),
            Operation::LockDoor => Self::Device(Primitive::DoorLock {
                location: args.location()?,
                lock: LockState::Locked,
            }),
            Operation::UnlockDoor => Self::Device(Primitive::DoorLock {
                location: args.location()?,
                lock: LockState::Unlocked,
            }),
            Operation::OpenBlinds => Self::Device(Primitive::BlindPosition {
                location: args.location()?,
                position: BlindPosition::Open,
            }),
            Operation::CloseBlinds => Self::Device(Primitive::BlindPosition {
                location: args.location()?,
                position: BlindPosition::Closed,
            }),
            Operation::StartCoffeeMachine => {
                Self::Device(Primitive::CoffeeMachinePower { power: Power::On })
            }
            Operation::StopCoffeeMachine => {
                Self::Device(Primitive::CoffeeMachinePower { power: Power::Off })
            }
            Operation::GetDeviceStatus => Self::Status(match args.optional_str("device_type")? {
                Some(name) => name.parse()?,
                None => StatusCategory::All,
            }),
            Operation::TurnOffAllLights => Self::AllLights(Power::Off),
            Operation::TurnOnAllLights => Self::AllLights(Power::On),
            Operation::ActivateGuestMode => Self::Scene(Scene::GuestMode),
            Operation::ActivateSleepMode => Self::Scene(Scene::SleepMode),
            Operation::GetCurrentDatetime => Self::CurrentDatetime,
        };
        Ok(command)
    }
}

/// Borrowed view over a tool call's argument object.
struct Arguments<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    /// `null` is treated as an empty object, anything else that is not an
    /// object is rejected.
    fn new(value: &'a Value) -> Result<Self, InvalidArgumentError> {
        match value {
            Value::Null => Ok(Self { fields: None }),
            Value::Object(fields) => Ok(Self {
                fields: Some(fields),
            }),
            _ => Err(InvalidArgumentError::WrongType {
                argument: "arguments",
                expected: "an object",
            }),
        }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields
            .and_then(|fields| fields.get(name))
            .filter(|value| !value.is_null())
    }

    fn required(&self, name: &'static str) -> Result<&'a Value, InvalidArgumentError> {
        self.get(name)
            .ok_or(InvalidArgumentError::MissingArgument { argument: name })
    }

    fn string(&self, name: &'static str) -> Result<&'a str, InvalidArgumentError> {
        self.required(name)?
            .as_str()
            .ok_or(InvalidArgumentError::WrongType {
                argument: name,
                expected: "a string",
            })
    }

    fn optional_str(&self, name: &'static str) -> Result<Option<&'a str>, InvalidArgumentError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or(InvalidArgumentError::WrongType {
                    argument: name,
                    expected: "a string",
                }),
        }
    }

    /// Integers may arrive as JSON numbers or as numeric strings.
    fn integer(&self, name: &'static str) -> Result<i64, InvalidArgumentError> {
        let wrong_type = || InvalidArgumentError::WrongType {
            argument: name,
            expected: "an integer",
        };
        match self.required(name)? {
            Value::Number(number) => number.as_i64().ok_or_else(wrong_type),
            Value::String(text) => text.trim().parse().map_err(|_| wrong_type()),
            _ => Err(wrong_type()),
        }
    }

    fn location<L: Location>(&self) -> Result<L, HomeError> {
        Ok(L::parse(self.string("location")?)?)
    }

    fn power(&self) -> Result<Power, InvalidArgumentError> {
        let state = self.string("state")?;
        Power::from_choice(state).ok_or_else(|| InvalidArgumentError::InvalidValue {
            argument: "state",
            value: state.trim().to_string(),
            expected: Power::CHOICES.join(", "),
        })
    }
}
