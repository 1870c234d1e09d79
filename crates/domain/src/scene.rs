//! Scenes — fixed, ordered sequences of primitives applied as one unit.
//!
//! Scenes are built by enumerating the location sets, never by name, so a
//! scene step cannot reference a device that does not exist.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Primitive;
use crate::location::{AcLocation, BlindLocation, DoorLocation, LightLocation, Location};
use crate::value::{BlindPosition, LockState, Power, Temperature};

/// Set-point applied to the guest room AC.
const GUEST_TEMPERATURE: Temperature = Temperature(22);

/// A named composite of primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// Room 1 light and AC on at 22°C, every blind open, front door unlocked.
    GuestMode,
    /// Every light and AC off, every blind closed, every door locked.
    SleepMode,
}

impl Scene {
    /// The primitives making up this scene, in application order.
    #[must_use]
    pub fn steps(self) -> Vec<Primitive> {
        match self {
            Self::GuestMode => {
                let mut steps = vec![
                    Primitive::LightPower {
                        location: LightLocation::Room1,
                        power: Power::On,
                    },
                    Primitive::AcPower {
                        location: AcLocation::Room1,
                        power: Power::On,
                    },
                    Primitive::AcTemperature {
                        location: AcLocation::Room1,
                        temperature: GUEST_TEMPERATURE,
                    },
                ];
                steps.extend(BlindLocation::ALL.iter().map(|&location| {
                    Primitive::BlindPosition {
                        location,
                        position: BlindPosition::Open,
                    }
                }));
                steps.push(Primitive::DoorLock {
                    location: DoorLocation::Front,
                    lock: LockState::Unlocked,
                });
                steps
            }
            Self::SleepMode => {
                let mut steps = all_lights(Power::Off);
                steps.extend(AcLocation::ALL.iter().map(|&location| Primitive::AcPower {
                    location,
                    power: Power::Off,
                }));
                steps.extend(BlindLocation::ALL.iter().map(|&location| {
                    Primitive::BlindPosition {
                        location,
                        position: BlindPosition::Closed,
                    }
                }));
                steps.extend(DoorLocation::ALL.iter().map(|&location| Primitive::DoorLock {
                    location,
                    lock: LockState::Locked,
                }));
                steps
            }
        }
    }

    /// One-line description of the end state.
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::GuestMode => {
                "Guest mode activated: Room 1 light and AC are on, all blinds are open, and the front door is unlocked."
            }
            Self::SleepMode => {
                "Sleep mode activated: all lights and AC units are off, all blinds are closed, and all doors are locked."
            }
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GuestMode => "guest_mode",
            Self::SleepMode => "sleep_mode",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set every light to `power`.
#[must_use]
pub fn all_lights(power: Power) -> Vec<Primitive> {
    LightLocation::ALL
        .iter()
        .map(|&location| Primitive::LightPower { location, power })
        .collect()
}
