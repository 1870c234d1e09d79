//! Primitive commands — single-entity state transitions.
//!
//! Every argument is already validated, so applying a primitive to a
//! [`HouseState`](crate::house::HouseState) cannot fail.

use std::fmt;

use crate::location::{AcLocation, BlindLocation, DoorLocation, LightLocation, TvLocation};
use crate::value::{BlindPosition, Channel, LockState, Power, Temperature, Volume};

/// A typed, validated mutation of one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    LightPower {
        location: LightLocation,
        power: Power,
    },
    AcPower {
        location: AcLocation,
        power: Power,
    },
    /// Also turns the AC on when it is off.
    AcTemperature {
        location: AcLocation,
        temperature: Temperature,
    },
    TvPower {
        location: TvLocation,
        power: Power,
    },
    /// Also turns the TV on when it is off.
    TvChannel {
        location: TvLocation,
        channel: Channel,
    },
    TvVolume {
        location: TvLocation,
        volume: Volume,
    },
    DoorLock {
        location: DoorLocation,
        lock: LockState,
    },
    BlindPosition {
        location: BlindLocation,
        position: BlindPosition,
    },
    CoffeeMachinePower {
        power: Power,
    },
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LightPower { location, power } => write!(f, "light_power({location}, {power})"),
            Self::AcPower { location, power } => write!(f, "ac_power({location}, {power})"),
            Self::AcTemperature {
                location,
                temperature,
            } => write!(f, "ac_temperature({location}, {temperature})"),
            Self::TvPower { location, power } => write!(f, "tv_power({location}, {power})"),
            Self::TvChannel { location, channel } => {
                write!(f, "tv_channel({location}, {channel})")
            }
            Self::TvVolume { location, volume } => write!(f, "tv_volume({location}, {volume})"),
            Self::DoorLock { location, lock } => write!(f, "door_lock({location}, {lock})"),
            Self::BlindPosition { location, position } => {
                write!(f, "blind_position({location}, {position})")
            }
            Self::CoffeeMachinePower { power } => write!(f, "coffee_machine_power({power})"),
        }
    }
}
