//! Fixed location sets, one enum per device type.
//!
//! The house topology never changes at runtime, so every location is a
//! compile-time variant. Parsing a location from text is the only place an
//! unknown name can show up, and it fails with [`UnknownLocationError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLocationError;

/// The kinds of device the house contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Light,
    AcUnit,
    Tv,
    Door,
    Blind,
    CoffeeMachine,
}

impl DeviceKind {
    /// Prefix used when rendering entity references (`light.kitchen`).
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::AcUnit => "ac",
            Self::Tv => "tv",
            Self::Door => "door",
            Self::Blind => "blind",
            Self::CoffeeMachine => "coffee_machine",
        }
    }

    /// Every location name accepted for this device type.
    #[must_use]
    pub fn valid_locations(self) -> &'static [&'static str] {
        match self {
            Self::Light => LightLocation::NAMES,
            Self::AcUnit => AcLocation::NAMES,
            Self::Tv => TvLocation::NAMES,
            Self::Door => DoorLocation::NAMES,
            Self::Blind => BlindLocation::NAMES,
            Self::CoffeeMachine => &[COFFEE_MACHINE_LOCATION],
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::AcUnit => "AC",
            Self::Tv => "TV",
            Self::Door => "door",
            Self::Blind => "blinds",
            Self::CoffeeMachine => "coffee machine",
        })
    }
}

/// The coffee machine is a singleton living in the kitchen.
pub const COFFEE_MACHINE_LOCATION: &str = "kitchen";

/// A member of one of the fixed per-device location sets.
pub trait Location: fmt::Debug + fmt::Display + Copy + Eq + 'static {
    /// Device type this location set belongs to.
    const KIND: DeviceKind;
    /// All variants, in table order.
    const ALL: &'static [Self];
    /// Canonical names, aligned with [`ALL`](Self::ALL).
    const NAMES: &'static [&'static str];

    /// Position of this variant in [`ALL`](Self::ALL).
    fn index(self) -> usize;

    /// Canonical name.
    fn as_str(self) -> &'static str;

    /// Parse a user-supplied location name.
    ///
    /// Case is ignored, as are spaces, underscores and hyphens, so
    /// `"Room 1"` and `"room1"` are the same location.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLocationError`] when no variant matches.
    fn parse(input: &str) -> Result<Self, UnknownLocationError> {
        let wanted = normalize(input);
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| normalize(candidate.as_str()) == wanted)
            .ok_or_else(|| UnknownLocationError {
                device: Self::KIND,
                location: input.trim().to_string(),
            })
    }
}

fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! define_location {
    ($(#[doc = $doc:expr])* $name:ident ($kind:expr) { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant,)+
        }

        impl Location for $name {
            const KIND: DeviceKind = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const NAMES: &'static [&'static str] = &[$($text),+];

            fn index(self) -> usize {
                self as usize
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLocationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Location>::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownLocationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }
    };
}

define_location!(
    /// Rooms with a controllable light.
    LightLocation(DeviceKind::Light) {
        Kitchen => "kitchen",
        Bathroom => "bathroom",
        Room1 => "room1",
        Room2 => "room2",
    }
);

define_location!(
    /// Rooms with an AC unit.
    AcLocation(DeviceKind::AcUnit) {
        Room1 => "room1",
        Kitchen => "kitchen",
    }
);

define_location!(
    /// Where the TV is.
    TvLocation(DeviceKind::Tv) {
        LivingRoom => "living_room",
    }
);

define_location!(
    /// Lockable doors.
    DoorLocation(DeviceKind::Door) {
        Front => "front",
        Back => "back",
    }
);

define_location!(
    /// Windows with motorised blinds.
    BlindLocation(DeviceKind::Blind) {
        Kitchen => "kitchen",
        Room1 => "room1",
    }
);
