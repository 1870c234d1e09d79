//! Device attribute values: discrete choices and bounded numbers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgumentError;

macro_rules! define_choice {
    ($(#[doc = $doc:expr])* $name:ident as $argument:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Accepted spellings, lowercase.
            pub const CHOICES: &'static [&'static str] = &[$($text),+];

            /// Case-insensitive lookup of one of [`CHOICES`](Self::CHOICES).
            #[must_use]
            pub fn from_choice(input: &str) -> Option<Self> {
                let input = input.trim();
                $(
                    if input.eq_ignore_ascii_case($text) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            #[must_use]
            pub fn as_str(self) -> &'static str {
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
            type Err = InvalidArgumentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_choice(s).ok_or_else(|| InvalidArgumentError::InvalidValue {
                    argument: $argument,
                    value: s.trim().to_string(),
                    expected: Self::CHOICES.join(", "),
                })
            }
        }
    };
}

define_choice!(
    /// Power state of a switchable device.
    Power as "power" {
        On => "on",
        Off => "off",
    }
);

define_choice!(
    /// Lock state of a door.
    LockState as "lock" {
        Locked => "locked",
        Unlocked => "unlocked",
    }
);

define_choice!(
    /// Position of a blind.
    BlindPosition as "position" {
        Open => "open",
        Closed => "closed",
    }
);

/// AC set-point in whole degrees Celsius, within
/// [`MIN`](Self::MIN)..=[`MAX`](Self::MAX).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Temperature(pub(crate) i64);

impl Temperature {
    pub const MIN: i64 = 10;
    pub const MAX: i64 = 35;

    /// Validate a set-point.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::TemperatureOutOfRange`] outside of
    /// the supported range.
    pub fn new(value: i64) -> Result<Self, InvalidArgumentError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidArgumentError::TemperatureOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

/// TV channel number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Channel(pub(crate) u32);

impl Channel {
    /// Validate a channel number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::ChannelOutOfRange`] for zero, negative
    /// or oversized numbers.
    pub fn new(value: i64) -> Result<Self, InvalidArgumentError> {
        match u32::try_from(value) {
            Ok(channel) if channel >= 1 => Ok(Self(channel)),
            _ => Err(InvalidArgumentError::ChannelOutOfRange { value }),
        }
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// TV volume, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Volume(pub(crate) u8);

impl Volume {
    pub const MAX: u8 = 100;

    /// Validate a volume level.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::VolumeOutOfRange`] outside 0..=100.
    pub fn new(value: i64) -> Result<Self, InvalidArgumentError> {
        match u8::try_from(value) {
            Ok(volume) if volume <= Self::MAX => Ok(Self(volume)),
            _ => Err(InvalidArgumentError::VolumeOutOfRange { value }),
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Value of a single device attribute, as reported in a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Power(Power),
    Lock(LockState),
    Position(BlindPosition),
    Number(i64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(v) => v.fmt(f),
            Self::Lock(v) => v.fmt(f),
            Self::Position(v) => v.fmt(f),
            Self::Number(v) => v.fmt(f),
        }
    }
}

impl From<Power> for AttributeValue {
    fn from(value: Power) -> Self {
        Self::Power(value)
    }
}

impl From<LockState> for AttributeValue {
    fn from(value: LockState) -> Self {
        Self::Lock(value)
    }
}

impl From<BlindPosition> for AttributeValue {
    fn from(value: BlindPosition) -> Self {
        Self::Position(value)
    }
}

impl From<Temperature> for AttributeValue {
    fn from(value: Temperature) -> Self {
        Self::Number(value.0)
    }
}

impl From<Channel> for AttributeValue {
    fn from(value: Channel) -> Self {
        Self::Number(i64::from(value.0))
    }
}

impl From<Volume> for AttributeValue {
    fn from(value: Volume) -> Self {
        Self::Number(i64::from(value.0))
    }
}
