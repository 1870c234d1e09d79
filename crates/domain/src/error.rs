//! Error types shared across the workspace.
//!
//! Every fallible core operation returns [`HomeError`]. None of them is
//! fatal: callers translate them into a polite refusal. "Already in the
//! requested state" is not an error at all, see
//! [`Outcome::is_noop`](crate::entity::Outcome::is_noop).

use crate::location::DeviceKind;

/// Top-level error for device operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HomeError {
    #[error(transparent)]
    UnknownLocation(#[from] UnknownLocationError),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperationError),
}

/// A location that is not part of the fixed set for its device type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {device} location '{location}'")]
pub struct UnknownLocationError {
    pub device: DeviceKind,
    pub location: String,
}

/// A status category that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device type '{category}'")]
pub struct UnknownCategoryError {
    pub category: String,
}

/// An operation name missing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation '{name}'")]
pub struct UnknownOperationError {
    pub name: String,
}

/// A value outside of its accepted domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgumentError {
    #[error("temperature {value}°C is outside the supported range {min}..={max}°C")]
    TemperatureOutOfRange { value: i64, min: i64, max: i64 },

    #[error("volume {value} must be between 0 and 100")]
    VolumeOutOfRange { value: i64 },

    #[error("channel {value} must be a positive number")]
    ChannelOutOfRange { value: i64 },

    #[error("invalid {argument} '{value}', expected one of: {expected}")]
    InvalidValue {
        argument: &'static str,
        value: String,
        expected: String,
    },

    #[error("missing required argument '{argument}'")]
    MissingArgument { argument: &'static str },

    #[error("argument '{argument}' must be {expected}")]
    WrongType {
        argument: &'static str,
        expected: &'static str,
    },
}
