//! Time and timestamp helpers.

use chrono::{DateTime, Local, Utc};

/// UTC timestamp attached to events.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Wall-clock reading in the host's local time zone, formatted the way the
/// assistant speaks it.
#[must_use]
pub fn local_clock_reading() -> String {
    format_clock(&Local::now())
}

fn format_clock<Tz: chrono::TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "The current date and time is {}.",
        at.format("%Y-%m-%d %H:%M:%S")
    )
}
