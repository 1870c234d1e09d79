//! Status categories and read-only reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCategoryError;
use crate::house::{AcState, CoffeeMachineState, HouseState, TvState};
use crate::location::{AcLocation, BlindLocation, DoorLocation, LightLocation, TvLocation};
use crate::table::LocationTable;
use crate::value::{BlindPosition, LockState, Power};

/// A section of the status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    #[default]
    All,
    Lamps,
    AcUnits,
    Tv,
    Doors,
    Blinds,
    CoffeeMachine,
}

impl StatusCategory {
    pub const ALL: &'static [Self] = &[
        Self::All,
        Self::Lamps,
        Self::AcUnits,
        Self::Tv,
        Self::Doors,
        Self::Blinds,
        Self::CoffeeMachine,
    ];

    pub const NAMES: &'static [&'static str] = &[
        "all",
        "lamps",
        "ac_units",
        "tv",
        "doors",
        "blinds",
        "coffee_machine",
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Lamps => "lamps",
            Self::AcUnits => "ac_units",
            Self::Tv => "tv",
            Self::Doors => "doors",
            Self::Blinds => "blinds",
            Self::CoffeeMachine => "coffee_machine",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| UnknownCategoryError {
                category: s.trim().to_string(),
            })
    }
}

/// Snapshot of one [`StatusCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusReport {
    All(HouseState),
    Lamps(LocationTable<LightLocation, Power>),
    AcUnits(LocationTable<AcLocation, AcState>),
    Tv(LocationTable<TvLocation, TvState>),
    Doors(LocationTable<DoorLocation, LockState>),
    Blinds(LocationTable<BlindLocation, BlindPosition>),
    CoffeeMachine(CoffeeMachineState),
}

impl StatusReport {
    #[must_use]
    pub fn category(&self) -> StatusCategory {
        match self {
            Self::All(_) => StatusCategory::All,
            Self::Lamps(_) => StatusCategory::Lamps,
            Self::AcUnits(_) => StatusCategory::AcUnits,
            Self::Tv(_) => StatusCategory::Tv,
            Self::Doors(_) => StatusCategory::Doors,
            Self::Blinds(_) => StatusCategory::Blinds,
            Self::CoffeeMachine(_) => StatusCategory::CoffeeMachine,
        }
    }

    /// Human-readable rendering: pretty JSON, prefixed with the category
    /// name unless the whole house was requested.
    #[must_use]
    pub fn render(&self) -> String {
        let json = serde_json::to_string_pretty(self).unwrap_or_default();
        match self.category() {
            StatusCategory::All => json,
            category => format!("Status for {category}: {json}"),
        }
    }
}
