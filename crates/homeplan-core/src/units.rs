//! Unit formatting for the measurement readout.
//!
//! Scene units are pixels. The readout converts a pointer position to
//! feet (12 units per foot) or meters (100 units per meter) depending on
//! the configured unit system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::geometry::Point;

/// Measurement system for the on-screen readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Feet (12 scene units per foot).
    Imperial,
    /// Meters (100 scene units per meter).
    Metric,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::Imperial
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imperial => write!(f, "Imperial"),
            Self::Metric => write!(f, "Metric"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imperial" | "ft" | "feet" => Ok(Self::Imperial),
            "metric" | "m" | "meters" => Ok(Self::Metric),
            _ => Err(CoreError::Parse(format!("Unknown unit system: {}", s))),
        }
    }
}

/// Formats a pointer position for the measurement readout.
///
/// Imperial: one decimal of feet. Metric: two decimals of meters.
pub fn format_measure(p: Point, system: UnitSystem) -> String {
    match system {
        UnitSystem::Imperial => {
            format!("x: {:.1} ft, y: {:.1} ft", p.x / 12.0, p.y / 12.0)
        }
        UnitSystem::Metric => {
            format!("x: {:.2} m, y: {:.2} m", p.x / 100.0, p.y / 100.0)
        }
    }
}

/// Gets the unit label for the given system ("ft" or "m").
pub fn unit_label(system: UnitSystem) -> &'static str {
    match system {
        UnitSystem::Imperial => "ft",
        UnitSystem::Metric => "m",
    }
}
