//! Enumerated labels shared across the advisory components.
//!
//! Soil types are the fixed set offered when registering land. Water
//! availability drives the irrigation decision table. Seasons stay free
//! text because crop matching is a substring match against the crop
//! table, but the canonical choices are listed in [`SEASON_CHOICES`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Season labels offered for crop recommendations.
pub const SEASON_CHOICES: [&str; 4] = ["Kharif (Monsoon)", "Rabi (Winter)", "Summer", "Year Round"];

/// Error returned when a label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseLabelError {
    /// What was being parsed (e.g. `soil type`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// ---------------------------------------------------------------------------
// SoilType
// ---------------------------------------------------------------------------

/// Soil classification of a land parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoilType {
    /// Clay loam.
    #[serde(rename = "Clay Loam")]
    ClayLoam,
    /// Sandy loam.
    #[serde(rename = "Sandy Loam")]
    SandyLoam,
    /// Loam.
    Loam,
    /// Clay.
    Clay,
    /// Sandy.
    Sandy,
}

impl SoilType {
    /// Every soil type, in the order the land form offers them.
    pub const ALL: [Self; 5] = [
        Self::ClayLoam,
        Self::SandyLoam,
        Self::Loam,
        Self::Clay,
        Self::Sandy,
    ];

    /// The label stored in the `lands.soil_type` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClayLoam => "Clay Loam",
            Self::SandyLoam => "Sandy Loam",
            Self::Loam => "Loam",
            Self::Clay => "Clay",
            Self::Sandy => "Sandy",
        }
    }

    /// Case-insensitive comparison against a free-text soil label from the
    /// crop table.
    pub fn matches_label(self, label: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(label.trim())
    }
}

impl core::fmt::Display for SoilType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|soil| soil.matches_label(s))
            .ok_or_else(|| ParseLabelError {
                kind: "soil type",
                value: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// WaterAvailability
// ---------------------------------------------------------------------------

/// How much irrigation water the farmer has access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterAvailability {
    /// Scarce water.
    Low,
    /// Normal supply.
    Medium,
    /// Plentiful supply.
    High,
}

impl WaterAvailability {
    /// Display label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl core::fmt::Display for WaterAvailability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaterAvailability {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseLabelError {
                kind: "water availability",
                value: s.to_owned(),
            }),
        }
    }
}
