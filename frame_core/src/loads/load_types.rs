//! Load type definitions
//!
//! The load categories used by member loads, element load sets and load
//! combination expressions. Each type has a single-letter code that is also
//! its wire representation.

use serde::{Deserialize, Serialize};

/// Load categories.
///
/// # Example
/// ```
/// use frame_core::loads::LoadType;
///
/// let dead = LoadType::Dead;
/// assert_eq!(dead.code(), "D");
/// assert_eq!(LoadType::from_code("G"), Some(LoadType::Dead));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Dead load (self-weight and permanent attachments)
    #[serde(rename = "D")]
    Dead,
    /// L - Live load (occupancy)
    #[serde(rename = "L")]
    Live,
    /// W - Wind load
    #[serde(rename = "W")]
    Wind,
    /// S - Snow load
    #[serde(rename = "S")]
    Snow,
    /// E - Seismic (earthquake) load
    #[serde(rename = "E")]
    Seismic,
}

impl LoadType {
    /// All load types in standard order
    pub const ALL: [LoadType; 5] = [
        LoadType::Dead,
        LoadType::Live,
        LoadType::Wind,
        LoadType::Snow,
        LoadType::Seismic,
    ];

    /// Standard abbreviation code (D, L, W, S, E)
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::Wind => "W",
            LoadType::Snow => "S",
            LoadType::Seismic => "E",
        }
    }

    /// Parse a load code. Eurocode's G (permanent) and Q (variable) map to D and L.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "D" | "G" => Some(LoadType::Dead),
            "L" | "Q" => Some(LoadType::Live),
            "W" => Some(LoadType::Wind),
            "S" => Some(LoadType::Snow),
            "E" => Some(LoadType::Seismic),
            _ => None,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead load",
            LoadType::Live => "Live load",
            LoadType::Wind => "Wind load",
            LoadType::Snow => "Snow load",
            LoadType::Seismic => "Seismic load",
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
