//! Loads and load combinations
//!
//! # Overview
//!
//! - [`LoadType`] - D, L, W, S, E load categories
//! - [`MemberLoad`] - uniform load applied along a frame member
//! - [`LoadSet`] / [`AxialLoads`] - service loads of a single element
//! - [`LoadCombination`] - id, name and factored expression per design code
//!
//! # Example
//!
//! ```
//! use frame_core::codes::DesignCode;
//! use frame_core::loads::{combinations_for, LoadSet, LoadType};
//!
//! let floor = LoadSet { dead: 20.0, live: 50.0, ..LoadSet::default() };
//! let governing = combinations_for(DesignCode::Aci)
//!     .iter()
//!     .map(|c| floor.factored(&c.factors().unwrap()))
//!     .fold(f64::MIN, f64::max);
//!
//! assert_eq!(governing, 1.2 * 20.0 + 1.6 * 50.0);
//! ```

pub mod combinations;
pub mod load_types;

pub use combinations::{combinations_for, parse_expression, LoadCombination};
pub use load_types::LoadType;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Uniform load along a member (kN/m), tagged with its load type.
///
/// Serializes as `{"type": "D", "w": 12.5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberLoad {
    /// Load category
    #[serde(rename = "type")]
    pub load_type: LoadType,
    /// Intensity (kN/m)
    pub w: f64,
}

impl MemberLoad {
    /// Uniform load of a given type
    pub fn uniform(load_type: LoadType, w: f64) -> Self {
        MemberLoad { load_type, w }
    }
}

/// Service loads on a beam, slab or staircase (kN/m or kN/m²).
///
/// Blank inputs normalize to zero; loads are never a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadSet {
    pub dead: f64,
    pub live: f64,
    pub wind: f64,
    pub snow: f64,
}

impl LoadSet {
    /// Service load of one type
    pub fn get(&self, load_type: LoadType) -> f64 {
        match load_type {
            LoadType::Dead => self.dead,
            LoadType::Live => self.live,
            LoadType::Wind => self.wind,
            LoadType::Snow => self.snow,
            LoadType::Seismic => 0.0,
        }
    }

    /// Total factored load for a set of combination factors
    pub fn factored(&self, factors: &BTreeMap<LoadType, f64>) -> f64 {
        factors
            .iter()
            .map(|(load_type, factor)| factor * self.get(*load_type))
            .sum()
    }
}

/// Axial force (kN) and moment (kN·m) on a column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxialLoads {
    pub axial: f64,
    pub moment: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_load_wire_format() {
        let load = MemberLoad::uniform(LoadType::Live, 5.0);
        let json = serde_json::to_string(&load).unwrap();
        assert_eq!(json, r#"{"type":"L","w":5.0}"#);
    }

    #[test]
    fn test_factored_load_ignores_seismic() {
        let loads = LoadSet { dead: 10.0, live: 4.0, wind: 2.0, snow: 1.0 };
        let factors = parse_expression("1.2D+1.0E").unwrap();
        assert!((loads.factored(&factors) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_loads_are_zero() {
        let loads = LoadSet::default();
        for load_type in LoadType::ALL {
            assert_eq!(loads.get(load_type), 0.0);
        }
        assert_eq!(AxialLoads::default().axial, 0.0);
    }
}
