//! # Unit Types
//!
//! Type-safe length wrappers for element geometry and the unit system
//! declared in analysis requests. The wrappers serialize as bare numbers so
//! the wire format stays clean.
//!
//! ## SI Units
//!
//! - Frame geometry (node coordinates, slab footprints, section params): meters
//! - Element cross-section dimensions and covers: centimeters
//! - Bar diameters and rolled steel dimensions: millimeters
//! - Forces: kN; distributed loads: kN/m; strengths: MPa
//!
//! ## Example
//!
//! ```rust
//! use frame_core::units::{Centimeters, Meters, Millimeters};
//!
//! let depth = Centimeters(60.0);
//! let depth_m: Meters = depth.into();
//! assert!((depth_m.0 - 0.6).abs() < 1e-12);
//!
//! let bar: Millimeters = Millimeters(16.0);
//! assert!((Centimeters::from(bar).0 - 1.6).abs() < 1e-12);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Millimeters> for Centimeters {
    fn from(mm: Millimeters) -> Self {
        Centimeters(mm.0 / 10.0)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

impl fmt::Display for Centimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cm", self.0)
    }
}

impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm", self.0)
    }
}

// ============================================================================
// Unit System
// ============================================================================

/// Length unit declared to the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "mm")]
    Millimeter,
}

/// Force unit declared to the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceUnit {
    #[default]
    #[serde(rename = "kN")]
    KiloNewton,
    #[serde(rename = "N")]
    Newton,
}

/// Unit system of a frame analysis request.
///
/// Serializes as `{"length": "m", "force": "kN"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitSystem {
    pub length: LengthUnit,
    pub force: ForceUnit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_m() {
        let m: Meters = Centimeters(250.0).into();
        assert!((m.0 - 2.5).abs() < 1e-12);
        let back: Centimeters = m.into();
        assert!((back.0 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_mm_conversions() {
        assert!((Meters::from(Millimeters(200.0)).0 - 0.2).abs() < 1e-12);
        assert!((Centimeters::from(Millimeters(12.0)).0 - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_transparent_serialization() {
        let json = serde_json::to_string(&Centimeters(30.0)).unwrap();
        assert_eq!(json, "30.0");
        let parsed: Millimeters = serde_json::from_str("16").unwrap();
        assert_eq!(parsed, Millimeters(16.0));
    }

    #[test]
    fn test_default_unit_system() {
        let json = serde_json::to_string(&UnitSystem::default()).unwrap();
        assert_eq!(json, r#"{"length":"m","force":"kN"}"#);
    }
}
