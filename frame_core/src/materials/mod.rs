//! # Materials and Sections
//!
//! Material and cross-section definitions referenced by frame members and
//! slabs, plus the code-defaulted strength pair used by the element
//! normalizer.
//!
//! ## Contents
//!
//! - [`Material`] - concrete/steel strengths and elastic modulus
//! - [`MaterialDefaults`] - the (fc, fy) pair substituted for blank inputs
//! - [`Section`] - rectangular RC or rolled steel cross-section
//! - [`steel`] - static rolled steel section catalog
//!
//! ## Example
//!
//! ```rust
//! use frame_core::materials::{Material, Section};
//!
//! let concrete = Material::reinforced_concrete(25.0, 420.0);
//! assert_eq!(concrete.id, "C25_FY420");
//! assert_eq!(concrete.e, 25000.0);
//!
//! let beam = Section::rect_rc("300x600", 0.3, 0.6, 0.04);
//! assert_eq!(beam.shape.tag(), "rectRC");
//! ```

pub mod steel;

pub use steel::{BuiltinSteelCatalog, SteelCatalog, SteelDimensions, SteelSectionType};

use serde::{Deserialize, Serialize};

/// Default concrete compressive strength and reinforcement yield strength (MPa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefaults {
    /// Concrete compressive strength fc (MPa)
    pub fc: f64,
    /// Steel yield strength fy (MPa)
    pub fy: f64,
}

impl MaterialDefaults {
    /// Used when the design code is not recognized
    pub const BASELINE: MaterialDefaults = MaterialDefaults { fc: 25.0, fy: 420.0 };
}

impl Default for MaterialDefaults {
    fn default() -> Self {
        MaterialDefaults::BASELINE
    }
}

/// A material definition owned by the project catalog.
///
/// Strengths are in MPa; `e` serializes as `"E"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog identifier (e.g., "C25_FY420")
    pub id: String,
    /// Display name
    pub name: String,
    /// Concrete compressive strength (MPa)
    pub fc: f64,
    /// Steel yield strength (MPa)
    pub fy: f64,
    /// Elastic modulus (MPa)
    #[serde(rename = "E")]
    pub e: f64,
}

impl Material {
    /// Reinforced concrete with E = 5000·√fc.
    pub fn reinforced_concrete(fc: f64, fy: f64) -> Self {
        Material {
            id: format!("C{}_FY{}", fc, fy),
            name: format!("RC fc={}, fy={}", fc, fy),
            fc,
            fy,
            e: 5000.0 * fc.sqrt(),
        }
    }

    /// Reinforced concrete using a code's default strengths
    pub fn from_defaults(defaults: MaterialDefaults) -> Self {
        Material::reinforced_concrete(defaults.fc, defaults.fy)
    }
}

/// Cross-section shape tag as sent to the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionShape {
    /// Rectangular reinforced concrete
    #[serde(rename = "rectRC")]
    RectRc,
    /// Rolled steel profile
    #[serde(rename = "rolledSteel")]
    RolledSteel,
}

impl SectionShape {
    /// Wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            SectionShape::RectRc => "rectRC",
            SectionShape::RolledSteel => "rolledSteel",
        }
    }
}

/// Shape parameters, in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionParams {
    /// Width, depth and clear cover of a rectangular RC section
    RectRc { bw: f64, h: f64, cover: f64 },
    /// Depth, flange width, flange and web thickness of a rolled profile
    RolledSteel { h: f64, b: f64, tf: f64, tw: f64 },
}

/// A cross-section referenced by members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Catalog identifier (e.g., "300x600")
    pub id: String,
    /// Display name
    pub name: String,
    /// Shape tag
    pub shape: SectionShape,
    /// Shape parameters matching `shape`
    pub params: SectionParams,
}

impl Section {
    /// Rectangular RC section (dimensions in meters)
    pub fn rect_rc(id: impl Into<String>, bw: f64, h: f64, cover: f64) -> Self {
        Section {
            id: id.into(),
            name: format!("Rect {:.0}x{:.0}", bw * 1000.0, h * 1000.0),
            shape: SectionShape::RectRc,
            params: SectionParams::RectRc { bw, h, cover },
        }
    }

    /// Rolled steel section from catalog dimensions (millimeters in, meters stored)
    pub fn rolled_steel(designation: &str, dims: &SteelDimensions) -> Self {
        Section {
            id: designation.to_string(),
            name: designation.to_string(),
            shape: SectionShape::RolledSteel,
            params: SectionParams::RolledSteel {
                h: dims.depth / 1000.0,
                b: dims.width / 1000.0,
                tf: dims.flange_thickness / 1000.0,
                tw: dims.web_thickness / 1000.0,
            },
        }
    }

    /// Gross cross-sectional area (m²)
    pub fn area(&self) -> f64 {
        match self.params {
            SectionParams::RectRc { bw, h, .. } => bw * h,
            SectionParams::RolledSteel { h, b, tf, tw } => 2.0 * b * tf + (h - 2.0 * tf) * tw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_concrete_modulus() {
        let mat = Material::reinforced_concrete(25.0, 420.0);
        assert_eq!(mat.e, 25000.0);
        assert_eq!(mat.name, "RC fc=25, fy=420");
    }

    #[test]
    fn test_material_wire_names() {
        let mat = Material::reinforced_concrete(25.0, 420.0);
        let json = serde_json::to_value(&mat).unwrap();
        assert_eq!(json["E"], 25000.0);
        assert!(json.get("e").is_none());
    }

    #[test]
    fn test_section_wire_format() {
        let sec = Section::rect_rc("300x600", 0.3, 0.6, 0.04);
        let json = serde_json::to_value(&sec).unwrap();
        assert_eq!(json["shape"], "rectRC");
        assert_eq!(json["params"]["bw"], 0.3);
        assert_eq!(json["params"]["cover"], 0.04);
        assert_eq!(sec.name, "Rect 300x600");
    }

    #[test]
    fn test_rolled_section_params_deserialize() {
        let json = r#"{"id":"IPE200","name":"IPE200","shape":"rolledSteel",
            "params":{"h":0.2,"b":0.1,"tf":0.0085,"tw":0.0056}}"#;
        let sec: Section = serde_json::from_str(json).unwrap();
        assert!(matches!(sec.params, SectionParams::RolledSteel { .. }));
    }

    #[test]
    fn test_section_area() {
        let sec = Section::rect_rc("300x600", 0.3, 0.6, 0.04);
        assert!((sec.area() - 0.18).abs() < 1e-12);
    }
}
