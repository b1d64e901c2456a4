//! Rolled Steel Section Catalog
//!
//! Nominal dimensions of common rolled steel profiles, keyed by
//! (section type, section size). The catalog is static, read-only data
//! consumed by the steel element normalizer and by the project catalog when
//! a rolled section is assigned to frame members.
//!
//! ## Supported Section Types
//!
//! - **IPE**: European I-beams
//! - **HEA / HEB**: European wide flange H-sections (light / standard)
//! - **W**: American wide flange shapes (metric designations)
//!
//! All dimensions are in millimeters.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::materials::steel::{BuiltinSteelCatalog, SteelCatalog};
//!
//! let catalog = BuiltinSteelCatalog;
//! let ipe200 = catalog.dimensions("IPE", "IPE200").unwrap();
//! assert_eq!(ipe200.depth, 200.0);
//! assert_eq!(ipe200.flange_thickness, 8.5);
//!
//! // Unknown pairs resolve to nothing rather than failing
//! assert!(catalog.dimensions("IPE", "IPE999").is_none());
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Rolled steel section family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelSectionType {
    /// European I-beam
    #[serde(rename = "IPE")]
    Ipe,
    /// European wide flange, light series
    #[serde(rename = "HEA")]
    Hea,
    /// European wide flange, standard series
    #[serde(rename = "HEB")]
    Heb,
    /// American wide flange
    W,
}

impl SteelSectionType {
    /// All section types for iteration
    pub const ALL: [SteelSectionType; 4] = [
        SteelSectionType::Ipe,
        SteelSectionType::Hea,
        SteelSectionType::Heb,
        SteelSectionType::W,
    ];

    /// Catalog code ("IPE", "HEA", ...)
    pub fn code(&self) -> &'static str {
        match self {
            SteelSectionType::Ipe => "IPE",
            SteelSectionType::Hea => "HEA",
            SteelSectionType::Heb => "HEB",
            SteelSectionType::W => "W",
        }
    }

    /// Parse from catalog code, case-insensitive
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "IPE" => Some(SteelSectionType::Ipe),
            "HEA" => Some(SteelSectionType::Hea),
            "HEB" => Some(SteelSectionType::Heb),
            "W" => Some(SteelSectionType::W),
            _ => None,
        }
    }
}

impl fmt::Display for SteelSectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Nominal dimensions of a rolled section (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelDimensions {
    /// Overall depth h
    pub depth: f64,
    /// Flange width b
    pub width: f64,
    /// Flange thickness tf
    pub flange_thickness: f64,
    /// Web thickness tw
    pub web_thickness: f64,
}

/// Read-only lookup from (section type, section size) to dimensions.
pub trait SteelCatalog {
    /// Dimensions for a section, or `None` if the pair is not cataloged
    fn dimensions(&self, section_type: &str, size: &str) -> Option<SteelDimensions>;

    /// Sizes available for a section type, in catalog order
    fn sizes(&self, section_type: &str) -> Vec<&str>;
}

/// The built-in static catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSteelCatalog;

/// (type, size, h, b, tf, tw)
type Row = (SteelSectionType, &'static str, f64, f64, f64, f64);

const SECTIONS: &[Row] = &[
    (SteelSectionType::Ipe, "IPE100", 100.0, 55.0, 5.7, 4.1),
    (SteelSectionType::Ipe, "IPE120", 120.0, 64.0, 6.3, 4.4),
    (SteelSectionType::Ipe, "IPE140", 140.0, 73.0, 6.9, 4.7),
    (SteelSectionType::Ipe, "IPE160", 160.0, 82.0, 7.4, 5.0),
    (SteelSectionType::Ipe, "IPE180", 180.0, 91.0, 8.0, 5.3),
    (SteelSectionType::Ipe, "IPE200", 200.0, 100.0, 8.5, 5.6),
    (SteelSectionType::Ipe, "IPE220", 220.0, 110.0, 9.2, 5.9),
    (SteelSectionType::Ipe, "IPE240", 240.0, 120.0, 9.8, 6.2),
    (SteelSectionType::Ipe, "IPE270", 270.0, 135.0, 10.2, 6.6),
    (SteelSectionType::Ipe, "IPE300", 300.0, 150.0, 10.7, 7.1),
    (SteelSectionType::Ipe, "IPE330", 330.0, 160.0, 11.5, 7.5),
    (SteelSectionType::Ipe, "IPE360", 360.0, 170.0, 12.7, 8.0),
    (SteelSectionType::Ipe, "IPE400", 400.0, 180.0, 13.5, 8.6),
    (SteelSectionType::Ipe, "IPE450", 450.0, 190.0, 14.6, 9.4),
    (SteelSectionType::Ipe, "IPE500", 500.0, 200.0, 16.0, 10.2),
    (SteelSectionType::Hea, "HEA100", 96.0, 100.0, 8.0, 5.0),
    (SteelSectionType::Hea, "HEA120", 114.0, 120.0, 8.0, 5.0),
    (SteelSectionType::Hea, "HEA140", 133.0, 140.0, 8.5, 5.5),
    (SteelSectionType::Hea, "HEA160", 152.0, 160.0, 9.0, 6.0),
    (SteelSectionType::Hea, "HEA180", 171.0, 180.0, 9.5, 6.0),
    (SteelSectionType::Hea, "HEA200", 190.0, 200.0, 10.0, 6.5),
    (SteelSectionType::Hea, "HEA220", 210.0, 220.0, 11.0, 7.0),
    (SteelSectionType::Hea, "HEA240", 230.0, 240.0, 12.0, 7.5),
    (SteelSectionType::Hea, "HEA260", 250.0, 260.0, 12.5, 7.5),
    (SteelSectionType::Hea, "HEA280", 270.0, 280.0, 13.0, 8.0),
    (SteelSectionType::Hea, "HEA300", 290.0, 300.0, 14.0, 8.5),
    (SteelSectionType::Heb, "HEB100", 100.0, 100.0, 10.0, 6.0),
    (SteelSectionType::Heb, "HEB120", 120.0, 120.0, 11.0, 6.5),
    (SteelSectionType::Heb, "HEB140", 140.0, 140.0, 12.0, 7.0),
    (SteelSectionType::Heb, "HEB160", 160.0, 160.0, 13.0, 8.0),
    (SteelSectionType::Heb, "HEB180", 180.0, 180.0, 14.0, 8.5),
    (SteelSectionType::Heb, "HEB200", 200.0, 200.0, 15.0, 9.0),
    (SteelSectionType::Heb, "HEB220", 220.0, 220.0, 16.0, 9.5),
    (SteelSectionType::Heb, "HEB240", 240.0, 240.0, 17.0, 10.0),
    (SteelSectionType::Heb, "HEB260", 260.0, 260.0, 17.5, 10.0),
    (SteelSectionType::Heb, "HEB280", 280.0, 280.0, 18.0, 10.5),
    (SteelSectionType::Heb, "HEB300", 300.0, 300.0, 19.0, 11.0),
    (SteelSectionType::W, "W200x46", 203.0, 203.0, 11.0, 7.2),
    (SteelSectionType::W, "W250x67", 257.0, 204.0, 15.7, 8.9),
    (SteelSectionType::W, "W310x97", 308.0, 305.0, 15.4, 9.9),
    (SteelSectionType::W, "W360x101", 357.0, 255.0, 18.3, 10.5),
    (SteelSectionType::W, "W410x60", 407.0, 178.0, 12.8, 7.7),
    (SteelSectionType::W, "W460x74", 457.0, 190.0, 14.5, 9.0),
];

/// Index keyed by (type, normalized size)
static INDEX: Lazy<HashMap<(SteelSectionType, String), SteelDimensions>> = Lazy::new(|| {
    SECTIONS
        .iter()
        .map(|&(section_type, size, depth, width, tf, tw)| {
            (
                (section_type, normalize_size(size)),
                SteelDimensions {
                    depth,
                    width,
                    flange_thickness: tf,
                    web_thickness: tw,
                },
            )
        })
        .collect()
});

/// Uppercase with whitespace removed, so "ipe 200" matches "IPE200"
fn normalize_size(size: &str) -> String {
    size.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

impl SteelCatalog for BuiltinSteelCatalog {
    fn dimensions(&self, section_type: &str, size: &str) -> Option<SteelDimensions> {
        let section_type = SteelSectionType::from_code(section_type)?;
        INDEX.get(&(section_type, normalize_size(size))).copied()
    }

    fn sizes(&self, section_type: &str) -> Vec<&str> {
        match SteelSectionType::from_code(section_type) {
            Some(wanted) => SECTIONS
                .iter()
                .filter(|row| row.0 == wanted)
                .map(|row| row.1)
                .collect(),
            None => Vec::new(),
        }
    }
}
