//! # Element Normalization
//!
//! Converts the raw strings of a single-element form into a typed
//! [`ElementInput`], one variant per element type.
//!
//! ## Rules
//!
//! - Required geometry that is blank or unparsable fails with a validation
//!   error naming the field. Nothing is submitted.
//! - Blank material strengths take the design code's default (fc, fy).
//!   Unknown codes fall back to a baseline pair; this lookup never fails.
//! - Blank load components are zero.
//! - Slabs validate only the fields of their sub-type (solid, hollow, waffle).
//! - Steel members resolve section dimensions from a catalog; an unknown
//!   section leaves them empty.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::elements::{normalize, ElementInput, ElementKind, RawFields};
//! use frame_core::materials::BuiltinSteelCatalog;
//!
//! let form = RawFields::new()
//!     .with("width", "30")
//!     .with("depth", "60")
//!     .with("length", "6")
//!     .with("rebar_count", "4")
//!     .with("rebar_diameter", "16");
//!
//! let input = normalize(ElementKind::Beam, &form, "Eurocode", &BuiltinSteelCatalog).unwrap();
//! match input {
//!     ElementInput::Beam(beam) => {
//!         assert_eq!(beam.strengths.fc, 30.0);
//!         assert_eq!(beam.strengths.fy, 500.0);
//!     }
//!     other => panic!("expected a beam, got {:?}", other.kind()),
//! }
//! ```

pub mod concrete;
pub mod fields;
pub mod steel;

pub use concrete::{
    BeamInput, BeamType, ColumnInput, ColumnType, FootingInput, FootingType, FoundationSoil, MaterialStrengths,
    SlabInput, SlabType, SlabVariant, StairType, StaircaseInput,
};
pub use fields::{FormOption, RawFields};
pub use steel::{BoundaryCondition, SteelBeamInput, SteelColumnInput, SteelSectionChoice, SteelSupport};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codes::material_defaults_for;
use crate::errors::{FrameError, FrameResult};
use crate::materials::SteelCatalog;

/// Element types that can be analyzed on their own.
///
/// Serializes to the identifier the analysis service dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Beam,
    Column,
    Slab,
    Footing,
    Staircase,
    SteelBeam,
    SteelColumn,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Beam,
        ElementKind::Column,
        ElementKind::Slab,
        ElementKind::Footing,
        ElementKind::Staircase,
        ElementKind::SteelBeam,
        ElementKind::SteelColumn,
    ];

    /// Wire identifier ("beam", "steel_column", ...)
    pub fn id(&self) -> &'static str {
        match self {
            ElementKind::Beam => "beam",
            ElementKind::Column => "column",
            ElementKind::Slab => "slab",
            ElementKind::Footing => "footing",
            ElementKind::Staircase => "staircase",
            ElementKind::SteelBeam => "steel_beam",
            ElementKind::SteelColumn => "steel_column",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ElementKind {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_");
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| FrameError::invalid_input("element", s, "unsupported element type"))
    }
}

/// A normalized single-element payload.
///
/// Serializes as the bare element record; the element type travels
/// separately (see [`crate::request::ElementAnalysisRequest`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementInput {
    Beam(BeamInput),
    Column(ColumnInput),
    Slab(SlabInput),
    Footing(FootingInput),
    Staircase(StaircaseInput),
    SteelBeam(SteelBeamInput),
    SteelColumn(SteelColumnInput),
}

impl ElementInput {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementInput::Beam(_) => ElementKind::Beam,
            ElementInput::Column(_) => ElementKind::Column,
            ElementInput::Slab(_) => ElementKind::Slab,
            ElementInput::Footing(_) => ElementKind::Footing,
            ElementInput::Staircase(_) => ElementKind::Staircase,
            ElementInput::SteelBeam(_) => ElementKind::SteelBeam,
            ElementInput::SteelColumn(_) => ElementKind::SteelColumn,
        }
    }
}

/// Normalize one element form for a design code.
///
/// `code` is the design code identifier as selected by the user; unknown
/// identifiers use the baseline material defaults.
pub fn normalize(
    kind: ElementKind,
    fields: &RawFields,
    code: &str,
    catalog: &impl SteelCatalog,
) -> FrameResult<ElementInput> {
    let defaults = material_defaults_for(code);
    debug!(element = %kind, code, fc = defaults.fc, fy = defaults.fy, "normalizing element form");

    let input = match kind {
        ElementKind::Beam => ElementInput::Beam(BeamInput::from_fields(fields, defaults)?),
        ElementKind::Column => ElementInput::Column(ColumnInput::from_fields(fields, defaults)?),
        ElementKind::Slab => ElementInput::Slab(SlabInput::from_fields(fields, defaults)?),
        ElementKind::Footing => ElementInput::Footing(FootingInput::from_fields(fields, defaults)?),
        ElementKind::Staircase => ElementInput::Staircase(StaircaseInput::from_fields(fields, defaults)?),
        ElementKind::SteelBeam => ElementInput::SteelBeam(SteelBeamInput::from_fields(fields, defaults, catalog)?),
        ElementKind::SteelColumn => {
            ElementInput::SteelColumn(SteelColumnInput::from_fields(fields, defaults, catalog)?)
        }
    };
    Ok(input)
}
