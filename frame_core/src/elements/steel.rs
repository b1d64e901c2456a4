//! Rolled steel beams and columns
//!
//! Steel member forms pick a section by (type, size) from a [`SteelCatalog`].
//! The resolved dimensions are advisory: an unknown pair leaves them empty
//! and normalization carries on.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fields::{FormOption, RawFields};
use crate::errors::FrameResult;
use crate::materials::{MaterialDefaults, SteelCatalog, SteelDimensions};
use crate::units::Millimeters;

/// Default effective length factor K
pub const DEFAULT_K_FACTOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SteelSupport {
    #[default]
    #[serde(rename = "Simply Supported")]
    SimplySupported,
    Fixed,
    Cantilever,
    Continuous,
}

impl FormOption for SteelSupport {
    const ALL: &'static [Self] = &[
        SteelSupport::SimplySupported,
        SteelSupport::Fixed,
        SteelSupport::Cantilever,
        SteelSupport::Continuous,
    ];

    fn label(&self) -> &'static str {
        match self {
            SteelSupport::SimplySupported => "Simply Supported",
            SteelSupport::Fixed => "Fixed",
            SteelSupport::Cantilever => "Cantilever",
            SteelSupport::Continuous => "Continuous",
        }
    }
}

/// End restraint of a steel column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryCondition {
    #[default]
    #[serde(rename = "Pinned-Pinned")]
    PinnedPinned,
    #[serde(rename = "Fixed-Fixed")]
    FixedFixed,
    #[serde(rename = "Fixed-Free")]
    FixedFree,
    Custom,
}

impl FormOption for BoundaryCondition {
    const ALL: &'static [Self] = &[
        BoundaryCondition::PinnedPinned,
        BoundaryCondition::FixedFixed,
        BoundaryCondition::FixedFree,
        BoundaryCondition::Custom,
    ];

    fn label(&self) -> &'static str {
        match self {
            BoundaryCondition::PinnedPinned => "Pinned-Pinned",
            BoundaryCondition::FixedFixed => "Fixed-Fixed",
            BoundaryCondition::FixedFree => "Fixed-Free",
            BoundaryCondition::Custom => "Custom",
        }
    }
}

/// Section chosen from the catalog, with whatever dimensions it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelSectionChoice {
    pub section_type: String,
    pub section_size: String,
    /// `None` when the (type, size) pair is not cataloged
    pub dimensions: Option<SteelDimensions>,
}

impl SteelSectionChoice {
    /// Fields: `section_type`, `section_size`. Never fails.
    pub fn from_fields(fields: &RawFields, catalog: &impl SteelCatalog) -> Self {
        let section_type = fields.text("section_type").unwrap_or_default();
        let section_size = fields.text("section_size").unwrap_or_default();
        let dimensions = catalog.dimensions(&section_type, &section_size);
        if dimensions.is_none() {
            debug!(%section_type, %section_size, "steel section not cataloged, dimensions left empty");
        }
        SteelSectionChoice {
            section_type,
            section_size,
            dimensions,
        }
    }

    /// Designation such as "IPE300", if a size was chosen
    pub fn designation(&self) -> Option<&str> {
        if self.section_size.is_empty() {
            None
        } else {
            Some(&self.section_size)
        }
    }
}

/// Normalized steel beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelBeamInput {
    #[serde(flatten)]
    pub section: SteelSectionChoice,
    /// Yield strength fy (MPa)
    pub steel_grade: f64,
    pub span: Millimeters,
    /// Uniform load (kN/m)
    pub uniform_load: f64,
    pub support_type: SteelSupport,
}

impl SteelBeamInput {
    /// Fields: `section_type`, `section_size`, `steel_grade`, `span`,
    /// `uniform_load`, `support_type`.
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults, catalog: &impl SteelCatalog) -> FrameResult<Self> {
        Ok(SteelBeamInput {
            section: SteelSectionChoice::from_fields(fields, catalog),
            steel_grade: fields.strength("steel_grade", defaults.fy)?,
            span: Millimeters(fields.required_positive("span")?),
            uniform_load: fields.required_f64("uniform_load")?,
            support_type: fields.option("support_type", Some(SteelSupport::SimplySupported))?,
        })
    }
}

/// Normalized steel column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelColumnInput {
    #[serde(flatten)]
    pub section: SteelSectionChoice,
    /// Yield strength fy (MPa)
    pub steel_grade: f64,
    /// Axial load (kN)
    pub axial_load: f64,
    pub length: Millimeters,
    pub k_factor: f64,
    pub boundary_condition: BoundaryCondition,
}

impl SteelColumnInput {
    /// Fields: `section_type`, `section_size`, `steel_grade`, `axial_load`,
    /// `length`, `k_factor`, `boundary_condition`.
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults, catalog: &impl SteelCatalog) -> FrameResult<Self> {
        Ok(SteelColumnInput {
            section: SteelSectionChoice::from_fields(fields, catalog),
            steel_grade: fields.strength("steel_grade", defaults.fy)?,
            axial_load: fields.load("axial_load"),
            length: Millimeters(fields.required_positive("length")?),
            k_factor: fields.positive_or("k_factor", DEFAULT_K_FACTOR)?,
            boundary_condition: fields.option("boundary_condition", Some(BoundaryCondition::PinnedPinned))?,
        })
    }

    /// Effective length K·L
    pub fn effective_length(&self) -> Millimeters {
        Millimeters(self.k_factor * self.length.0)
    }
}
