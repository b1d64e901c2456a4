//! # Reinforced Concrete Elements
//!
//! Normalized inputs for the five concrete element forms: beam, column,
//! slab, footing and staircase. Each `*Input::from_fields` turns raw form
//! strings into a typed record, substituting the design-code default
//! strengths for blank `fc` / `fy`.
//!
//! ## Units
//!
//! Section dimensions, covers, spacings, slab and footing thickness and
//! staircase geometry are centimeters; spans and plan dimensions are meters;
//! bar diameters are millimeters.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::elements::{BeamInput, RawFields};
//! use frame_core::materials::MaterialDefaults;
//!
//! let fields = RawFields::new()
//!     .with("width", "30")
//!     .with("depth", "60")
//!     .with("length", "6")
//!     .with("rebar_count", "4")
//!     .with("rebar_diameter", "16")
//!     .with("dead", "15");
//!
//! let beam = BeamInput::from_fields(&fields, MaterialDefaults { fc: 30.0, fy: 500.0 }).unwrap();
//! assert_eq!(beam.strengths.fc, 30.0);
//! assert_eq!(beam.loads.dead, 15.0);
//! assert_eq!(beam.loads.live, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use super::fields::{FormOption, RawFields};
use crate::errors::FrameResult;
use crate::loads::{AxialLoads, LoadSet};
use crate::materials::MaterialDefaults;
use crate::units::{Centimeters, Meters, Millimeters};

/// Default concrete cover offered by the beam form (cm)
pub const DEFAULT_BEAM_COVER_CM: f64 = 3.0;

/// Concrete and reinforcement strengths after defaulting (MPa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialStrengths {
    pub fc: f64,
    pub fy: f64,
}

impl MaterialStrengths {
    /// Read `fc` and `fy`, taking `defaults` for blank fields
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults) -> FrameResult<Self> {
        Ok(MaterialStrengths {
            fc: fields.strength("fc", defaults.fc)?,
            fy: fields.strength("fy", defaults.fy)?,
        })
    }
}

fn load_set(fields: &RawFields) -> LoadSet {
    LoadSet {
        dead: fields.load("dead"),
        live: fields.load("live"),
        wind: fields.load("wind"),
        snow: fields.load("snow"),
    }
}

// ============================================================================
// Beam
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BeamType {
    #[default]
    Normal,
    Inverted,
    Tee,
    Prestressed,
}

impl FormOption for BeamType {
    const ALL: &'static [Self] = &[BeamType::Normal, BeamType::Inverted, BeamType::Tee, BeamType::Prestressed];

    fn label(&self) -> &'static str {
        match self {
            BeamType::Normal => "Normal",
            BeamType::Inverted => "Inverted",
            BeamType::Tee => "Tee",
            BeamType::Prestressed => "Prestressed",
        }
    }
}

/// Longitudinal bars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rebar {
    pub count: u32,
    pub diameter: Millimeters,
}

/// Normalized reinforced concrete beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    #[serde(rename = "type")]
    pub beam_type: BeamType,
    #[serde(flatten)]
    pub strengths: MaterialStrengths,
    pub width: Centimeters,
    pub depth: Centimeters,
    pub length: Meters,
    pub cover: Centimeters,
    pub rebar: Rebar,
    pub loads: LoadSet,
}

impl BeamInput {
    /// Fields: `type`, `fc`, `fy`, `width`, `depth`, `length`, `cover`,
    /// `rebar_count`, `rebar_diameter`, `dead`, `live`, `wind`, `snow`.
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults) -> FrameResult<Self> {
        Ok(BeamInput {
            beam_type: fields.option("type", Some(BeamType::Normal))?,
            strengths: MaterialStrengths::from_fields(fields, defaults)?,
            width: Centimeters(fields.required_positive("width")?),
            depth: Centimeters(fields.required_positive("depth")?),
            length: Meters(fields.required_positive("length")?),
            cover: Centimeters(fields.positive_or("cover", DEFAULT_BEAM_COVER_CM)?),
            rebar: Rebar {
                count: fields.required_count("rebar_count")?,
                diameter: Millimeters(fields.required_positive("rebar_diameter")?),
            },
            loads: load_set(fields),
        })
    }
}

// ============================================================================
// Column
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnType {
    #[default]
    Rectangular,
    Circular,
    Composite,
}

impl FormOption for ColumnType {
    const ALL: &'static [Self] = &[ColumnType::Rectangular, ColumnType::Circular, ColumnType::Composite];

    fn label(&self) -> &'static str {
        match self {
            ColumnType::Rectangular => "Rectangular",
            ColumnType::Circular => "Circular",
            ColumnType::Composite => "Composite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeometry {
    pub b: Centimeters,
    pub h: Centimeters,
    #[serde(rename = "L")]
    pub height: Meters,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReinforcement {
    pub bar_diameter: Millimeters,
    pub bar_count: u32,
    pub tie_spacing: Centimeters,
}

/// Normalized reinforced concrete column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub geometry: ColumnGeometry,
    pub reinforcement: ColumnReinforcement,
    pub materials: MaterialStrengths,
    pub loads: AxialLoads,
}

impl ColumnInput {
    /// Fields: `type`, `b`, `h`, `height`, `bar_diameter`, `bar_count`,
    /// `tie_spacing`, `fc`, `fy`, `axial`, `moment`.
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults) -> FrameResult<Self> {
        Ok(ColumnInput {
            column_type: fields.option("type", Some(ColumnType::Rectangular))?,
            geometry: ColumnGeometry {
                b: Centimeters(fields.required_positive("b")?),
                h: Centimeters(fields.required_positive("h")?),
                height: Meters(fields.required_positive("height")?),
            },
            reinforcement: ColumnReinforcement {
                bar_diameter: Millimeters(fields.required_positive("bar_diameter")?),
                bar_count: fields.required_count("bar_count")?,
                tie_spacing: Centimeters(fields.required_positive("tie_spacing")?),
            },
            materials: MaterialStrengths::from_fields(fields, defaults)?,
            loads: AxialLoads {
                axial: fields.load("axial"),
                moment: fields.load("moment"),
            },
        })
    }
}

// ============================================================================
// Slab
// ============================================================================

/// Slab sub-type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlabType {
    #[default]
    Solid,
    Hollow,
    Waffle,
}

impl FormOption for SlabType {
    const ALL: &'static [Self] = &[SlabType::Solid, SlabType::Hollow, SlabType::Waffle];

    fn label(&self) -> &'static str {
        match self {
            SlabType::Solid => "solid",
            SlabType::Hollow => "hollow",
            SlabType::Waffle => "waffle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HollowBlock {
    pub height: Centimeters,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaffleRibs {
    pub rib_width: Centimeters,
    pub rib_spacing: Centimeters,
}

/// Sub-type specific slab fields.
///
/// Serialized inline with the slab, tagged by `"type"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlabVariant {
    #[serde(rename_all = "camelCase")]
    Solid { top_bar_count: u32, bottom_bar_count: u32 },
    #[serde(rename_all = "camelCase")]
    Hollow {
        #[serde(skip_serializing_if = "Option::is_none")]
        bottom_bar_count: Option<u32>,
        block: HollowBlock,
    },
    #[serde(rename_all = "camelCase")]
    Waffle {
        #[serde(skip_serializing_if = "Option::is_none")]
        bottom_bar_count: Option<u32>,
        waffle: WaffleRibs,
    },
}

impl SlabVariant {
    pub fn slab_type(&self) -> SlabType {
        match self {
            SlabVariant::Solid { .. } => SlabType::Solid,
            SlabVariant::Hollow { .. } => SlabType::Hollow,
            SlabVariant::Waffle { .. } => SlabType::Waffle,
        }
    }

    /// Read only the fields the given sub-type needs
    fn from_fields(slab_type: SlabType, fields: &RawFields) -> FrameResult<Self> {
        Ok(match slab_type {
            SlabType::Solid => SlabVariant::Solid {
                top_bar_count: fields.required_count("top_bar_count")?,
                bottom_bar_count: fields.required_count("bottom_bar_count")?,
            },
            SlabType::Hollow => SlabVariant::Hollow {
                bottom_bar_count: fields.optional_count("bottom_bar_count")?,
                block: HollowBlock {
                    height: Centimeters(fields.required_positive("block_height")?),
                },
            },
            SlabType::Waffle => SlabVariant::Waffle {
                bottom_bar_count: fields.optional_count("bottom_bar_count")?,
                waffle: WaffleRibs {
                    rib_width: Centimeters(fields.required_positive("rib_width")?),
                    rib_spacing: Centimeters(fields.required_positive("rib_spacing")?),
                },
            },
        })
    }
}

/// Normalized reinforced concrete slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabInput {
    pub thickness: Centimeters,
    pub length: Meters,
    pub width: Meters,
    #[serde(flatten)]
    pub strengths: MaterialStrengths,
    pub bar_diameter: Millimeters,
    pub loads: LoadSet,
    #[serde(flatten)]
    pub variant: SlabVariant,
}

impl SlabInput {
    /// Fields: `type` (solid | hollow | waffle), `thickness`, `length`,
    /// `width`, `fc`, `fy`, `bar_diameter`, loads, plus per sub-type
    /// `top_bar_count` + `bottom_bar_count` (solid), `block_height`
    /// (hollow) or `rib_width` + `rib_spacing` (waffle).
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults) -> FrameResult<Self> {
        let slab_type = fields.option("type", Some(SlabType::Solid))?;
        let thickness = Centimeters(fields.required_positive("thickness")?);
        let length = Meters(fields.required_positive("length")?);
        let width = Meters(fields.required_positive("width")?);
        let bar_diameter = Millimeters(fields.required_positive("bar_diameter")?);
        let strengths = MaterialStrengths::from_fields(fields, defaults)?;

        Ok(SlabInput {
            thickness,
            length,
            width,
            strengths,
            bar_diameter,
            loads: load_set(fields),
            variant: SlabVariant::from_fields(slab_type, fields)?,
        })
    }

    pub fn slab_type(&self) -> SlabType {
        self.variant.slab_type()
    }
}

// ============================================================================
// Footing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FootingType {
    #[default]
    Isolated,
    Combined,
    Strip,
    Raft,
}

impl FormOption for FootingType {
    const ALL: &'static [Self] = &[FootingType::Isolated, FootingType::Combined, FootingType::Strip, FootingType::Raft];

    fn label(&self) -> &'static str {
        match self {
            FootingType::Isolated => "Isolated",
            FootingType::Combined => "Combined",
            FootingType::Strip => "Strip",
            FootingType::Raft => "Raft",
        }
    }
}

/// Founding soil under a footing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundationSoil {
    Rock,
    Sand,
    Clay,
    Mixed,
}

impl FormOption for FoundationSoil {
    const ALL: &'static [Self] = &[FoundationSoil::Rock, FoundationSoil::Sand, FoundationSoil::Clay, FoundationSoil::Mixed];

    fn label(&self) -> &'static str {
        match self {
            FoundationSoil::Rock => "rock",
            FoundationSoil::Sand => "sand",
            FoundationSoil::Clay => "clay",
            FoundationSoil::Mixed => "mixed",
        }
    }
}

/// Normalized spread footing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootingInput {
    #[serde(rename = "type")]
    pub footing_type: FootingType,
    pub length: Meters,
    pub width: Meters,
    pub thickness: Centimeters,
    /// Column load P (kN)
    pub column_load: f64,
    pub rebar_diameter: Millimeters,
    pub rebar_spacing: Centimeters,
    #[serde(flatten)]
    pub strengths: MaterialStrengths,
    pub soil_type: FoundationSoil,
}

impl FootingInput {
    /// Fields: `type`, `length`, `width`, `thickness`, `column_load`,
    /// `rebar_diameter`, `rebar_spacing`, `fc`, `fy`, `soil_type`.
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults) -> FrameResult<Self> {
        Ok(FootingInput {
            footing_type: fields.option("type", Some(FootingType::Isolated))?,
            length: Meters(fields.required_positive("length")?),
            width: Meters(fields.required_positive("width")?),
            thickness: Centimeters(fields.required_positive("thickness")?),
            column_load: fields.required_f64("column_load")?,
            rebar_diameter: Millimeters(fields.required_positive("rebar_diameter")?),
            rebar_spacing: Centimeters(fields.required_positive("rebar_spacing")?),
            strengths: MaterialStrengths::from_fields(fields, defaults)?,
            soil_type: fields.option("soil_type", None)?,
        })
    }
}

// ============================================================================
// Staircase
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StairType {
    #[default]
    Straight,
    #[serde(rename = "L-Shaped")]
    LShaped,
    Spiral,
}

impl FormOption for StairType {
    const ALL: &'static [Self] = &[StairType::Straight, StairType::LShaped, StairType::Spiral];

    fn label(&self) -> &'static str {
        match self {
            StairType::Straight => "Straight",
            StairType::LShaped => "L-Shaped",
            StairType::Spiral => "Spiral",
        }
    }
}

/// Normalized staircase flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseInput {
    #[serde(rename = "type")]
    pub stair_type: StairType,
    pub width: Centimeters,
    pub riser: Centimeters,
    pub tread: Centimeters,
    pub steps: u32,
    pub thickness: Centimeters,
    pub rebar: Millimeters,
    #[serde(flatten)]
    pub strengths: MaterialStrengths,
    pub loads: LoadSet,
}

impl StaircaseInput {
    /// Fields: `type`, `width`, `riser`, `tread`, `steps`, `thickness`,
    /// `rebar_diameter`, `fc`, `fy`, `dead`, `live`, `wind`.
    pub fn from_fields(fields: &RawFields, defaults: MaterialDefaults) -> FrameResult<Self> {
        Ok(StaircaseInput {
            stair_type: fields.option("type", Some(StairType::Straight))?,
            width: Centimeters(fields.required_positive("width")?),
            riser: Centimeters(fields.required_positive("riser")?),
            tread: Centimeters(fields.required_positive("tread")?),
            steps: fields.required_count("steps")?,
            thickness: Centimeters(fields.required_positive("thickness")?),
            rebar: Millimeters(fields.required_positive("rebar_diameter")?),
            strengths: MaterialStrengths::from_fields(fields, defaults)?,
            // The staircase form has no snow load
            loads: LoadSet {
                snow: 0.0,
                ..load_set(fields)
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FrameError;

    const ACI: MaterialDefaults = MaterialDefaults { fc: 28.0, fy: 420.0 };

    fn slab_fields(slab_type: &str) -> RawFields {
        RawFields::new()
            .with("type", slab_type)
            .with("thickness", "20")
            .with("length", "5")
            .with("width", "4")
            .with("bar_diameter", "12")
    }

    #[test]
    fn test_beam_defaults() {
        let fields = RawFields::new()
            .with("width", "30")
            .with("depth", "60")
            .with("length", "6")
            .with("rebar_count", "3")
            .with("rebar_diameter", "16");
        let beam = BeamInput::from_fields(&fields, ACI).unwrap();
        assert_eq!(beam.beam_type, BeamType::Normal);
        assert_eq!(beam.strengths, MaterialStrengths { fc: 28.0, fy: 420.0 });
        assert_eq!(beam.cover, Centimeters(DEFAULT_BEAM_COVER_CM));
        assert_eq!(beam.loads, LoadSet::default());
    }

    #[test]
    fn test_beam_missing_geometry() {
        let fields = RawFields::new().with("width", "30").with("length", "6");
        let err = BeamInput::from_fields(&fields, ACI).unwrap_err();
        assert_eq!(err, FrameError::missing_field("depth"));
    }

    #[test]
    fn test_beam_wire_format() {
        let fields = RawFields::new()
            .with("type", "tee")
            .with("width", "30")
            .with("depth", "60")
            .with("length", "6")
            .with("rebar_count", "3")
            .with("rebar_diameter", "16");
        let beam = BeamInput::from_fields(&fields, ACI).unwrap();
        let json = serde_json::to_value(&beam).unwrap();
        assert_eq!(json["type"], "Tee");
        assert_eq!(json["fc"], 28.0);
        assert_eq!(json["rebar"]["count"], 3);
        assert_eq!(json["loads"]["snow"], 0.0);
    }

    #[test]
    fn test_column_loads_default_to_zero() {
        let fields = RawFields::new()
            .with("b", "40")
            .with("h", "40")
            .with("height", "3")
            .with("bar_diameter", "20")
            .with("bar_count", "8")
            .with("tie_spacing", "15")
            .with("moment", "12");
        let column = ColumnInput::from_fields(&fields, ACI).unwrap();
        assert_eq!(column.loads, AxialLoads { axial: 0.0, moment: 12.0 });

        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["geometry"]["L"], 3.0);
        assert_eq!(json["reinforcement"]["tieSpacing"], 15.0);
        assert_eq!(json["materials"]["fy"], 420.0);
    }

    #[test]
    fn test_solid_slab_requires_bar_counts() {
        let err = SlabInput::from_fields(&slab_fields("solid"), ACI).unwrap_err();
        assert_eq!(err, FrameError::missing_field("top_bar_count"));

        let fields = slab_fields("solid").with("top_bar_count", "5").with("bottom_bar_count", "7");
        let slab = SlabInput::from_fields(&fields, ACI).unwrap();
        assert_eq!(slab.slab_type(), SlabType::Solid);
    }

    #[test]
    fn test_hollow_slab_requires_block_height_only() {
        let err = SlabInput::from_fields(&slab_fields("hollow"), ACI).unwrap_err();
        assert_eq!(err.field(), Some("block_height"));

        let slab = SlabInput::from_fields(&slab_fields("hollow").with("block_height", "17"), ACI).unwrap();
        let json = serde_json::to_value(&slab).unwrap();
        assert_eq!(json["type"], "hollow");
        assert_eq!(json["block"]["height"], 17.0);
        assert!(json.get("bottomBarCount").is_none());
        assert!(json.get("ribWidth").is_none());
    }

    #[test]
    fn test_waffle_slab_scoped_validation() {
        // Solid-only fields are not demanded from a waffle slab
        let fields = slab_fields("waffle").with("rib_spacing", "60");
        let err = SlabInput::from_fields(&fields, ACI).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("rib_width"));

        let fields = fields.with("rib_width", "12").with("bottom_bar_count", "2");
        let slab = SlabInput::from_fields(&fields, ACI).unwrap();
        let json = serde_json::to_value(&slab).unwrap();
        assert_eq!(json["waffle"]["ribWidth"], 12.0);
        assert_eq!(json["bottomBarCount"], 2);
        assert_eq!(json["barDiameter"], 12.0);
    }

    #[test]
    fn test_unknown_slab_type() {
        let err = SlabInput::from_fields(&slab_fields("ribbed"), ACI).unwrap_err();
        assert_eq!(err.field(), Some("type"));
    }

    #[test]
    fn test_footing_requires_soil() {
        let fields = RawFields::new()
            .with("length", "2")
            .with("width", "2")
            .with("thickness", "50")
            .with("column_load", "900")
            .with("rebar_diameter", "16")
            .with("rebar_spacing", "15");
        let err = FootingInput::from_fields(&fields, ACI).unwrap_err();
        assert_eq!(err, FrameError::missing_field("soil_type"));

        let footing = FootingInput::from_fields(&fields.with("soil_type", "Clay"), ACI).unwrap();
        assert_eq!(footing.soil_type, FoundationSoil::Clay);
        let json = serde_json::to_value(&footing).unwrap();
        assert_eq!(json["soilType"], "clay");
        assert_eq!(json["columnLoad"], 900.0);
    }

    #[test]
    fn test_staircase_ignores_snow() {
        let fields = RawFields::new()
            .with("type", "l-shaped")
            .with("width", "120")
            .with("riser", "17")
            .with("tread", "28")
            .with("steps", "12")
            .with("thickness", "15")
            .with("rebar_diameter", "12")
            .with("live", "3")
            .with("snow", "9");
        let stair = StaircaseInput::from_fields(&fields, ACI).unwrap();
        assert_eq!(stair.stair_type, StairType::LShaped);
        assert_eq!(stair.loads.live, 3.0);
        assert_eq!(stair.loads.snow, 0.0);
    }
}
