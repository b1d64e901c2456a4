//! Seismic parameters
//!
//! An element analysis may carry a seismic sub-form. The zone must be one of
//! the labels the design code defines ([`DesignCode::seismic_zones`]); a
//! blank zone means no seismic check is requested.
//!
//! ```
//! use frame_core::codes::DesignCode;
//! use frame_core::elements::RawFields;
//! use frame_core::seismic::{SeismicParameters, SoilClass};
//!
//! let form = RawFields::new()
//!     .with("zone", "2a")
//!     .with("soil", "rock")
//!     .with("importance", "normal")
//!     .with("system", "dual");
//!
//! let params = SeismicParameters::from_fields(&form, DesignCode::Jordan).unwrap().unwrap();
//! assert_eq!(params.zone, "2A");
//! assert_eq!(params.soil, SoilClass::Rock);
//!
//! assert!(SeismicParameters::from_fields(&RawFields::new(), DesignCode::Jordan).unwrap().is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::codes::DesignCode;
use crate::elements::{FormOption, RawFields};
use crate::errors::{FrameError, FrameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilClass {
    Rock,
    Medium,
    Soft,
}

impl FormOption for SoilClass {
    const ALL: &'static [Self] = &[SoilClass::Rock, SoilClass::Medium, SoilClass::Soft];

    fn label(&self) -> &'static str {
        match self {
            SoilClass::Rock => "rock",
            SoilClass::Medium => "medium",
            SoilClass::Soft => "soft",
        }
    }
}

/// Importance category of the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Normal,
    High,
}

impl FormOption for Importance {
    const ALL: &'static [Self] = &[Importance::Low, Importance::Normal, Importance::High];

    fn label(&self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Normal => "normal",
            Importance::High => "high",
        }
    }
}

/// Lateral force resisting system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateralSystem {
    MomentFrame,
    ShearWall,
    Dual,
}

impl FormOption for LateralSystem {
    const ALL: &'static [Self] = &[LateralSystem::MomentFrame, LateralSystem::ShearWall, LateralSystem::Dual];

    fn label(&self) -> &'static str {
        match self {
            LateralSystem::MomentFrame => "moment_frame",
            LateralSystem::ShearWall => "shear_wall",
            LateralSystem::Dual => "dual",
        }
    }
}

/// Normalized seismic sub-form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeismicParameters {
    /// Zone label exactly as the design code spells it
    pub zone: String,
    pub soil: SoilClass,
    pub importance: Importance,
    pub system: LateralSystem,
}

impl SeismicParameters {
    /// Fields: `zone`, `soil`, `importance`, `system`.
    ///
    /// Returns `Ok(None)` when the zone is blank. Once a zone is chosen the
    /// other three selections are required.
    pub fn from_fields(fields: &RawFields, code: DesignCode) -> FrameResult<Option<Self>> {
        let Some(raw_zone) = fields.get("zone") else {
            return Ok(None);
        };

        let zones = code.seismic_zones();
        let zone = zones
            .iter()
            .find(|z| z.eq_ignore_ascii_case(raw_zone))
            .ok_or_else(|| {
                FrameError::invalid_input(
                    "zone",
                    raw_zone,
                    format!("{} zones are: {}", code, zones.join(", ")),
                )
            })?;

        Ok(Some(SeismicParameters {
            zone: zone.to_string(),
            soil: fields.option("soil", None)?,
            importance: fields.option("importance", None)?,
            system: fields.option("system", None)?,
        }))
    }
}
