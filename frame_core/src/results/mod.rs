//! # Analysis Results
//!
//! Organizes a frame analysis response by load combination.
//!
//! ## Response Shape
//!
//! ```text
//! { "<combination>": {
//!     "name": "...", "expr": "...",              (optional)
//!     "displacements": { "N1": {"ux", "uy", "rz"} },
//!     "member_forces": { "M1": {"Nmax", "Vmax", "Mmax"} },
//!     "design":        { "M1": {"Mu", "Vu", "Nu", "As_required", ..., "Overall_OK"} }
//! } }
//! ```
//!
//! A missing sub-mapping is read as empty. Anything else that does not fit
//! this shape is a `MalformedResponse`.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::results::{DesignStatus, ResultSet};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "LC1": {
//!         "displacements": {"N2": {"ux": 0.00123456, "uy": -0.5, "rz": 0.0}},
//!         "member_forces": {"M1": {"Nmax": 12.345, "Vmax": 3.0, "Mmax": 45.678}},
//!         "design": {"M1": {"Mu": 45.678, "Overall_OK": true}}
//!     }
//! });
//!
//! let results = ResultSet::ingest(&raw).unwrap();
//! assert_eq!(results.combinations(), vec!["LC1"]);
//! assert_eq!(results.overall_status("LC1"), DesignStatus::Safe);
//!
//! let rows = results.select("LC1").unwrap().displacement_rows();
//! assert_eq!(rows[0].ux, "0.0012");
//! ```

pub mod element;

pub use element::{CheckStatus, ElementResponse, ElementVerdict, StructuralVerdict};

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{FrameError, FrameResult};

/// Nodal displacement (m, m, rad)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    pub ux: f64,
    pub uy: f64,
    pub rz: f64,
}

/// Extreme internal forces of a member (kN, kN, kN·m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    #[serde(rename = "Nmax")]
    pub n_max: f64,
    #[serde(rename = "Vmax")]
    pub v_max: f64,
    #[serde(rename = "Mmax")]
    pub m_max: f64,
}

/// Code check of one member. Every field is optional; the service reports
/// what applies to the member.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignCheck {
    #[serde(rename = "Mu", default, skip_serializing_if = "Option::is_none")]
    pub mu: Option<f64>,
    #[serde(rename = "Vu", default, skip_serializing_if = "Option::is_none")]
    pub vu: Option<f64>,
    #[serde(rename = "Nu", default, skip_serializing_if = "Option::is_none")]
    pub nu: Option<f64>,
    /// Required reinforcement area (mm²)
    #[serde(rename = "As_required", default, skip_serializing_if = "Option::is_none")]
    pub as_required: Option<f64>,
    /// Provided reinforcement area (mm²)
    #[serde(rename = "As_provided", default, skip_serializing_if = "Option::is_none")]
    pub as_provided: Option<f64>,
    #[serde(rename = "Shear_OK", default, skip_serializing_if = "Option::is_none")]
    pub shear_ok: Option<bool>,
    #[serde(rename = "Axial_OK", default, skip_serializing_if = "Option::is_none")]
    pub axial_ok: Option<bool>,
    #[serde(rename = "Overall_OK", default, skip_serializing_if = "Option::is_none")]
    pub overall_ok: Option<bool>,
}

/// Pass/fail summary of a load combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignStatus {
    Safe,
    Unsafe,
    /// No member in the combination carries an overall verdict
    Unknown,
}

impl DesignStatus {
    /// Fold per-member verdicts with logical AND; no verdicts is `Unknown`
    pub fn fold(verdicts: impl IntoIterator<Item = bool>) -> Self {
        let mut status = DesignStatus::Unknown;
        for ok in verdicts {
            if !ok {
                return DesignStatus::Unsafe;
            }
            status = DesignStatus::Safe;
        }
        status
    }
}

impl fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DesignStatus::Safe => "safe",
            DesignStatus::Unsafe => "unsafe",
            DesignStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Results of one load combination. Entries keep response order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationResult {
    /// Key in the response (e.g., "LC1")
    pub id: String,
    pub name: Option<String>,
    pub expr: Option<String>,
    pub displacements: Vec<(String, Displacement)>,
    pub member_forces: Vec<(String, MemberForces)>,
    pub design: Vec<(String, DesignCheck)>,
}

impl CombinationResult {
    fn from_value(id: &str, value: &Value) -> FrameResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| FrameError::malformed(format!("combination '{}' is not an object", id)))?;

        Ok(CombinationResult {
            id: id.to_string(),
            name: optional_string(obj, id, "name")?,
            expr: optional_string(obj, id, "expr")?,
            displacements: entries(obj, id, "displacements")?,
            member_forces: entries(obj, id, "member_forces")?,
            design: entries(obj, id, "design")?,
        })
    }

    pub fn displacement(&self, node: &str) -> Option<&Displacement> {
        lookup(&self.displacements, node)
    }

    pub fn forces(&self, member: &str) -> Option<&MemberForces> {
        lookup(&self.member_forces, member)
    }

    pub fn design_check(&self, member: &str) -> Option<&DesignCheck> {
        lookup(&self.design, member)
    }

    /// AND of every member's `Overall_OK`
    pub fn status(&self) -> DesignStatus {
        DesignStatus::fold(self.design.iter().filter_map(|(_, check)| check.overall_ok))
    }

    /// Members whose overall check failed
    pub fn failing_members(&self) -> Vec<&str> {
        self.design
            .iter()
            .filter(|(_, check)| check.overall_ok == Some(false))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn displacement_rows(&self) -> Vec<DisplacementRow> {
        self.displacements
            .iter()
            .map(|(node, d)| DisplacementRow {
                node: node.clone(),
                ux: format!("{:.4}", d.ux),
                uy: format!("{:.4}", d.uy),
                rz: format!("{:.4}", d.rz),
            })
            .collect()
    }

    pub fn force_rows(&self) -> Vec<ForceRow> {
        self.member_forces
            .iter()
            .map(|(member, f)| ForceRow {
                member: member.clone(),
                n_max: format!("{:.2}", f.n_max),
                v_max: format!("{:.2}", f.v_max),
                m_max: format!("{:.2}", f.m_max),
            })
            .collect()
    }

    pub fn design_rows(&self) -> Vec<DesignRow> {
        self.design
            .iter()
            .map(|(member, d)| DesignRow {
                member: member.clone(),
                mu: fixed2(d.mu),
                vu: fixed2(d.vu),
                nu: fixed2(d.nu),
                as_required: fixed2(d.as_required),
                as_provided: fixed2(d.as_provided),
                shear: verdict(d.shear_ok),
                axial: verdict(d.axial_ok),
                overall: verdict(d.overall_ok),
            })
            .collect()
    }
}

/// Display row: displacements to four decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplacementRow {
    pub node: String,
    pub ux: String,
    pub uy: String,
    pub rz: String,
}

/// Display row: forces to two decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForceRow {
    pub member: String,
    pub n_max: String,
    pub v_max: String,
    pub m_max: String,
}

/// Display row of a design check; absent values show as "-"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignRow {
    pub member: String,
    pub mu: String,
    pub vu: String,
    pub nu: String,
    pub as_required: String,
    pub as_provided: String,
    pub shear: String,
    pub axial: String,
    pub overall: String,
}

fn fixed2(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn verdict(value: Option<bool>) -> String {
    match value {
        Some(true) => "OK",
        Some(false) => "NG",
        None => "-",
    }
    .to_string()
}

fn lookup<'a, T>(entries: &'a [(String, T)], key: &str) -> Option<&'a T> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn optional_string(obj: &Map<String, Value>, combo: &str, key: &str) -> FrameResult<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FrameError::malformed(format!("{}.{} is not a string", combo, key))),
    }
}

/// Read a keyed sub-mapping; absent or null is empty
fn entries<T: DeserializeOwned>(obj: &Map<String, Value>, combo: &str, key: &str) -> FrameResult<Vec<(String, T)>> {
    let map = match obj.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(FrameError::malformed(format!("{}.{} is not an object", combo, key))),
    };

    map.iter()
        .map(|(id, value)| {
            T::deserialize(value)
                .map(|entry| (id.clone(), entry))
                .map_err(|e| FrameError::malformed(format!("{}.{}.{}: {}", combo, key, id, e)))
        })
        .collect()
}

/// All combinations of one analysis, in response order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    combinations: Vec<CombinationResult>,
}

impl ResultSet {
    /// Parse the per-combination result mapping
    pub fn ingest(raw: &Value) -> FrameResult<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| FrameError::malformed("results are not a mapping of combinations"))?;

        let combinations = obj
            .iter()
            .map(|(id, value)| CombinationResult::from_value(id, value))
            .collect::<FrameResult<Vec<_>>>()?;
        Ok(ResultSet { combinations })
    }

    /// Combination names in response order
    pub fn combinations(&self) -> Vec<&str> {
        self.combinations.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn select(&self, name: &str) -> Option<&CombinationResult> {
        self.combinations.iter().find(|c| c.id == name)
    }

    /// Status of a combination; `Unknown` if there is no such combination
    pub fn overall_status(&self, name: &str) -> DesignStatus {
        self.select(name)
            .map(CombinationResult::status)
            .unwrap_or(DesignStatus::Unknown)
    }

    /// First combination, the default selection
    pub fn first(&self) -> Option<&CombinationResult> {
        self.combinations.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombinationResult> {
        self.combinations.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }
}
