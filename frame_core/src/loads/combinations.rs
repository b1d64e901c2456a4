//! Per-code load combinations
//!
//! Every frame analysis request carries the load combinations of its design
//! code. A combination is identified by id (`LC1`, `LC2`, ...) and defined by
//! an expression such as `1.2D+1.6L`; the analysis service reports one
//! result set per combination id.
//!
//! ## Expression Syntax
//!
//! Terms are `<factor><code>` joined by `+` or `-`, where `<code>` is one of
//! the [`LoadType`] letters (G and Q are accepted as aliases for D and L).
//! An omitted factor means 1.0. Repeated load types are summed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use crate::codes::DesignCode;
use crate::errors::{FrameError, FrameResult};

/// A named load combination.
///
/// # Example
/// ```
/// use frame_core::loads::{LoadCombination, LoadType};
///
/// let combo = LoadCombination::new("LC2", "1.2D+1.6L", "1.2D+1.6L");
/// let factors = combo.factors().unwrap();
/// assert_eq!(factors[&LoadType::Dead], 1.2);
/// assert_eq!(combo.factor(LoadType::Wind), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "LC1")
    pub id: String,

    /// Display name (e.g., "1.35G+1.5Q")
    pub name: String,

    /// Factored expression (e.g., "1.35D+1.5L")
    pub expr: String,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(id: impl Into<String>, name: impl Into<String>, expr: impl Into<String>) -> Self {
        LoadCombination {
            id: id.into(),
            name: name.into(),
            expr: expr.into(),
        }
    }

    /// Load factors parsed from the expression
    pub fn factors(&self) -> FrameResult<BTreeMap<LoadType, f64>> {
        parse_expression(&self.expr)
    }

    /// Factor for a single load type (0.0 if absent or the expression is invalid)
    pub fn factor(&self, load_type: LoadType) -> f64 {
        self.factors()
            .ok()
            .and_then(|factors| factors.get(&load_type).copied())
            .unwrap_or(0.0)
    }
}

/// Parse a combination expression into per-load-type factors.
///
/// ```
/// use frame_core::loads::{parse_expression, LoadType};
///
/// let factors = parse_expression("0.9D - 1.0E").unwrap();
/// assert_eq!(factors[&LoadType::Dead], 0.9);
/// assert_eq!(factors[&LoadType::Seismic], -1.0);
/// ```
pub fn parse_expression(expr: &str) -> FrameResult<BTreeMap<LoadType, f64>> {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut factors = BTreeMap::new();

    for term in compact.replace('-', "+-").split('+') {
        if term.is_empty() {
            continue;
        }
        let code_start = term
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| FrameError::invalid_input("expr", expr, format!("term '{}' has no load code", term)))?;
        let (factor_str, code) = term.split_at(code_start);

        let load_type = LoadType::from_code(code)
            .ok_or_else(|| FrameError::invalid_input("expr", expr, format!("unknown load code '{}'", code)))?;

        let factor = match factor_str {
            "" => 1.0,
            "-" => -1.0,
            s => s
                .parse::<f64>()
                .map_err(|_| FrameError::invalid_input("expr", expr, format!("invalid factor '{}'", s)))?,
        };

        *factors.entry(load_type).or_insert(0.0) += factor;
    }

    if factors.is_empty() {
        return Err(FrameError::invalid_input("expr", expr, "expression has no terms"));
    }
    Ok(factors)
}

/// Load combinations for a design code.
///
/// ACI, BS and Eurocode have their own sets; every other code uses a single
/// unfactored dead load combination.
pub fn combinations_for(code: DesignCode) -> Vec<LoadCombination> {
    match code {
        DesignCode::Aci => vec![
            LoadCombination::new("LC1", "1.4D", "1.4D"),
            LoadCombination::new("LC2", "1.2D+1.6L", "1.2D+1.6L"),
            LoadCombination::new("LC3", "1.2D+1.0L+1.0E", "1.2D+1.0L+1.0E"),
            LoadCombination::new("LC4", "0.9D+1.0E", "0.9D+1.0E"),
        ],
        DesignCode::Bs => vec![
            LoadCombination::new("LC1", "1.4D", "1.4D"),
            LoadCombination::new("LC2", "1.4D+1.6L", "1.4D+1.6L"),
            LoadCombination::new("LC3", "1.0D+1.0L+1.4W", "1.0D+1.0L+1.4W"),
        ],
        DesignCode::Eurocode => vec![
            LoadCombination::new("LC1", "1.35G+1.5Q", "1.35D+1.5L"),
            LoadCombination::new("LC2", "1.35G+1.5Q+1.5W", "1.35D+1.5L+1.5W"),
            LoadCombination::new("LC3", "0.9G+1.5E", "0.9D+1.5E"),
        ],
        DesignCode::As
        | DesignCode::Csa
        | DesignCode::Jordan
        | DesignCode::Turkey
        | DesignCode::Uae
        | DesignCode::Saudi
        | DesignCode::Egypt
        | DesignCode::Is => vec![LoadCombination::new("LC1", "1.0D", "1.0D")],
    }
}
