//! # Design Codes
//!
//! The regional and international structural standards the analysis service
//! understands. A design code governs three things on the client side:
//!
//! - default material strengths (fc, fy) when the user leaves them blank
//! - the load combinations sent with a frame analysis
//! - which seismic zone labels are valid
//!
//! Each of these lookups is total: every [`DesignCode`] has an entry, and
//! string lookups for unsupported codes fall back to a baseline instead of
//! failing.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::codes::DesignCode;
//!
//! let code: DesignCode = "eurocode".parse().unwrap();
//! assert_eq!(code, DesignCode::Eurocode);
//! assert_eq!(code.id(), "Eurocode");
//! assert_eq!(code.material_defaults().fc, 30.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FrameError;
use crate::materials::MaterialDefaults;

/// Supported design codes.
///
/// Serializes to the identifier the analysis service expects (`"ACI"`,
/// `"Eurocode"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DesignCode {
    /// ACI 318-19 (USA)
    #[default]
    #[serde(rename = "ACI")]
    Aci,
    /// AS 3600/4100 (Australia)
    #[serde(rename = "AS")]
    As,
    /// BS 8110/5950 (UK)
    #[serde(rename = "BS")]
    Bs,
    /// CSA A23.3 / S16 (Canada)
    #[serde(rename = "CSA")]
    Csa,
    /// Eurocode 2 & 3 (Europe)
    Eurocode,
    /// Jordanian code
    Jordan,
    /// Turkish code
    Turkey,
    /// UAE code
    #[serde(rename = "UAE")]
    Uae,
    /// Saudi code
    Saudi,
    /// Egyptian code
    Egypt,
    /// Indian Standards
    #[serde(rename = "IS")]
    Is,
}

impl DesignCode {
    /// All supported codes, in the order they are offered to the user
    pub const ALL: [DesignCode; 11] = [
        DesignCode::Aci,
        DesignCode::As,
        DesignCode::Bs,
        DesignCode::Csa,
        DesignCode::Eurocode,
        DesignCode::Jordan,
        DesignCode::Turkey,
        DesignCode::Uae,
        DesignCode::Saudi,
        DesignCode::Egypt,
        DesignCode::Is,
    ];

    /// Identifier used on the wire
    pub fn id(&self) -> &'static str {
        match self {
            DesignCode::Aci => "ACI",
            DesignCode::As => "AS",
            DesignCode::Bs => "BS",
            DesignCode::Csa => "CSA",
            DesignCode::Eurocode => "Eurocode",
            DesignCode::Jordan => "Jordan",
            DesignCode::Turkey => "Turkey",
            DesignCode::Uae => "UAE",
            DesignCode::Saudi => "Saudi",
            DesignCode::Egypt => "Egypt",
            DesignCode::Is => "IS",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignCode::Aci => "ACI 318-19 (USA)",
            DesignCode::As => "AS 3600/4100 (Australia)",
            DesignCode::Bs => "BS 8110/5950 (UK)",
            DesignCode::Csa => "CSA A23.3 / S16 (Canada)",
            DesignCode::Eurocode => "Eurocode 2 & 3 (Europe)",
            DesignCode::Jordan => "Jordanian Code",
            DesignCode::Turkey => "Turkish Code",
            DesignCode::Uae => "UAE Code",
            DesignCode::Saudi => "Saudi Code",
            DesignCode::Egypt => "Egyptian Code",
            DesignCode::Is => "Indian Standards",
        }
    }

    /// Case-insensitive lookup by identifier
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        DesignCode::ALL
            .iter()
            .copied()
            .find(|code| code.id().eq_ignore_ascii_case(id))
    }

    /// Default concrete and reinforcement strengths (MPa)
    pub fn material_defaults(&self) -> MaterialDefaults {
        let (fc, fy) = match self {
            DesignCode::Aci => (28.0, 420.0),
            DesignCode::Eurocode => (30.0, 500.0),
            DesignCode::Bs => (25.0, 460.0),
            DesignCode::Egypt => (25.0, 360.0),
            DesignCode::Jordan => (25.0, 420.0),
            DesignCode::Saudi => (30.0, 500.0),
            DesignCode::Uae => (30.0, 500.0),
            DesignCode::Is => (25.0, 415.0),
            DesignCode::As => (32.0, 500.0),
            DesignCode::Csa => (30.0, 400.0),
            DesignCode::Turkey => (30.0, 500.0),
        };
        MaterialDefaults { fc, fy }
    }

    /// Valid seismic zone labels for this code
    pub fn seismic_zones(&self) -> &'static [&'static str] {
        match self {
            DesignCode::Jordan => &["1", "2A", "2B", "3"],
            DesignCode::Egypt => &["1", "2", "3"],
            DesignCode::Saudi => &["A", "B", "C", "D1", "D2"],
            DesignCode::Uae => &["Zone 0", "Zone 1", "Zone 2A", "Zone 2B"],
            DesignCode::Turkey => &["1", "2", "3", "4"],
            DesignCode::Eurocode => &["low", "medium", "high"],
            DesignCode::Aci => &["1", "2", "3", "4"],
            DesignCode::As => &["A", "B", "C", "D"],
            DesignCode::Csa => &["low", "medium", "high"],
            DesignCode::Is => &["II", "III", "IV", "V"],
            DesignCode::Bs => &["low", "moderate", "high"],
        }
    }
}

impl fmt::Display for DesignCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for DesignCode {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DesignCode::from_id(s)
            .ok_or_else(|| FrameError::invalid_input("code", s, "unsupported design code"))
    }
}

/// Default material strengths for a code identifier.
///
/// Total over all inputs: unsupported or blank identifiers get
/// [`MaterialDefaults::BASELINE`].
pub fn material_defaults_for(code_id: &str) -> MaterialDefaults {
    DesignCode::from_id(code_id)
        .map(|code| code.material_defaults())
        .unwrap_or(MaterialDefaults::BASELINE)
}

/// Seismic zone labels for a code identifier (empty for unsupported codes)
pub fn seismic_zones_for(code_id: &str) -> &'static [&'static str] {
    DesignCode::from_id(code_id)
        .map(|code| code.seismic_zones())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_defaults() {
        for code in DesignCode::ALL {
            let defaults = code.material_defaults();
            assert!(defaults.fc > 0.0, "{} has no fc", code);
            assert!(defaults.fy > 0.0, "{} has no fy", code);
        }
    }

    #[test]
    fn test_every_code_has_seismic_zones() {
        for code in DesignCode::ALL {
            assert!(!code.seismic_zones().is_empty(), "{} has no zones", code);
        }
    }

    #[test]
    fn test_eurocode_defaults() {
        let defaults = material_defaults_for("Eurocode");
        assert_eq!(defaults.fc, 30.0);
        assert_eq!(defaults.fy, 500.0);
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(material_defaults_for("Martian"), MaterialDefaults::BASELINE);
        assert_eq!(material_defaults_for(""), MaterialDefaults::BASELINE);
        assert!(seismic_zones_for("Martian").is_empty());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(DesignCode::from_id("aci"), Some(DesignCode::Aci));
        assert_eq!(DesignCode::from_id(" EUROCODE "), Some(DesignCode::Eurocode));
        assert!("nope".parse::<DesignCode>().is_err());
    }

    #[test]
    fn test_wire_identifiers() {
        for code in DesignCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.id()));
            let roundtrip: DesignCode = serde_json::from_str(&json).unwrap();
            assert_eq!(roundtrip, code);
        }
    }
}
