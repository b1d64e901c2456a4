//! Graph entities and their identifiers
//!
//! Identifiers are small integers displayed and serialized with a kind
//! prefix: nodes `N1`, members `M1`, slabs `S1`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FrameError;
use crate::loads::MemberLoad;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(pub u32);

        impl $name {
            /// Prefix used in the wire form
            pub const PREFIX: &'static str = $prefix;
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = FrameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .strip_prefix($prefix)
                    .and_then(|n| n.parse::<u32>().ok())
                    .map($name)
                    .ok_or_else(|| FrameError::invalid_input("id", s, concat!("expected ", $prefix, "<number>")))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = FrameError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

entity_id!(
    /// Node identifier (`N1`, `N2`, ...)
    NodeId,
    "N"
);
entity_id!(
    /// Member identifier (`M1`, `M2`, ...)
    MemberId,
    "M"
);
entity_id!(
    /// Slab identifier (`S1`, `S2`, ...)
    SlabId,
    "S"
);

/// A position in model space (m)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned footprint in model space (m)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Restrained degrees of freedom of a custom support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Restraints {
    pub ux: bool,
    pub uy: bool,
    pub rz: bool,
}

/// Support condition of a node.
///
/// Wire form: `"free"`, `"pin"`, `"fix"`, `"roller"` or
/// `{"custom": {"ux": true, "uy": true, "rz": false}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    #[default]
    Free,
    #[serde(rename = "pin")]
    Pinned,
    #[serde(rename = "fix")]
    Fixed,
    Roller,
    Custom(Restraints),
}

impl Support {
    /// Restrained DOFs as (ux, uy, rz)
    pub fn restraints(&self) -> Restraints {
        match self {
            Support::Free => Restraints::default(),
            Support::Pinned => Restraints { ux: true, uy: true, rz: false },
            Support::Fixed => Restraints { ux: true, uy: true, rz: true },
            Support::Roller => Restraints { ux: false, uy: true, rz: false },
            Support::Custom(r) => *r,
        }
    }
}

impl FromStr for Support {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Support::Free),
            "pin" | "pinned" => Ok(Support::Pinned),
            "fix" | "fixed" => Ok(Support::Fixed),
            "roller" => Ok(Support::Roller),
            _ => Err(FrameError::invalid_input("support", s, "expected free, pin, fix or roller")),
        }
    }
}

/// Line element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    #[default]
    Beam,
    Column,
    Brace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub support: Support,
}

impl Node {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A line element between two distinct nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub n1: NodeId,
    pub n2: NodeId,
    #[serde(rename = "type")]
    pub kind: MemberKind,
    pub section_id: String,
    pub material_id: String,
    /// Applied loads, in the order they were added
    pub loads: Vec<MemberLoad>,
}

impl Member {
    pub fn references(&self, node: NodeId) -> bool {
        self.n1 == node || self.n2 == node
    }
}

/// A rectangular slab panel. Not connected to nodes or members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slab {
    pub id: SlabId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Thickness (m)
    pub t: f64,
    pub material_id: String,
}

impl Slab {
    pub fn footprint(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_parse() {
        assert_eq!(NodeId(3).to_string(), "N3");
        assert_eq!("M12".parse::<MemberId>().unwrap(), MemberId(12));
        assert!("N12".parse::<MemberId>().is_err());
        assert!("S".parse::<SlabId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_string() {
        assert_eq!(serde_json::to_string(&NodeId(7)).unwrap(), r#""N7""#);
        let id: SlabId = serde_json::from_str(r#""S2""#).unwrap();
        assert_eq!(id, SlabId(2));
        assert!(serde_json::from_str::<NodeId>(r#""X2""#).is_err());
    }

    #[test]
    fn test_support_wire_names() {
        assert_eq!(serde_json::to_string(&Support::Pinned).unwrap(), r#""pin""#);
        assert_eq!(serde_json::to_string(&Support::Fixed).unwrap(), r#""fix""#);
        let custom = Support::Custom(Restraints { ux: true, uy: false, rz: true });
        assert_eq!(
            serde_json::to_string(&custom).unwrap(),
            r#"{"custom":{"ux":true,"uy":false,"rz":true}}"#
        );
    }

    #[test]
    fn test_support_restraints() {
        assert_eq!(Support::Roller.restraints(), Restraints { ux: false, uy: true, rz: false });
        assert_eq!("Fixed".parse::<Support>().unwrap(), Support::Fixed);
    }

    #[test]
    fn test_member_wire_format() {
        let member = Member {
            id: MemberId(1),
            n1: NodeId(1),
            n2: NodeId(2),
            kind: MemberKind::Beam,
            section_id: "300x600".into(),
            material_id: "C25_FY420".into(),
            loads: vec![],
        };
        let json = serde_json::to_string(&member).unwrap();
        assert_eq!(
            json,
            r#"{"id":"M1","n1":"N1","n2":"N2","type":"beam","sectionId":"300x600","materialId":"C25_FY420","loads":[]}"#
        );
    }
}
