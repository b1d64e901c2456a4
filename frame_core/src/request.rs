//! # Analysis Requests
//!
//! The payloads sent to the analysis service:
//!
//! - [`AnalysisRequest`] - a whole structure (units, materials, sections,
//!   nodes, members, slabs and load combinations) for one design code
//! - [`ElementAnalysisRequest`] - one normalized element plus optional
//!   seismic parameters
//! - [`ReportRequest`] - a request echoed back with its result, for the
//!   report service
//!
//! Building is deterministic: the same graph, catalog and code always
//! serialize to the same bytes.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::codes::DesignCode;
//! use frame_core::graph::{MemberKind, Point, StructuralGraph};
//! use frame_core::project::{ProjectCatalog, DEFAULT_MATERIAL_ID, DEFAULT_SECTION_ID};
//! use frame_core::request::AnalysisRequest;
//!
//! let mut graph = StructuralGraph::new();
//! let a = graph.add_node(Point::new(0.0, 0.0));
//! let b = graph.add_node(Point::new(0.0, 3.0));
//! graph.add_member(a, b, MemberKind::Column, DEFAULT_SECTION_ID, DEFAULT_MATERIAL_ID).unwrap();
//!
//! let catalog = ProjectCatalog::default();
//! let first = AnalysisRequest::build(DesignCode::Bs, &graph, &catalog).unwrap();
//! let second = AnalysisRequest::build(DesignCode::Bs, &graph, &catalog).unwrap();
//!
//! assert_eq!(first.to_json_bytes().unwrap(), second.to_json_bytes().unwrap());
//! assert_eq!(first.loads.combinations.len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codes::DesignCode;
use crate::elements::{ElementInput, ElementKind};
use crate::errors::{FrameError, FrameResult};
use crate::graph::{Member, Node, Slab, StructuralGraph};
use crate::loads::{combinations_for, LoadCombination};
use crate::materials::{Material, Section};
use crate::project::ProjectCatalog;
use crate::seismic::SeismicParameters;
use crate::units::UnitSystem;

/// Load definitions of a frame request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadDefinitions {
    pub combinations: Vec<LoadCombination>,
}

/// A complete, self-contained frame analysis payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub code: DesignCode,
    pub units: UnitSystem,
    pub materials: Vec<Material>,
    pub sections: Vec<Section>,
    pub nodes: Vec<Node>,
    pub members: Vec<Member>,
    pub slabs: Vec<Slab>,
    pub loads: LoadDefinitions,
}

impl AnalysisRequest {
    /// Assemble a request from the graph and project catalog.
    ///
    /// Every catalog entry is included, in catalog order. Entities appear in
    /// identifier order and the load combinations are those of `code`.
    ///
    /// # Errors
    ///
    /// `MaterialNotFound` / `SectionNotFound` when a member or slab refers
    /// to an id missing from the catalog; `UnknownNode` / `DegenerateMember`
    /// if the graph itself is inconsistent.
    pub fn build(code: DesignCode, graph: &StructuralGraph, catalog: &ProjectCatalog) -> FrameResult<Self> {
        graph.check_integrity()?;

        for member in graph.members() {
            if catalog.section(&member.section_id).is_none() {
                return Err(FrameError::SectionNotFound {
                    section_id: member.section_id.clone(),
                });
            }
        }
        let material_refs = graph
            .members()
            .map(|m| &m.material_id)
            .chain(graph.slabs().map(|s| &s.material_id));
        for material_id in material_refs {
            if catalog.material(material_id).is_none() {
                return Err(FrameError::MaterialNotFound {
                    material_id: material_id.clone(),
                });
            }
        }

        Ok(AnalysisRequest {
            code,
            units: UnitSystem::default(),
            materials: catalog.materials().to_vec(),
            sections: catalog.sections().to_vec(),
            nodes: graph.nodes().cloned().collect(),
            members: graph.members().cloned().collect(),
            slabs: graph.slabs().cloned().collect(),
            loads: LoadDefinitions {
                combinations: combinations_for(code),
            },
        })
    }

    /// Serialized payload, as sent on the wire
    pub fn to_json_bytes(&self) -> FrameResult<Vec<u8>> {
        let bytes = serde_json::to_vec(self)?;
        info!(
            code = %self.code,
            nodes = self.nodes.len(),
            members = self.members.len(),
            slabs = self.slabs.len(),
            bytes = bytes.len(),
            "frame analysis request serialized"
        );
        Ok(bytes)
    }
}

/// A single-element analysis payload: `{code, element, data, seismic}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAnalysisRequest {
    pub code: DesignCode,
    pub element: ElementKind,
    pub data: ElementInput,
    /// `null` when no seismic check is requested
    pub seismic: Option<SeismicParameters>,
}

impl ElementAnalysisRequest {
    pub fn new(code: DesignCode, data: ElementInput, seismic: Option<SeismicParameters>) -> Self {
        ElementAnalysisRequest {
            code,
            element: data.kind(),
            data,
            seismic,
        }
    }
}

/// Report payload: the request exactly as analyzed, plus its raw result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRequest<'a, D: Serialize> {
    pub data: &'a D,
    pub result: &'a serde_json::Value,
}

impl<'a, D: Serialize> ReportRequest<'a, D> {
    pub fn new(data: &'a D, result: &'a serde_json::Value) -> Self {
        ReportRequest { data, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{normalize, RawFields};
    use crate::graph::{MemberKind, Point, Rect};
    use crate::materials::BuiltinSteelCatalog;
    use crate::project::{DEFAULT_MATERIAL_ID, DEFAULT_SECTION_ID};
    use serde_json::json;

    fn portal() -> StructuralGraph {
        let mut graph = StructuralGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(0.0, 3.0));
        let c = graph.add_node(Point::new(6.0, 3.0));
        graph.add_member(a, b, MemberKind::Column, DEFAULT_SECTION_ID, DEFAULT_MATERIAL_ID).unwrap();
        graph.add_member(b, c, MemberKind::Beam, DEFAULT_SECTION_ID, DEFAULT_MATERIAL_ID).unwrap();
        graph
    }

    #[test]
    fn test_request_shape() {
        let mut graph = portal();
        graph.add_slab(Rect { x: 5.0, y: 5.0, w: 4.0, h: 2.0 }, 0.2, DEFAULT_MATERIAL_ID);
        let request = AnalysisRequest::build(DesignCode::Aci, &graph, &ProjectCatalog::default()).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["code", "units", "materials", "sections", "nodes", "members", "slabs", "loads"]);
        assert_eq!(value["code"], "ACI");
        assert_eq!(value["units"], json!({"length": "m", "force": "kN"}));
        assert_eq!(value["nodes"][1], json!({"id": "N2", "x": 0.0, "y": 3.0, "support": "free"}));
        assert_eq!(value["members"][1]["n1"], "N2");
        assert_eq!(value["slabs"][0]["materialId"], DEFAULT_MATERIAL_ID);
        assert_eq!(value["loads"]["combinations"][1], json!({"id": "LC2", "name": "1.2D+1.6L", "expr": "1.2D+1.6L"}));
    }

    #[test]
    fn test_build_is_deterministic() {
        let graph = portal();
        let catalog = ProjectCatalog::default();
        let a = AnalysisRequest::build(DesignCode::Eurocode, &graph, &catalog).unwrap();
        let b = AnalysisRequest::build(DesignCode::Eurocode, &graph.clone(), &catalog.clone()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_json_bytes().unwrap(), b.to_json_bytes().unwrap());
    }

    #[test]
    fn test_dangling_catalog_references() {
        let mut graph = portal();
        let n1 = graph.nodes().next().unwrap().id;
        let n3 = graph.nodes().last().unwrap().id;
        graph.add_member(n1, n3, MemberKind::Brace, "IPE200", DEFAULT_MATERIAL_ID).unwrap();

        let err = AnalysisRequest::build(DesignCode::Aci, &graph, &ProjectCatalog::default()).unwrap_err();
        assert_eq!(err, FrameError::SectionNotFound { section_id: "IPE200".into() });

        let mut graph = portal();
        graph.add_slab(Rect::default(), 0.25, "C40_FY500");
        let err = AnalysisRequest::build(DesignCode::Aci, &graph, &ProjectCatalog::default()).unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_empty_graph_still_valid() {
        let request =
            AnalysisRequest::build(DesignCode::Jordan, &StructuralGraph::new(), &ProjectCatalog::default()).unwrap();
        assert!(request.nodes.is_empty());
        assert_eq!(request.materials.len(), 1);
        assert_eq!(request.loads.combinations.len(), 1);
    }

    #[test]
    fn test_element_request_wire_format() {
        let form = RawFields::new()
            .with("width", "25")
            .with("depth", "50")
            .with("length", "4")
            .with("rebar_count", "3")
            .with("rebar_diameter", "14");
        let input = normalize(ElementKind::Beam, &form, "Egypt", &BuiltinSteelCatalog).unwrap();
        let request = ElementAnalysisRequest::new(DesignCode::Egypt, input, None);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["code"], "Egypt");
        assert_eq!(value["element"], "beam");
        assert_eq!(value["data"]["fy"], 360.0);
        assert!(value["seismic"].is_null());
    }

    #[test]
    fn test_report_echoes_request_bytes() {
        let request = AnalysisRequest::build(DesignCode::Aci, &portal(), &ProjectCatalog::default()).unwrap();
        let sent = request.to_json_bytes().unwrap();
        let result = json!({"LC1": {"displacements": {}, "member_forces": {}, "design": {}}});

        let report = serde_json::to_string(&ReportRequest::new(&request, &result)).unwrap();
        let sent = String::from_utf8(sent).unwrap();
        assert!(report.starts_with(&format!(r#"{{"data":{},"result":"#, sent)));
    }
}
