//! # Structural Graph
//!
//! The node / member / slab graph of a whole-structure analysis.
//!
//! ## Invariants
//!
//! - Every member references two distinct nodes that exist in the graph.
//!   Edits that would break this are rejected and leave the graph unchanged;
//!   removing a node removes the members attached to it.
//! - Identifiers come from per-kind counters and are never reused until
//!   [`StructuralGraph::reset`].
//! - No geometric validation: zero-length or overlapping members are the
//!   analysis service's concern.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::graph::{MemberKind, Point, StructuralGraph};
//!
//! let mut graph = StructuralGraph::new();
//! let a = graph.add_node(Point::new(0.0, 0.0));
//! let b = graph.add_node(Point::new(6.0, 0.0));
//! let m = graph.add_member(a, b, MemberKind::Beam, "300x600", "C25_FY420").unwrap();
//!
//! assert_eq!(m.to_string(), "M1");
//! assert!(graph.add_member(a, a, MemberKind::Beam, "300x600", "C25_FY420").is_err());
//!
//! graph.remove_node(b).unwrap();
//! assert_eq!(graph.member_count(), 0);
//! ```

pub mod entities;

pub use entities::{Member, MemberId, MemberKind, Node, NodeId, Point, Rect, Restraints, Slab, SlabId, Support};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{FrameError, FrameResult};
use crate::loads::MemberLoad;

/// Next identifier per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Counters {
    node: u32,
    member: u32,
    slab: u32,
}

impl Default for Counters {
    fn default() -> Self {
        Counters { node: 1, member: 1, slab: 1 }
    }
}

/// Node, member and slab graph of one structure.
///
/// Entities are kept in identifier order, so snapshots iterate in the order
/// entities were created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralGraph {
    nodes: BTreeMap<NodeId, Node>,
    members: BTreeMap<MemberId, Member>,
    slabs: BTreeMap<SlabId, Slab>,
    next: Counters,
}

impl StructuralGraph {
    pub fn new() -> Self {
        StructuralGraph::default()
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Add a free node
    pub fn add_node(&mut self, position: Point) -> NodeId {
        let id = NodeId(self.next.node);
        self.next.node += 1;
        self.nodes.insert(
            id,
            Node {
                id,
                x: position.x,
                y: position.y,
                support: Support::Free,
            },
        );
        debug!(node = %id, x = position.x, y = position.y, "node added");
        id
    }

    /// Remove a node and every member attached to it.
    ///
    /// Returns the ids of the members removed along with it.
    pub fn remove_node(&mut self, id: NodeId) -> FrameResult<Vec<MemberId>> {
        if self.nodes.remove(&id).is_none() {
            return Err(FrameError::unknown_node(id));
        }

        let attached: Vec<MemberId> = self
            .members
            .values()
            .filter(|m| m.references(id))
            .map(|m| m.id)
            .collect();
        for member in &attached {
            self.members.remove(member);
        }

        debug!(node = %id, cascaded = attached.len(), "node removed");
        Ok(attached)
    }

    pub fn set_support(&mut self, id: NodeId, support: Support) -> FrameResult<()> {
        let node = self.nodes.get_mut(&id).ok_or_else(|| FrameError::unknown_node(id))?;
        node.support = support;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    /// Connect two existing, distinct nodes.
    ///
    /// # Errors
    ///
    /// `DegenerateMember` when `n1 == n2`, `UnknownNode` when either end is
    /// missing. The graph is unchanged on error.
    pub fn add_member(
        &mut self,
        n1: NodeId,
        n2: NodeId,
        kind: MemberKind,
        section_id: impl Into<String>,
        material_id: impl Into<String>,
    ) -> FrameResult<MemberId> {
        if n1 == n2 {
            return Err(FrameError::degenerate_member(n1));
        }
        for end in [n1, n2] {
            if !self.nodes.contains_key(&end) {
                return Err(FrameError::unknown_node(end));
            }
        }

        let id = MemberId(self.next.member);
        self.next.member += 1;
        self.members.insert(
            id,
            Member {
                id,
                n1,
                n2,
                kind,
                section_id: section_id.into(),
                material_id: material_id.into(),
                loads: Vec::new(),
            },
        );
        debug!(member = %id, %n1, %n2, "member added");
        Ok(id)
    }

    pub fn remove_member(&mut self, id: MemberId) -> FrameResult<Member> {
        self.members
            .remove(&id)
            .ok_or_else(|| FrameError::UnknownMember { member: id.to_string() })
    }

    /// Append a load to a member's load list
    pub fn add_member_load(&mut self, id: MemberId, load: MemberLoad) -> FrameResult<()> {
        let member = self
            .members
            .get_mut(&id)
            .ok_or_else(|| FrameError::UnknownMember { member: id.to_string() })?;
        member.loads.push(load);
        Ok(())
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    // ------------------------------------------------------------------
    // Slabs
    // ------------------------------------------------------------------

    /// Add a slab panel (footprint and thickness in m)
    pub fn add_slab(&mut self, footprint: Rect, thickness: f64, material_id: impl Into<String>) -> SlabId {
        let id = SlabId(self.next.slab);
        self.next.slab += 1;
        self.slabs.insert(
            id,
            Slab {
                id,
                x: footprint.x,
                y: footprint.y,
                w: footprint.w,
                h: footprint.h,
                t: thickness,
                material_id: material_id.into(),
            },
        );
        debug!(slab = %id, "slab added");
        id
    }

    pub fn remove_slab(&mut self, id: SlabId) -> Option<Slab> {
        self.slabs.remove(&id)
    }

    pub fn slab(&self, id: SlabId) -> Option<&Slab> {
        self.slabs.get(&id)
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn slabs(&self) -> impl Iterator<Item = &Slab> {
        self.slabs.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn slab_count(&self) -> usize {
        self.slabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.members.is_empty() && self.slabs.is_empty()
    }

    /// Start a new structure: drop every entity and restart numbering
    pub fn reset(&mut self) {
        *self = StructuralGraph::default();
    }

    /// Verify that every member references two distinct existing nodes.
    ///
    /// Always `Ok` for a graph built through this API; useful after
    /// deserializing a graph from elsewhere.
    pub fn check_integrity(&self) -> FrameResult<()> {
        for member in self.members.values() {
            if member.n1 == member.n2 {
                return Err(FrameError::degenerate_member(member.n1));
            }
            for end in [member.n1, member.n2] {
                if !self.nodes.contains_key(&end) {
                    return Err(FrameError::unknown_node(end));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadType;

    fn two_nodes() -> (StructuralGraph, NodeId, NodeId) {
        let mut graph = StructuralGraph::new();
        let a = graph.add_node(Point::new(0.0, 0.0));
        let b = graph.add_node(Point::new(5.0, 0.0));
        (graph, a, b)
    }

    #[test]
    fn test_sequential_ids() {
        let (mut graph, a, b) = two_nodes();
        assert_eq!((a, b), (NodeId(1), NodeId(2)));
        assert_eq!(graph.add_slab(Rect::default(), 0.2, "C25_FY420"), SlabId(1));
        assert_eq!(graph.node(a).unwrap().support, Support::Free);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let (mut graph, _, b) = two_nodes();
        graph.remove_node(b).unwrap();
        let c = graph.add_node(Point::new(1.0, 1.0));
        assert_eq!(c, NodeId(3));
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let (mut graph, a, _) = two_nodes();
        let err = graph
            .add_member(a, NodeId(99), MemberKind::Beam, "300x600", "C25_FY420")
            .unwrap_err();
        assert_eq!(err, FrameError::unknown_node("N99"));
        assert_eq!(graph.member_count(), 0);

        // A rejected edit does not consume an id
        let (b, c) = (NodeId(2), graph.add_node(Point::new(0.0, 3.0)));
        let m = graph.add_member(b, c, MemberKind::Column, "300x600", "C25_FY420").unwrap();
        assert_eq!(m, MemberId(1));
    }

    #[test]
    fn test_self_loop_rejected() {
        let (mut graph, a, _) = two_nodes();
        let err = graph.add_member(a, a, MemberKind::Beam, "s", "m").unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_MEMBER");
        assert_eq!(graph.member_count(), 0);
    }

    #[test]
    fn test_remove_node_cascades() {
        let (mut graph, a, b) = two_nodes();
        let c = graph.add_node(Point::new(5.0, 3.0));
        let m1 = graph.add_member(a, b, MemberKind::Beam, "s", "m").unwrap();
        let m2 = graph.add_member(b, c, MemberKind::Column, "s", "m").unwrap();
        let m3 = graph.add_member(a, c, MemberKind::Brace, "s", "m").unwrap();

        let removed = graph.remove_node(b).unwrap();
        assert_eq!(removed, vec![m1, m2]);
        assert_eq!(graph.members().map(|m| m.id).collect::<Vec<_>>(), vec![m3]);
        graph.check_integrity().unwrap();

        assert!(graph.remove_node(b).is_err());
    }

    #[test]
    fn test_member_loads_keep_order() {
        let (mut graph, a, b) = two_nodes();
        let m = graph.add_member(a, b, MemberKind::Beam, "s", "m").unwrap();
        graph.add_member_load(m, MemberLoad::uniform(LoadType::Dead, 10.0)).unwrap();
        graph.add_member_load(m, MemberLoad::uniform(LoadType::Live, 4.0)).unwrap();

        let loads = &graph.member(m).unwrap().loads;
        assert_eq!(loads[0].load_type, LoadType::Dead);
        assert_eq!(loads[1].w, 4.0);

        let err = graph
            .add_member_load(MemberId(40), MemberLoad::uniform(LoadType::Dead, 1.0))
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MEMBER");
    }

    #[test]
    fn test_set_support() {
        let (mut graph, a, _) = two_nodes();
        graph.set_support(a, Support::Fixed).unwrap();
        assert_eq!(graph.node(a).unwrap().support, Support::Fixed);
        assert!(graph.set_support(NodeId(8), Support::Pinned).is_err());
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let (mut graph, a, b) = two_nodes();
        graph.add_member(a, b, MemberKind::Beam, "s", "m").unwrap();
        graph.reset();
        assert!(graph.is_empty());
        assert_eq!(graph.add_node(Point::default()), NodeId(1));
    }

    #[test]
    fn test_integrity_check_catches_foreign_graph() {
        let json = r#"{
            "nodes": {"N1": {"id": "N1", "x": 0.0, "y": 0.0, "support": "free"}},
            "members": {"M1": {"id": "M1", "n1": "N1", "n2": "N2", "type": "beam",
                               "sectionId": "s", "materialId": "m", "loads": []}},
            "slabs": {},
            "next": {"node": 2, "member": 2, "slab": 1}
        }"#;
        let graph: StructuralGraph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.check_integrity().unwrap_err(), FrameError::unknown_node("N2"));
    }
}
