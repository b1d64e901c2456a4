//! Interactive graph editing
//!
//! Pointer clicks arrive either on empty canvas or on an existing node.
//! Canvas clicks place nodes; node clicks drive the member-linking state
//! machine:
//!
//! | state        | click on            | effect                              |
//! |--------------|---------------------|-------------------------------------|
//! | `Idle`       | node `a`            | `Pending(a)`                        |
//! | `Pending(a)` | node `b`, `b != a`  | add member `a -> b`, back to `Idle` |
//! | `Pending(a)` | node `a`            | cancel, back to `Idle`              |
//! | any          | canvas              | place node, state unchanged         |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{FrameError, FrameResult};
use crate::graph::{MemberId, MemberKind, NodeId, Point, Rect, SlabId, StructuralGraph};
use crate::project::{DEFAULT_MATERIAL_ID, DEFAULT_SECTION_ID};

/// Model-space extent of the editing canvas (m)
pub const CANVAS_WIDTH_M: f64 = 20.0;
pub const CANVAS_HEIGHT_M: f64 = 10.0;

/// Affine map from canvas pixels to model meters.
///
/// The pixel rectangle `(0, 0) .. (width_px, height_px)` maps onto
/// `(0, 0) .. (model_width, model_height)`. Results are rounded to 0.01 m.
///
/// ```
/// use frame_core::session::CanvasTransform;
///
/// let t = CanvasTransform::new(800.0, 400.0);
/// let p = t.to_model(200.0, 100.0);
/// assert_eq!((p.x, p.y), (5.0, 2.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    pub width_px: f64,
    pub height_px: f64,
    pub model_width: f64,
    pub model_height: f64,
}

impl CanvasTransform {
    /// A canvas of the given pixel size over the standard 20 m x 10 m area
    pub fn new(width_px: f64, height_px: f64) -> Self {
        CanvasTransform {
            width_px,
            height_px,
            model_width: CANVAS_WIDTH_M,
            model_height: CANVAS_HEIGHT_M,
        }
    }

    pub fn to_model(&self, px: f64, py: f64) -> Point {
        Point::new(
            round_cm(px / self.width_px * self.model_width),
            round_cm(py / self.height_px * self.model_height),
        )
    }
}

impl Default for CanvasTransform {
    /// One pixel per centimeter
    fn default() -> Self {
        CanvasTransform::new(CANVAS_WIDTH_M * 100.0, CANVAS_HEIGHT_M * 100.0)
    }
}

fn round_cm(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Where a click landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "lowercase")]
pub enum ClickTarget {
    /// Empty canvas at pixel coordinates
    Canvas { x: f64, y: f64 },
    /// An existing node
    Node { id: NodeId },
}

/// Member-linking state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkState {
    #[default]
    Idle,
    Pending(NodeId),
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    NodePlaced(NodeId),
    LinkStarted(NodeId),
    MemberCreated(MemberId),
    LinkCancelled,
}

/// Properties given to members created by linking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberTemplate {
    pub kind: MemberKind,
    pub section_id: String,
    pub material_id: String,
}

impl Default for MemberTemplate {
    fn default() -> Self {
        MemberTemplate {
            kind: MemberKind::Beam,
            section_id: DEFAULT_SECTION_ID.to_string(),
            material_id: DEFAULT_MATERIAL_ID.to_string(),
        }
    }
}

/// Geometry of a slab inserted by [`EditingSession::place_slab`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabTemplate {
    pub footprint: Rect,
    pub thickness: f64,
    pub material_id: String,
}

impl Default for SlabTemplate {
    fn default() -> Self {
        SlabTemplate {
            footprint: Rect {
                x: 5.0,
                y: 5.0,
                w: 4.0,
                h: 2.0,
            },
            thickness: 0.2,
            material_id: DEFAULT_MATERIAL_ID.to_string(),
        }
    }
}

/// Click-driven editor over a [`StructuralGraph`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditingSession {
    pub transform: CanvasTransform,
    pub member_template: MemberTemplate,
    pub slab_template: SlabTemplate,
    link: LinkState,
}

impl EditingSession {
    pub fn new(transform: CanvasTransform) -> Self {
        EditingSession {
            transform,
            ..EditingSession::default()
        }
    }

    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Apply one click to the graph.
    ///
    /// A failed link (its first node was removed in the meantime) returns
    /// the error and drops back to `Idle`; the graph is unchanged.
    pub fn handle_click(&mut self, graph: &mut StructuralGraph, target: ClickTarget) -> FrameResult<EditOutcome> {
        match target {
            ClickTarget::Canvas { x, y } => {
                let id = graph.add_node(self.transform.to_model(x, y));
                Ok(EditOutcome::NodePlaced(id))
            }
            ClickTarget::Node { id } => {
                if !graph.contains_node(id) {
                    return Err(FrameError::unknown_node(id));
                }
                match self.link {
                    LinkState::Idle => {
                        self.link = LinkState::Pending(id);
                        debug!(node = %id, "link started");
                        Ok(EditOutcome::LinkStarted(id))
                    }
                    LinkState::Pending(first) if first == id => {
                        self.link = LinkState::Idle;
                        debug!(node = %id, "link cancelled");
                        Ok(EditOutcome::LinkCancelled)
                    }
                    LinkState::Pending(first) => {
                        self.link = LinkState::Idle;
                        let template = &self.member_template;
                        let member = graph.add_member(
                            first,
                            id,
                            template.kind,
                            template.section_id.clone(),
                            template.material_id.clone(),
                        )?;
                        Ok(EditOutcome::MemberCreated(member))
                    }
                }
            }
        }
    }

    /// Insert a slab with the template geometry
    pub fn place_slab(&self, graph: &mut StructuralGraph) -> SlabId {
        let template = &self.slab_template;
        graph.add_slab(template.footprint, template.thickness, template.material_id.clone())
    }

    /// Drop any pending link
    pub fn reset(&mut self) {
        self.link = LinkState::Idle;
    }
}
