//! Scripted editing sessions
//!
//! A frame script is a JSON file replayed against a [`Session`]:
//!
//! ```json
//! {
//!   "code": "ACI",
//!   "actions": [
//!     {"click": {"on": "canvas", "x": 0, "y": 1000}},
//!     {"click": {"on": "canvas", "x": 0, "y": 700}},
//!     {"click": {"on": "node", "id": "N1"}},
//!     {"click": {"on": "node", "id": "N2"}},
//!     {"support": {"node": "N1", "support": "fix"}},
//!     {"load": {"member": "M1", "type": "D", "w": 12.5}},
//!     "slab"
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use frame_core::codes::DesignCode;
use frame_core::graph::{MemberId, NodeId, SlabId, Support};
use frame_core::loads::{LoadType, MemberLoad};
use frame_core::session::{ClickTarget, Session};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct FrameScript {
    /// Overrides the configured design code
    #[serde(default)]
    pub code: Option<DesignCode>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Click(ClickTarget),
    Slab,
    Support { node: NodeId, support: Support },
    Load {
        member: MemberId,
        #[serde(rename = "type")]
        load_type: LoadType,
        w: f64,
    },
    RemoveNode(NodeId),
    RemoveMember(MemberId),
    RemoveSlab(SlabId),
    Reset,
}

impl FrameScript {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing frame script {}", path.display()))
    }

    /// Replay every action. Edit errors are logged and skipped, the way a
    /// rejected click leaves the editor unchanged.
    pub fn replay(&self, session: &mut Session) {
        for (index, action) in self.actions.iter().enumerate() {
            if let Err(e) = apply(session, action) {
                warn!(index, code = e.error_code(), %e, "action rejected");
            }
        }
        debug!(
            nodes = session.graph.node_count(),
            members = session.graph.member_count(),
            slabs = session.graph.slab_count(),
            "script replayed"
        );
    }
}

fn apply(session: &mut Session, action: &Action) -> frame_core::FrameResult<()> {
    match action {
        Action::Click(target) => {
            session.click(*target)?;
        }
        Action::Slab => {
            session.place_slab();
        }
        Action::Support { node, support } => session.graph.set_support(*node, *support)?,
        Action::Load { member, load_type, w } => {
            session.graph.add_member_load(*member, MemberLoad::uniform(*load_type, *w))?
        }
        Action::RemoveNode(id) => {
            session.graph.remove_node(*id)?;
        }
        Action::RemoveMember(id) => {
            session.graph.remove_member(*id)?;
        }
        Action::RemoveSlab(id) => {
            session.graph.remove_slab(*id);
        }
        Action::Reset => session.reset(),
    }
    Ok(())
}
