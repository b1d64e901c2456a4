//! # frame_core - Structural Model and Analysis Results
//!
//! `frame_core` builds the models an engineer submits to a remote structural
//! analysis service and organizes what comes back. All inputs and outputs
//! are JSON-serializable; the solver itself lives on the other side of the
//! [`client::AnalysisService`] boundary.
//!
//! ## Design Philosophy
//!
//! - **Typed inputs**: raw form strings are normalized into one variant per
//!   element type, with design-code defaults filled in
//! - **Graph integrity**: members can only reference nodes that exist
//! - **Deterministic requests**: the same model always serializes to the same bytes
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use frame_core::codes::DesignCode;
//! use frame_core::session::{ClickTarget, Session};
//!
//! let mut session = Session::new(DesignCode::Eurocode);
//! session.click(ClickTarget::Canvas { x: 0.0, y: 1000.0 }).unwrap();
//! session.click(ClickTarget::Canvas { x: 600.0, y: 1000.0 }).unwrap();
//!
//! let pending = session.begin_analysis().unwrap();
//! let json = serde_json::to_string_pretty(&pending.request).unwrap();
//! assert!(json.contains("\"1.35G+1.5Q\""));
//! ```
//!
//! ## Modules
//!
//! - [`elements`] - Single-element form normalization
//! - [`graph`] - Node / member / slab graph
//! - [`session`] - Click editing, analysis lifecycle and reset
//! - [`request`] - Analysis and report payloads
//! - [`results`] - Per-combination results and element verdicts
//! - [`client`] - Analysis service trait and HTTP client
//! - [`codes`] - Design codes, default strengths and seismic zones
//! - [`loads`] - Load types, member loads and load combinations
//! - [`materials`] - Materials, sections and the steel catalog
//! - [`project`] - Project material and section catalog
//! - [`config`] - Service configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod client;
pub mod codes;
pub mod config;
pub mod elements;
pub mod errors;
pub mod graph;
pub mod loads;
pub mod materials;
pub mod project;
pub mod request;
pub mod results;
pub mod seismic;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use client::{AnalysisService, HttpAnalysisClient};
pub use codes::DesignCode;
pub use config::ServiceConfig;
pub use elements::{normalize, ElementInput, ElementKind, RawFields};
pub use errors::{FrameError, FrameResult};
pub use graph::{MemberId, NodeId, SlabId, StructuralGraph};
pub use project::ProjectCatalog;
pub use request::AnalysisRequest;
pub use results::{DesignStatus, ResultSet};
pub use session::Session;
