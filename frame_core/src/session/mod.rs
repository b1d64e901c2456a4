//! # Design Session
//!
//! A [`Session`] owns everything one user works on: the design code, the
//! project catalog, the structural graph, the click editor and the last
//! analysis result. [`Session::reset`] starts a new structure.
//!
//! ## Analysis Lifecycle
//!
//! ```text
//! begin_analysis()  -> PendingAnalysis { seq, request }
//!        |                    (send request, await answer)
//! complete_analysis(pending, answer)
//!        ├── seq is not the latest issued  -> Stale, discarded
//!        ├── transport / service / shape error -> Failed, previous result kept
//!        └── ok -> Applied, result model replaced wholesale
//! ```
//!
//! Several submissions may be in flight; only the latest issued one can
//! change the session.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::session::{AnalysisUpdate, ClickTarget, Session};
//! use serde_json::json;
//!
//! let mut session = Session::new(Default::default());
//! session.click(ClickTarget::Canvas { x: 0.0, y: 0.0 }).unwrap();
//! session.click(ClickTarget::Canvas { x: 500.0, y: 0.0 }).unwrap();
//!
//! let first = session.begin_analysis().unwrap();
//! let second = session.begin_analysis().unwrap();
//!
//! let answer = json!({"LC1": {"displacements": {}, "member_forces": {}, "design": {}}});
//! let update = session.complete_analysis(first, Ok(answer.clone()));
//! assert!(matches!(update, AnalysisUpdate::Stale { .. }));
//!
//! let update = session.complete_analysis(second, Ok(answer));
//! assert!(matches!(update, AnalysisUpdate::Applied { .. }));
//! assert_eq!(session.results().unwrap().combinations(), vec!["LC1"]);
//! ```

pub mod editing;

pub use editing::{
    CanvasTransform, ClickTarget, EditOutcome, EditingSession, LinkState, MemberTemplate, SlabTemplate,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::AnalysisService;
use crate::codes::DesignCode;
use crate::elements::{normalize, ElementKind, RawFields};
use crate::errors::{FrameError, FrameResult};
use crate::graph::{SlabId, StructuralGraph};
use crate::materials::SteelCatalog;
use crate::project::ProjectCatalog;
use crate::request::{AnalysisRequest, ElementAnalysisRequest, ReportRequest};
use crate::results::{CombinationResult, ElementResponse, ElementVerdict, ResultSet};
use crate::seismic::SeismicParameters;

/// A request that has been issued and awaits its answer
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAnalysis {
    pub seq: u64,
    pub request: AnalysisRequest,
}

/// The result currently shown, with the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAnalysis {
    pub seq: u64,
    pub request: AnalysisRequest,
    /// Result mapping exactly as received
    pub raw: Value,
    pub results: ResultSet,
    pub received_at: DateTime<Utc>,
    /// Combination being viewed
    pub selected: Option<String>,
}

/// What [`Session::complete_analysis`] did with an answer
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisUpdate {
    Applied { seq: u64, combinations: usize },
    Stale { seq: u64, latest: u64 },
    Failed { seq: u64, error: FrameError },
}

/// All state of one design session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub code: DesignCode,
    pub catalog: ProjectCatalog,
    pub graph: StructuralGraph,
    pub editor: EditingSession,
    /// Highest sequence number issued so far
    latest_issued: u64,
    applied: Option<AppliedAnalysis>,
    last_error: Option<FrameError>,
}

impl Session {
    pub fn new(code: DesignCode) -> Self {
        Session {
            id: Uuid::new_v4(),
            created: Utc::now(),
            code,
            catalog: ProjectCatalog::default(),
            graph: StructuralGraph::new(),
            editor: EditingSession::default(),
            latest_issued: 0,
            applied: None,
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn click(&mut self, target: ClickTarget) -> FrameResult<EditOutcome> {
        self.editor.handle_click(&mut self.graph, target)
    }

    pub fn place_slab(&mut self) -> SlabId {
        self.editor.place_slab(&mut self.graph)
    }

    /// Start a new structure.
    ///
    /// Clears the graph, editor, result and error. Analyses still in
    /// flight become stale. The catalog and design code are kept.
    pub fn reset(&mut self) {
        self.graph.reset();
        self.editor.reset();
        self.applied = None;
        self.last_error = None;
        self.latest_issued += 1;
        info!(session = %self.id, "session reset");
    }

    // ------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------

    /// Build the request for the current graph and issue a sequence number
    pub fn begin_analysis(&mut self) -> FrameResult<PendingAnalysis> {
        let request = AnalysisRequest::build(self.code, &self.graph, &self.catalog)?;
        self.latest_issued += 1;
        debug!(seq = self.latest_issued, "analysis issued");
        Ok(PendingAnalysis {
            seq: self.latest_issued,
            request,
        })
    }

    /// Apply the answer to an issued request.
    ///
    /// Answers for anything but the latest issued request are discarded.
    /// Failures are recorded in [`Session::last_error`] and leave the
    /// previously applied result in place.
    pub fn complete_analysis(&mut self, pending: PendingAnalysis, answer: FrameResult<Value>) -> AnalysisUpdate {
        let PendingAnalysis { seq, request } = pending;
        if seq != self.latest_issued {
            warn!(seq, latest = self.latest_issued, "discarding stale analysis response");
            return AnalysisUpdate::Stale {
                seq,
                latest: self.latest_issued,
            };
        }

        let parsed = answer.and_then(|raw| ResultSet::ingest(&raw).map(|results| (raw, results)));
        match parsed {
            Ok((raw, results)) => {
                let combinations = results.len();
                let selected = results.first().map(|c| c.id.clone());
                self.applied = Some(AppliedAnalysis {
                    seq,
                    request,
                    raw,
                    results,
                    received_at: Utc::now(),
                    selected,
                });
                self.last_error = None;
                info!(seq, combinations, "analysis applied");
                AnalysisUpdate::Applied { seq, combinations }
            }
            Err(error) => self.fail(seq, error),
        }
    }

    /// Build, submit and apply in one step
    pub async fn run_analysis<S: AnalysisService>(&mut self, service: &S) -> FrameResult<AnalysisUpdate> {
        let pending = self.begin_analysis()?;
        let answer = service.analyze_structure(&pending.request).await;
        Ok(self.complete_analysis(pending, answer))
    }

    fn fail(&mut self, seq: u64, error: FrameError) -> AnalysisUpdate {
        warn!(seq, code = error.error_code(), %error, "analysis failed, keeping previous result");
        self.last_error = Some(error.clone());
        AnalysisUpdate::Failed { seq, error }
    }

    pub fn latest_issued(&self) -> u64 {
        self.latest_issued
    }

    pub fn applied(&self) -> Option<&AppliedAnalysis> {
        self.applied.as_ref()
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.applied.as_ref().map(|a| &a.results)
    }

    pub fn last_error(&self) -> Option<&FrameError> {
        self.last_error.as_ref()
    }

    /// Switch the viewed combination
    pub fn select_combination(&mut self, name: &str) -> FrameResult<()> {
        let applied = self
            .applied
            .as_mut()
            .ok_or_else(|| FrameError::invalid_input("combination", name, "no analysis result"))?;
        if applied.results.select(name).is_none() {
            return Err(FrameError::invalid_input("combination", name, "not in the current result"));
        }
        applied.selected = Some(name.to_string());
        Ok(())
    }

    pub fn selected_combination(&self) -> Option<&CombinationResult> {
        let applied = self.applied.as_ref()?;
        applied.results.select(applied.selected.as_deref()?)
    }

    // ------------------------------------------------------------------
    // Report
    // ------------------------------------------------------------------

    /// Report payload for the applied result: the request exactly as it was
    /// sent, and the result mapping exactly as received
    pub fn report_request(&self) -> FrameResult<Vec<u8>> {
        let applied = self
            .applied
            .as_ref()
            .ok_or_else(|| FrameError::invalid_input("report", "", "no analysis result to report"))?;
        Ok(serde_json::to_vec(&ReportRequest::new(&applied.request, &applied.raw))?)
    }

    pub async fn generate_report<S: AnalysisService>(&self, service: &S) -> FrameResult<Vec<u8>> {
        let body = self.report_request()?;
        service.generate_report(body).await
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(DesignCode::default())
    }
}

/// Normalize an element form, submit it and read the verdict.
///
/// Validation errors are returned before anything is sent.
pub async fn analyze_element<S: AnalysisService>(
    service: &S,
    code: DesignCode,
    kind: ElementKind,
    fields: &RawFields,
    seismic: &RawFields,
    catalog: &impl SteelCatalog,
) -> FrameResult<ElementVerdict> {
    let input = normalize(kind, fields, code.id(), catalog)?;
    let seismic = SeismicParameters::from_fields(seismic, code)?;
    let request = ElementAnalysisRequest::new(code, input, seismic);
    let raw = service.analyze_element(&request).await?;
    ElementResponse::ingest(&raw)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answer(ok: bool) -> Value {
        json!({"LC1": {"displacements": {}, "member_forces": {}, "design": {"M1": {"Overall_OK": ok}}}})
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut session = Session::default();
        let pending = session.begin_analysis().unwrap();
        session.complete_analysis(pending, Ok(answer(true)));

        let pending = session.begin_analysis().unwrap();
        let update = session.complete_analysis(pending, Err(FrameError::transport("connection refused")));
        assert!(matches!(update, AnalysisUpdate::Failed { seq: 2, .. }));
        assert_eq!(session.applied().unwrap().seq, 1);
        assert!(session.last_error().unwrap().is_recoverable());

        let pending = session.begin_analysis().unwrap();
        let update = session.complete_analysis(pending, Ok(json!(["not", "a", "mapping"])));
        assert!(matches!(update, AnalysisUpdate::Failed { seq: 3, .. }));
        assert_eq!(session.last_error().unwrap().error_code(), "MALFORMED_RESPONSE");
        assert_eq!(session.applied().unwrap().seq, 1);
    }

    #[test]
    fn test_success_clears_error_and_replaces_result() {
        let mut session = Session::default();
        let pending = session.begin_analysis().unwrap();
        session.complete_analysis(pending, Err(FrameError::transport("timeout")));
        assert!(session.results().is_none());

        let pending = session.begin_analysis().unwrap();
        session.complete_analysis(pending, Ok(answer(false)));
        assert!(session.last_error().is_none());
        assert_eq!(session.selected_combination().unwrap().id, "LC1");
        assert_eq!(session.results().unwrap().overall_status("LC1"), crate::results::DesignStatus::Unsafe);
    }

    #[test]
    fn test_out_of_order_answers() {
        let mut session = Session::default();
        let first = session.begin_analysis().unwrap();
        let second = session.begin_analysis().unwrap();

        session.complete_analysis(second, Ok(answer(true)));
        let update = session.complete_analysis(first, Ok(answer(false)));
        assert_eq!(update, AnalysisUpdate::Stale { seq: 1, latest: 2 });
        assert_eq!(session.applied().unwrap().seq, 2);
    }

    #[test]
    fn test_reset_makes_in_flight_stale() {
        let mut session = Session::default();
        session.click(ClickTarget::Canvas { x: 10.0, y: 10.0 }).unwrap();
        let pending = session.begin_analysis().unwrap();
        session.reset();

        assert!(session.graph.is_empty());
        let update = session.complete_analysis(pending, Ok(answer(true)));
        assert!(matches!(update, AnalysisUpdate::Stale { .. }));
        assert!(session.results().is_none());
    }

    #[test]
    fn test_select_combination() {
        let mut session = Session::default();
        assert!(session.select_combination("LC1").is_err());

        let pending = session.begin_analysis().unwrap();
        let raw = json!({"LC1": {}, "LC2": {}});
        session.complete_analysis(pending, Ok(raw));
        session.select_combination("LC2").unwrap();
        assert_eq!(session.selected_combination().unwrap().id, "LC2");
        assert!(session.select_combination("LC9").is_err());
    }

    #[test]
    fn test_report_requires_result() {
        let session = Session::default();
        assert!(session.report_request().is_err());
    }
}
