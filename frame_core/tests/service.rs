//! Session and element flows against an in-memory analysis service.

use std::sync::Mutex;

use frame_core::client::AnalysisService;
use frame_core::codes::DesignCode;
use frame_core::elements::{ElementKind, RawFields};
use frame_core::errors::{FrameError, FrameResult};
use frame_core::materials::BuiltinSteelCatalog;
use frame_core::request::{AnalysisRequest, ElementAnalysisRequest};
use frame_core::results::DesignStatus;
use frame_core::session::{analyze_element, AnalysisUpdate, ClickTarget, Session};
use serde_json::{json, Value};

/// Replays canned answers and records every body it was sent
#[derive(Default)]
struct FakeService {
    structure: Mutex<Vec<FrameResult<Value>>>,
    element: Mutex<Option<Value>>,
    sent: Mutex<Vec<Value>>,
}

impl FakeService {
    fn answering(answers: Vec<FrameResult<Value>>) -> Self {
        let mut answers = answers;
        answers.reverse();
        FakeService {
            structure: Mutex::new(answers),
            ..FakeService::default()
        }
    }

    fn with_element(answer: Value) -> Self {
        FakeService {
            element: Mutex::new(Some(answer)),
            ..FakeService::default()
        }
    }

    fn sent(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }
}

impl AnalysisService for FakeService {
    async fn analyze_structure(&self, request: &AnalysisRequest) -> FrameResult<Value> {
        self.sent.lock().unwrap().push(serde_json::to_value(request)?);
        self.structure
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(FrameError::transport("no answer queued")))
    }

    async fn analyze_element(&self, request: &ElementAnalysisRequest) -> FrameResult<Value> {
        self.sent.lock().unwrap().push(serde_json::to_value(request)?);
        self.element
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| FrameError::transport("no answer queued"))
    }

    async fn generate_report(&self, body: Vec<u8>) -> FrameResult<Vec<u8>> {
        self.sent.lock().unwrap().push(serde_json::from_slice(&body)?);
        Ok(b"%PDF-1.7 fake".to_vec())
    }
}

fn portal(session: &mut Session) {
    for (x, y) in [(0.0, 1000.0), (0.0, 700.0), (500.0, 700.0), (500.0, 1000.0)] {
        session.click(ClickTarget::Canvas { x, y }).unwrap();
    }
    for (a, b) in [(1, 2), (2, 3), (3, 4)] {
        session.click(ClickTarget::Node { id: frame_core::NodeId(a) }).unwrap();
        session.click(ClickTarget::Node { id: frame_core::NodeId(b) }).unwrap();
    }
}

fn combination(ok: bool) -> Value {
    json!({
        "displacements": {"N2": {"ux": 0.00123456, "uy": -0.0004, "rz": 0.0}},
        "member_forces": {"M2": {"Nmax": 10.0, "Vmax": 42.5, "Mmax": 88.125}},
        "design": {"M2": {"Mu": 88.1, "As_required": 450.0, "Overall_OK": ok}}
    })
}

#[tokio::test]
async fn run_analysis_applies_result() {
    let mut session = Session::new(DesignCode::Aci);
    portal(&mut session);

    let service = FakeService::answering(vec![Ok(json!({"LC1": combination(true), "LC2": combination(false)}))]);
    let update = session.run_analysis(&service).await.unwrap();
    assert_eq!(update, AnalysisUpdate::Applied { seq: 1, combinations: 2 });

    let results = session.results().unwrap();
    assert_eq!(results.overall_status("LC1"), DesignStatus::Safe);
    assert_eq!(results.overall_status("LC2"), DesignStatus::Unsafe);
    assert_eq!(session.selected_combination().unwrap().id, "LC1");

    let sent = service.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["code"], "ACI");
    assert_eq!(sent[0]["members"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn transport_failure_keeps_previous_result() {
    let mut session = Session::new(DesignCode::Aci);
    portal(&mut session);

    let service = FakeService::answering(vec![
        Ok(json!({"LC1": combination(true)})),
        Err(FrameError::transport("connection reset")),
    ]);
    session.run_analysis(&service).await.unwrap();
    let update = session.run_analysis(&service).await.unwrap();

    assert!(matches!(update, AnalysisUpdate::Failed { seq: 2, .. }));
    assert_eq!(session.applied().unwrap().seq, 1);
    assert_eq!(session.last_error().unwrap().error_code(), "TRANSPORT_FAILURE");
    assert_eq!(session.results().unwrap().overall_status("LC1"), DesignStatus::Safe);
}

#[tokio::test]
async fn report_echoes_request_and_result() {
    let mut session = Session::new(DesignCode::Eurocode);
    portal(&mut session);

    let raw = json!({"LC1": combination(true)});
    let service = FakeService::answering(vec![Ok(raw.clone())]);
    session.run_analysis(&service).await.unwrap();

    let pdf = session.generate_report(&service).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let sent = service.sent();
    assert_eq!(sent[1]["data"], sent[0]);
    assert_eq!(sent[1]["result"], raw);
}

#[tokio::test]
async fn element_analysis_reads_verdict() {
    let service = FakeService::with_element(json!({
        "status": "success",
        "element": "column",
        "result": {
            "structural": {"status": "safe", "details": {"Pu": 1200.0}, "recommendations": []},
            "seismic": {"status": "NG"}
        }
    }));

    let fields = RawFields::new()
        .with("b", "40")
        .with("h", "40")
        .with("height", "3")
        .with("bar_diameter", "20")
        .with("bar_count", "8")
        .with("tie_spacing", "15")
        .with("axial", "1200");
    let seismic = RawFields::new()
        .with("zone", "2a")
        .with("soil", "medium")
        .with("importance", "normal")
        .with("system", "moment_frame");

    let verdict = analyze_element(
        &service,
        DesignCode::Jordan,
        ElementKind::Column,
        &fields,
        &seismic,
        &BuiltinSteelCatalog,
    )
    .await
    .unwrap();
    assert_eq!(verdict.structural.status, DesignStatus::Safe);
    assert_eq!(verdict.overall(), DesignStatus::Unsafe);

    let sent = service.sent();
    assert_eq!(sent[0]["element"], "column");
    assert_eq!(sent[0]["code"], "Jordan");
    assert_eq!(sent[0]["seismic"]["zone"], "2A");
    assert_eq!(sent[0]["data"]["materials"]["fc"], 25.0);
}

#[tokio::test]
async fn element_error_status_is_service_error() {
    let service = FakeService::with_element(json!({"status": "error", "message": "section too small"}));
    let fields = RawFields::new()
        .with("section_type", "W")
        .with("section_size", "W310x97")
        .with("span", "6000")
        .with("uniform_load", "12");

    let err = analyze_element(
        &service,
        DesignCode::Aci,
        ElementKind::SteelBeam,
        &fields,
        &RawFields::new(),
        &BuiltinSteelCatalog,
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        FrameError::ServiceError {
            status: 200,
            detail: "section too small".into()
        }
    );
}

#[tokio::test]
async fn validation_fails_before_sending() {
    let service = FakeService::with_element(json!({"status": "success", "result": {}}));
    let fields = RawFields::new().with("b", "40");

    let err = analyze_element(
        &service,
        DesignCode::Aci,
        ElementKind::Column,
        &fields,
        &RawFields::new(),
        &BuiltinSteelCatalog,
    )
    .await
    .unwrap_err();
    assert!(err.is_validation());
    assert!(service.sent().is_empty());

    let mut session = Session::new(DesignCode::Aci);
    session.catalog = frame_core::ProjectCatalog::empty();
    portal(&mut session);
    let err = session.run_analysis(&service).await.unwrap_err();
    assert_eq!(err.error_code(), "SECTION_NOT_FOUND");
    assert!(service.sent().is_empty());
}
