//! # Analysis Service Client
//!
//! [`AnalysisService`] is the seam between the model and the remote solver.
//! [`HttpAnalysisClient`] implements it over HTTP with `reqwest`:
//!
//! | call                | endpoint                   | answer                         |
//! |---------------------|----------------------------|--------------------------------|
//! | `analyze_structure` | `POST /structure/analyze`  | `{status, code, results}`      |
//! | `analyze_element`   | `POST /analyze`            | element verdict or `{status: "error"}` |
//! | `generate_report`   | `POST /generate-pdf`       | binary report                  |
//!
//! Non-2xx answers become `ServiceError` carrying the service's `detail`
//! string; connection problems and timeouts become `TransportFailure`.

use std::future::Future;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::errors::{FrameError, FrameResult};
use crate::request::{AnalysisRequest, ElementAnalysisRequest};

pub const STRUCTURE_ENDPOINT: &str = "structure/analyze";
pub const ELEMENT_ENDPOINT: &str = "analyze";
pub const REPORT_ENDPOINT: &str = "generate-pdf";

/// Remote analysis and report service.
pub trait AnalysisService {
    /// Analyze a frame; resolves to the raw per-combination result mapping
    fn analyze_structure(&self, request: &AnalysisRequest) -> impl Future<Output = FrameResult<Value>> + Send;

    /// Analyze one element; resolves to the raw element response
    fn analyze_element(&self, request: &ElementAnalysisRequest) -> impl Future<Output = FrameResult<Value>> + Send;

    /// Render a report from an already-serialized report request
    fn generate_report(&self, body: Vec<u8>) -> impl Future<Output = FrameResult<Vec<u8>>> + Send;
}

/// Pull `results` out of a `{status, code, results}` envelope.
///
/// A bare result mapping (no envelope) is passed through.
pub fn unwrap_envelope(body: Value) -> FrameResult<Value> {
    match body {
        Value::Object(mut obj) if obj.contains_key("results") => {
            if let Some(status) = obj.get("status").and_then(Value::as_str) {
                if status != "success" {
                    let detail = obj
                        .get("detail")
                        .or_else(|| obj.get("message"))
                        .and_then(Value::as_str)
                        .unwrap_or(status)
                        .to_string();
                    return Err(FrameError::ServiceError { status: 200, detail });
                }
            }
            obj.remove("results")
                .ok_or_else(|| FrameError::malformed("response has no results"))
        }
        Value::Object(obj) => Ok(Value::Object(obj)),
        _ => Err(FrameError::malformed("response body is not a JSON object")),
    }
}

/// `reqwest` implementation of [`AnalysisService`].
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(config: ServiceConfig) -> FrameResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FrameError::config(format!("cannot build HTTP client: {}", e)))?;
        Ok(HttpAnalysisClient { config, client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn post(&self, endpoint: &str, body: Vec<u8>) -> FrameResult<reqwest::Response> {
        let url = self.config.endpoint(endpoint);
        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("detail").map(detail_text))
            .unwrap_or(text);
        warn!(%url, status = status.as_u16(), %detail, "analysis service rejected request");
        Err(FrameError::ServiceError {
            status: status.as_u16(),
            detail,
        })
    }

    async fn post_json(&self, endpoint: &str, body: Vec<u8>) -> FrameResult<Value> {
        let response = self.post(endpoint, body).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| FrameError::malformed(format!("response is not JSON: {}", e)))
    }
}

impl AnalysisService for HttpAnalysisClient {
    async fn analyze_structure(&self, request: &AnalysisRequest) -> FrameResult<Value> {
        let body = request.to_json_bytes()?;
        info!(code = %request.code, "submitting frame analysis");
        let envelope = self.post_json(STRUCTURE_ENDPOINT, body).await?;
        unwrap_envelope(envelope)
    }

    async fn analyze_element(&self, request: &ElementAnalysisRequest) -> FrameResult<Value> {
        let body = serde_json::to_vec(request)?;
        info!(code = %request.code, element = %request.element, "submitting element analysis");
        self.post_json(ELEMENT_ENDPOINT, body).await
    }

    async fn generate_report(&self, body: Vec<u8>) -> FrameResult<Vec<u8>> {
        let response = self.post(REPORT_ENDPOINT, body).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        info!(bytes = bytes.len(), "report received");
        Ok(bytes.to_vec())
    }
}

fn transport_error(e: reqwest::Error) -> FrameError {
    let reason = if e.is_timeout() {
        format!("request timed out: {}", e)
    } else {
        e.to_string()
    };
    FrameError::transport(reason)
}

/// FastAPI-style `detail` may be a string or a list of validation records
fn detail_text(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        let body = json!({"status": "success", "code": "ACI", "results": {"LC1": {}}});
        assert_eq!(unwrap_envelope(body).unwrap(), json!({"LC1": {}}));
    }

    #[test]
    fn test_bare_results_pass_through() {
        let body = json!({"LC1": {"displacements": {}}});
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_failed_envelope() {
        let body = json!({"status": "error", "detail": "singular stiffness matrix", "results": null});
        let err = unwrap_envelope(body).unwrap_err();
        assert_eq!(
            err,
            FrameError::ServiceError {
                status: 200,
                detail: "singular stiffness matrix".into()
            }
        );
        assert!(unwrap_envelope(json!([1])).is_err());
    }

    #[test]
    fn test_detail_text() {
        assert_eq!(detail_text(&json!("Not authenticated")), "Not authenticated");
        assert_eq!(detail_text(&json!([{"loc": ["body"]}])), r#"[{"loc":["body"]}]"#);
    }

    #[test]
    fn test_client_builds_from_config() {
        let client = HttpAnalysisClient::new(ServiceConfig::default()).unwrap();
        assert_eq!(client.config().endpoint(STRUCTURE_ENDPOINT), "http://localhost:8000/structure/analyze");
    }
}
