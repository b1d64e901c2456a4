//! Single-element verdicts
//!
//! The element endpoint answers either
//! `{"status": "success", "result": {"structural": {...}, "seismic": {...}}}`
//! or `{"status": "error", "message": "..."}`. Older responses put the
//! structural block directly under `result`; both are accepted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DesignStatus;
use crate::errors::{FrameError, FrameResult};

/// Verdict label of a structural or seismic block
pub type CheckStatus = DesignStatus;

/// Structural check of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralVerdict {
    pub status: CheckStatus,
    /// Computed quantities, keyed by name
    pub details: Map<String, Value>,
    pub recommendations: Vec<String>,
    /// Any other top-level values the service reported
    pub extra: Map<String, Value>,
}

impl StructuralVerdict {
    fn from_value(value: &Value) -> FrameResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| FrameError::malformed("structural result is not an object"))?;

        let status = parse_status(obj.get("status"));
        let details = match obj.get("details") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(FrameError::malformed("structural details are not an object")),
        };
        let recommendations = match obj.get("recommendations") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(display_value).collect(),
            Some(_) => return Err(FrameError::malformed("recommendations are not a list")),
        };
        let extra = obj
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "status" | "details" | "recommendations"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(StructuralVerdict {
            status,
            details,
            recommendations,
            extra,
        })
    }
}

/// A successful element analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementVerdict {
    pub element: Option<String>,
    pub structural: StructuralVerdict,
    /// Seismic block as reported, when a seismic check ran
    pub seismic: Option<Map<String, Value>>,
}

impl ElementVerdict {
    pub fn seismic_status(&self) -> Option<CheckStatus> {
        self.seismic.as_ref().map(|s| parse_status(s.get("status")))
    }

    /// Structural and seismic statuses combined; an unknown seismic status
    /// does not override the structural one
    pub fn overall(&self) -> CheckStatus {
        match (self.structural.status, self.seismic_status()) {
            (DesignStatus::Unsafe, _) | (_, Some(DesignStatus::Unsafe)) => DesignStatus::Unsafe,
            (status, _) => status,
        }
    }
}

/// Outcome of an element analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ElementResponse {
    Success(ElementVerdict),
    Error { message: String },
}

impl ElementResponse {
    pub fn ingest(raw: &Value) -> FrameResult<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| FrameError::malformed("element response is not an object"))?;

        match obj.get("status").and_then(Value::as_str) {
            Some("error") => {
                let message = obj
                    .get("message")
                    .map(display_value)
                    .unwrap_or_else(|| "analysis failed".to_string());
                Ok(ElementResponse::Error { message })
            }
            Some("success") => {
                let result = obj
                    .get("result")
                    .ok_or_else(|| FrameError::malformed("element response has no result"))?;
                let structural = match result.get("structural") {
                    Some(block) => block,
                    None => result,
                };
                let seismic = match result.get("seismic") {
                    None | Some(Value::Null) => None,
                    Some(Value::Object(map)) => Some(map.clone()),
                    Some(_) => return Err(FrameError::malformed("seismic result is not an object")),
                };
                Ok(ElementResponse::Success(ElementVerdict {
                    element: obj.get("element").and_then(Value::as_str).map(str::to_string),
                    structural: StructuralVerdict::from_value(structural)?,
                    seismic,
                }))
            }
            other => Err(FrameError::malformed(format!("unexpected element response status {:?}", other))),
        }
    }

    /// The verdict, or the service message as a `ServiceError`
    pub fn into_result(self) -> FrameResult<ElementVerdict> {
        match self {
            ElementResponse::Success(verdict) => Ok(verdict),
            ElementResponse::Error { message } => Err(FrameError::ServiceError {
                status: 200,
                detail: message,
            }),
        }
    }
}

fn parse_status(value: Option<&Value>) -> CheckStatus {
    match value.and_then(Value::as_str).map(str::to_ascii_lowercase).as_deref() {
        Some("safe") | Some("ok") | Some("pass") => DesignStatus::Safe,
        Some("unsafe") | Some("ng") | Some("fail") => DesignStatus::Unsafe,
        _ => DesignStatus::Unknown,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structural_and_seismic() {
        let raw = json!({
            "status": "success",
            "element": "beam",
            "result": {
                "structural": {
                    "status": "unsafe",
                    "Mu": 180.2,
                    "details": {"phiMn": 150.0},
                    "recommendations": ["Increase depth", "Add bars"]
                },
                "seismic": {"status": "Safe", "V": 120.0}
            }
        });
        let verdict = ElementResponse::ingest(&raw).unwrap().into_result().unwrap();
        assert_eq!(verdict.element.as_deref(), Some("beam"));
        assert_eq!(verdict.structural.status, DesignStatus::Unsafe);
        assert_eq!(verdict.structural.details["phiMn"], 150.0);
        assert_eq!(verdict.structural.recommendations.len(), 2);
        assert_eq!(verdict.structural.extra["Mu"], 180.2);
        assert_eq!(verdict.seismic_status(), Some(DesignStatus::Safe));
        assert_eq!(verdict.overall(), DesignStatus::Unsafe);
    }

    #[test]
    fn test_legacy_flat_result() {
        let raw = json!({"status": "success", "result": {"status": "safe", "details": {}}});
        let verdict = ElementResponse::ingest(&raw).unwrap().into_result().unwrap();
        assert_eq!(verdict.structural.status, DesignStatus::Safe);
        assert!(verdict.seismic.is_none());
        assert_eq!(verdict.overall(), DesignStatus::Safe);
    }

    #[test]
    fn test_error_status() {
        let raw = json!({"status": "error", "message": "Unsupported slab type: ribbed"});
        let response = ElementResponse::ingest(&raw).unwrap();
        assert_eq!(
            response,
            ElementResponse::Error {
                message: "Unsupported slab type: ribbed".into()
            }
        );
        assert_eq!(response.into_result().unwrap_err().error_code(), "SERVICE_ERROR");
    }

    #[test]
    fn test_malformed() {
        assert!(ElementResponse::ingest(&json!("nope")).is_err());
        assert!(ElementResponse::ingest(&json!({"status": "success"})).is_err());
        assert!(ElementResponse::ingest(&json!({"status": "pending"})).is_err());
    }
}
