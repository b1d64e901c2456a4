//! # Error Types
//!
//! Structured error types for frame_core. Every failure carries enough
//! context (field names, node ids, service detail strings) for a caller to
//! re-prompt the user or display the problem without parsing messages.
//!
//! ## Error Kinds
//!
//! - **Validation** (`InvalidInput`, `MissingField`): element normalization
//!   failed. Never sent to the network; resolved by correcting the input.
//! - **Graph edits** (`UnknownNode`, `DegenerateMember`, `UnknownMember`):
//!   rejected synchronously, graph left unchanged.
//! - **Responses** (`MalformedResponse`, `ServiceError`): the analysis
//!   service answered, but not with a usable result set.
//! - **Transport** (`TransportFailure`): network or timeout. Retry-eligible.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::errors::{FrameError, FrameResult};
//!
//! fn validate_span(span_m: f64) -> FrameResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(FrameError::invalid_input("span", span_m.to_string(), "must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).unwrap_err().is_validation());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for frame_core operations
pub type FrameResult<T> = Result<T, FrameError>;

/// Structured error type for model, normalization and analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FrameError {
    /// An input value is present but unusable (unparsable, out of range, unknown option)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A member endpoint does not exist in the current node set
    #[error("Unknown node: {node}")]
    UnknownNode { node: String },

    /// A member would connect a node to itself
    #[error("Degenerate member: both ends reference {node}")]
    DegenerateMember { node: String },

    /// A member id does not exist in the graph
    #[error("Unknown member: {member}")]
    UnknownMember { member: String },

    /// Material referenced by the model is not in the project catalog
    #[error("Material not found: {material_id}")]
    MaterialNotFound { material_id: String },

    /// Section referenced by the model is not in the project catalog
    #[error("Section not found: {section_id}")]
    SectionNotFound { section_id: String },

    /// Catalog entries are never replaced once added
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: String, id: String },

    /// Analysis response does not have the minimal result-set shape
    #[error("Malformed analysis response: {reason}")]
    MalformedResponse { reason: String },

    /// Network failure or timeout talking to a remote service
    #[error("Transport failure: {reason}")]
    TransportFailure { reason: String },

    /// The remote service rejected the request with a detail message
    #[error("Service error ({status}): {detail}")]
    ServiceError { status: u16, detail: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FrameError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        FrameError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        FrameError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownNode error
    pub fn unknown_node(node: impl ToString) -> Self {
        FrameError::UnknownNode {
            node: node.to_string(),
        }
    }

    /// Create a DegenerateMember error
    pub fn degenerate_member(node: impl ToString) -> Self {
        FrameError::DegenerateMember {
            node: node.to_string(),
        }
    }

    /// Create a MalformedResponse error
    pub fn malformed(reason: impl Into<String>) -> Self {
        FrameError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create a TransportFailure error
    pub fn transport(reason: impl Into<String>) -> Self {
        FrameError::TransportFailure {
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        FrameError::ConfigError {
            reason: reason.into(),
        }
    }

    /// True for normalization failures that must be fixed before submitting
    pub fn is_validation(&self) -> bool {
        matches!(self, FrameError::InvalidInput { .. } | FrameError::MissingField { .. })
    }

    /// The offending field of a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            FrameError::InvalidInput { field, .. } | FrameError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FrameError::TransportFailure { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FrameError::InvalidInput { .. } => "INVALID_INPUT",
            FrameError::MissingField { .. } => "MISSING_FIELD",
            FrameError::UnknownNode { .. } => "UNKNOWN_NODE",
            FrameError::DegenerateMember { .. } => "DEGENERATE_MEMBER",
            FrameError::UnknownMember { .. } => "UNKNOWN_MEMBER",
            FrameError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            FrameError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            FrameError::DuplicateId { .. } => "DUPLICATE_ID",
            FrameError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            FrameError::TransportFailure { .. } => "TRANSPORT_FAILURE",
            FrameError::ServiceError { .. } => "SERVICE_ERROR",
            FrameError::SerializationError { .. } => "SERIALIZATION_ERROR",
            FrameError::ConfigError { .. } => "CONFIG_ERROR",
            FrameError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(e: serde_json::Error) -> Self {
        FrameError::SerializationError {
            reason: e.to_string(),
        }
    }
}
