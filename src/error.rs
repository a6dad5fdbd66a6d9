//! Error types for the text metric services
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

// == Validation Error ==
/// Reasons an `/op` request body is rejected before reaching the handler.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The request body could not be read
    #[error("request body could not be read")]
    UnreadableBody,

    /// The body is not valid JSON (an empty body lands here too)
    #[error("request body is not valid JSON")]
    MalformedJson,

    /// The body is valid JSON but not an object
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// The object has no `text` field
    #[error("missing field `text`")]
    MissingText,

    /// The `text` field is present but not a string
    #[error("field `text` must be a string")]
    TextNotString,
}

// == Service Error Enum ==
/// Unified error type for the text metric services.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Client sent a body that failed validation
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Operation key is not present in the registry
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation key was registered twice
    #[error("Duplicate operation: {0}")]
    DuplicateOperation(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Client errors carry no body.
            ServiceError::Validation(reason) => {
                debug!("Rejected /op request: {}", reason);
                return StatusCode::BAD_REQUEST.into_response();
            }
            ServiceError::UnknownOperation(key) => format!("unknown operation '{}'", key),
            ServiceError::DuplicateOperation(key) => format!("duplicate operation '{}'", key),
        };

        error!("{}", self);

        let body = Json(json!({
            "error": message
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the text metric services.
pub type Result<T> = std::result::Result<T, ServiceError>;
