//! Request DTOs for the text metric API
//!
//! Turns raw `/op` bodies into typed requests.

use serde_json::Value;

use crate::error::ValidationError;

/// Validated body of `POST /op`.
///
/// Only the `text` field is read; any other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpRequest {
    /// The text to measure
    pub text: String,
}

impl OpRequest {
    /// Parses and validates a raw request body.
    ///
    /// The body must be a JSON object whose `text` field is a string.
    /// Escaped surrogate pairs decode to their character, but an unpaired
    /// surrogate escape such as `"\ud800"` has no UTF-8 form and is
    /// rejected as malformed.
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::MalformedJson)?;
        Self::from_value(value)
    }

    /// Validates an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut fields) = value else {
            return Err(ValidationError::NotAnObject);
        };

        match fields.remove("text") {
            Some(Value::String(text)) => Ok(Self { text }),
            Some(_) => Err(ValidationError::TextNotString),
            None => Err(ValidationError::MissingText),
        }
    }
}
