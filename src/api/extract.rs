//! Request Extractors
//!
//! Validates `/op` bodies before they reach a handler.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};

use crate::error::{ServiceError, ValidationError};
use crate::models::OpRequest;

/// Extractor yielding a validated [`OpRequest`].
///
/// The body is parsed as JSON whatever the `Content-Type` header says.
/// Any failure rejects the request with `400 Bad Request` and no body.
#[derive(Debug, Clone)]
pub struct ValidatedText(pub OpRequest);

#[async_trait]
impl<S> FromRequest<S> for ValidatedText
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| ValidationError::UnreadableBody)?;

        Ok(Self(OpRequest::from_slice(&body)?))
    }
}
