//! API Module
//!
//! HTTP handlers and routing for a single text metric service.
//!
//! # Endpoints
//! - `GET /healthz` - Health check endpoint
//! - `POST /op` - Compute the service's metric over `{"text": ...}`
//! - `GET /stats` - Cache statistics
//! - `GET /metrics` - Prometheus text exposition

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::ValidatedText;
pub use handlers::*;
pub use routes::create_router;
