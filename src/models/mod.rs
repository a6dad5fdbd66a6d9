//! Request and Response models for the text metric API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! validating and serializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::OpRequest;
pub use responses::{HealthResponse, OpResponse, StatsResponse};
