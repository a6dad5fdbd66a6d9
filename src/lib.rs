//! Text Metrics - single-endpoint text metric services
//!
//! Each service computes one metric (`unique_chars`, `unique_words`,
//! `char_count`) over `POST /op` bodies and memoizes results in an LRU cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod ops;
pub mod server;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ServiceError, ValidationError};
pub use ops::{Operation, OperationRegistry};
