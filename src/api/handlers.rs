//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::api::ValidatedText;
use crate::cache::{CacheStore, NoopCache, ResultCache, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, OpResponse, StatsResponse};
use crate::ops::{Operation, OperationRegistry};

/// Application state shared across all handlers.
///
/// Holds the service's fixed operation and the injected result cache.
#[derive(Clone)]
pub struct AppState {
    /// The metric this service computes
    pub operation: Operation,
    /// Thread-safe result cache
    pub cache: Arc<dyn ResultCache>,
    /// Valid `/op` requests served
    requests: Arc<AtomicU64>,
    /// Service start time
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates a new AppState for `operation` backed by `cache`.
    pub fn new(operation: Operation, cache: Arc<dyn ResultCache>) -> Self {
        Self {
            operation,
            cache,
            requests: Arc::new(AtomicU64::new(0)),
            started_at: Utc::now(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Resolves `operation_key` up front so a misconfigured service fails at
    /// boot instead of on its first request. A cache capacity of zero
    /// selects the no-op cache. Texts over `cache_max_text_bytes` are
    /// computed but never cached.
    pub fn from_config(
        operation_key: &str,
        registry: &OperationRegistry,
        config: &Config,
    ) -> Result<Self> {
        let operation = registry.resolve(operation_key)?;
        let cache: Arc<dyn ResultCache> = if config.cache_capacity == 0 {
            Arc::new(NoopCache::new())
        } else {
            let store = CacheStore::new(config.cache_capacity)
                .with_max_text_bytes(config.cache_max_text_bytes);
            Arc::new(SharedCache::from_store(store))
        };
        Ok(Self::new(operation, cache))
    }

    /// Number of valid `/op` requests served so far.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}

/// Handler for GET /healthz
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for POST /op
///
/// Computes the service's metric over the request text, consulting the
/// cache first. Invalid bodies never reach this function.
pub async fn op_handler(
    State(state): State<AppState>,
    ValidatedText(req): ValidatedText,
) -> Json<OpResponse> {
    state.requests.fetch_add(1, Ordering::Relaxed);

    let operation = &state.operation;
    let lookup = state
        .cache
        .get_or_compute(operation.key(), &req.text, &|text: &str| operation.compute(text));

    debug!(
        key = operation.key(),
        value = lookup.value,
        cache_hit = lookup.cache_hit,
        text_len = req.text.len(),
        "Computed metric"
    );

    Json(OpResponse::new(operation.key(), lookup.value, lookup.cache_hit))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();

    Json(StatsResponse::new(
        state.operation.key(),
        &stats,
        state.requests(),
        state.uptime_seconds(),
    ))
}

/// Handler for GET /metrics
///
/// Renders request and cache counters in Prometheus text format.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let key = state.operation.key();
    let stats = state.cache.stats();
    let mut body = String::new();

    let counters = [
        (format!("{}_requests_total", key), "Total requests processed", state.requests()),
        (format!("{}_cache_hits_total", key), "Results served from cache", stats.hits),
        (format!("{}_cache_misses_total", key), "Results computed", stats.misses),
        (format!("{}_cache_evictions_total", key), "Cached results evicted", stats.evictions),
    ];
    for (name, help, value) in counters {
        let _ = writeln!(body, "# HELP {} {}", name, help);
        let _ = writeln!(body, "# TYPE {} counter", name);
        let _ = writeln!(body, "{} {}", name, value);
    }

    let gauges = [
        (format!("{}_cache_entries", key), "Results currently cached", stats.total_entries),
        (format!("{}_cache_stored_bytes", key), "Bytes of cached key text", stats.stored_bytes),
    ];
    for (name, help, value) in gauges {
        let _ = writeln!(body, "# HELP {} {}", name, help);
        let _ = writeln!(body, "# TYPE {} gauge", name);
        let _ = writeln!(body, "{} {}", name, value);
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
