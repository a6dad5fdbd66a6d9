//! Response DTOs for the text metric API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `POST /op`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpResponse {
    /// Operation key of the service
    pub key: String,
    /// Computed metric
    pub value: u64,
    /// Whether the value was served from the cache
    pub cache_hit: bool,
}

impl OpResponse {
    /// Creates a new OpResponse
    pub fn new(key: impl Into<String>, value: u64, cache_hit: bool) -> Self {
        Self {
            key: key.into(),
            value,
            cache_hit,
        }
    }
}

/// Response body for `GET /healthz`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { ok: true }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Operation key of the service
    pub key: String,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Maximum number of entries in cache
    pub capacity: usize,
    /// Bytes of key text held by cached entries
    pub stored_bytes: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Valid `/op` requests served
    pub requests: u64,
    /// Seconds since the service started
    pub uptime_seconds: i64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(key: impl Into<String>, stats: &CacheStats, requests: u64, uptime_seconds: i64) -> Self {
        Self {
            key: key.into(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
            stored_bytes: stats.stored_bytes,
            hit_rate: stats.hit_rate(),
            requests,
            uptime_seconds,
        }
    }
}
