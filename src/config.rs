//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use tracing::warn;

use crate::cache::MAX_CACHED_TEXT_BYTES;

/// Default HTTP port shared by every service.
pub const DEFAULT_PORT: u16 = 8085;

/// Default number of memoized results per service.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address to bind the listener on
    pub bind_addr: IpAddr,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of cached results, 0 disables caching
    pub cache_capacity: usize,
    /// Longest input text, in bytes, whose result is cached
    pub cache_max_text_bytes: usize,
}

impl Config {
    /// Creates a new Config for the service computing `operation_key`.
    ///
    /// # Environment Variables
    /// - `<OPERATION_KEY>_PORT` - Per-service port, e.g. `UNIQUE_WORDS_PORT`
    /// - `PORT` - Fallback HTTP port (default: 8085)
    /// - `BIND_ADDR` - Listen address (default: 0.0.0.0)
    /// - `CACHE_CAPACITY` - Cached result count (default: 10000)
    /// - `CACHE_MAX_TEXT_BYTES` - Longest cached input (default: 16384)
    pub fn from_env_for(operation_key: &str) -> Self {
        Self::from_lookup(operation_key, |name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(operation_key: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let service_port = format!("{}_PORT", operation_key.to_ascii_uppercase());

        let server_port = match lookup(&service_port) {
            Some(raw) => parse_or(&service_port, &raw, defaults.server_port),
            None => parse_var(&lookup, "PORT", defaults.server_port),
        };

        Self {
            bind_addr: parse_var(&lookup, "BIND_ADDR", defaults.bind_addr),
            server_port,
            cache_capacity: parse_var(&lookup, "CACHE_CAPACITY", defaults.cache_capacity),
            cache_max_text_bytes: parse_var(
                &lookup,
                "CACHE_MAX_TEXT_BYTES",
                defaults.cache_max_text_bytes,
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            server_port: DEFAULT_PORT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_max_text_bytes: MAX_CACHED_TEXT_BYTES,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => parse_or(name, &raw, default),
        None => default,
    }
}

fn parse_or<T: FromStr>(name: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("Ignoring unparseable {}={:?}, using default", name, raw);
        default
    })
}
