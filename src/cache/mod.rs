//! Cache Module
//!
//! Memoizes `(operation key, input text) -> result` with LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


/// Longest input text, in bytes, whose result is kept.
///
/// Longer inputs are still computed but never stored, so a full cache holds
/// at most `capacity * MAX_CACHED_TEXT_BYTES` bytes of text.
pub const MAX_CACHED_TEXT_BYTES: usize = 16 * 1024;

// Re-export public types
pub use entry::{CacheEntry, CacheKey};
pub use lru::LruTracker;
pub use shared::{NoopCache, ResultCache, SharedCache};
pub use stats::CacheStats;
pub use store::{CacheLookup, CacheStore};
