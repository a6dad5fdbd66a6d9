//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheKey, CacheStats, LruTracker, MAX_CACHED_TEXT_BYTES};

// == Cache Lookup ==
/// Outcome of a memoized computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLookup {
    /// The result, either stored or freshly computed
    pub value: u64,
    /// True when the value came from the cache
    pub cache_hit: bool,
}

impl CacheLookup {
    pub fn hit(value: u64) -> Self {
        Self {
            value,
            cache_hit: true,
        }
    }

    pub fn miss(value: u64) -> Self {
        Self {
            value,
            cache_hit: false,
        }
    }
}

// == Cache Store ==
/// Bounded result storage with LRU eviction.
///
/// Not synchronized; see [`SharedCache`](crate::cache::SharedCache) for the
/// thread-safe wrapper used by the handlers.
#[derive(Debug)]
pub struct CacheStore {
    /// Computed results keyed by (operation, text)
    entries: HashMap<Arc<CacheKey>, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker<Arc<CacheKey>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Inputs longer than this are computed but not stored
    max_text_bytes: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` results.
    ///
    /// A capacity of zero stores nothing and every lookup misses.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(capacity),
            capacity,
            max_text_bytes: MAX_CACHED_TEXT_BYTES,
        }
    }

    /// Sets the longest input text, in bytes, whose result is stored.
    pub fn with_max_text_bytes(mut self, max_text_bytes: usize) -> Self {
        self.max_text_bytes = max_text_bytes;
        self
    }

    // == Get ==
    /// Retrieves a stored result, marking it most recently used.
    ///
    /// Records a hit or a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<u64> {
        match self.entries.get_key_value(key) {
            Some((stored_key, entry)) => {
                let value = entry.value;
                let stored_key = Arc::clone(stored_key);
                self.lru.touch(&stored_key);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a computed result.
    ///
    /// If the cache is at capacity, the least recently used entry is
    /// evicted first. Results are deterministic, so inserting an existing
    /// key keeps the stored entry and only refreshes its recency.
    /// Keys whose text exceeds the size limit are not stored.
    pub fn insert(&mut self, key: CacheKey, value: u64) {
        if self.capacity == 0 || !self.is_cacheable(&key.text) {
            return;
        }

        if let Some((stored_key, _)) = self.entries.get_key_value(&key) {
            let stored_key = Arc::clone(stored_key);
            self.lru.touch(&stored_key);
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_released(evicted.size_bytes());
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        let key = Arc::new(key);
        self.stats.record_stored(key.size_bytes());
        self.entries.insert(Arc::clone(&key), CacheEntry::new(value));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    fn is_cacheable(&self, text: &str) -> bool {
        text.len() <= self.max_text_bytes
    }

    // == Get Or Compute ==
    /// Returns the memoized result for `(operation, text)`, invoking
    /// `compute` only on a miss.
    ///
    /// Oversized text always misses and is neither looked up nor copied.
    pub fn get_or_compute<F>(&mut self, operation: &str, text: &str, compute: F) -> CacheLookup
    where
        F: FnOnce(&str) -> u64,
    {
        if !self.is_cacheable(text) {
            self.stats.record_miss();
            return CacheLookup::miss(compute(text));
        }

        let key = CacheKey::new(operation, text);
        if let Some(value) = self.get(&key) {
            return CacheLookup::hit(value);
        }

        let value = compute(text);
        self.insert(key, value);
        CacheLookup::miss(value)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns true if a result for `key` is stored. Does not affect recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Drops every stored result. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        self.stats.stored_bytes = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
