//! Shared Result Caches
//!
//! Thread-safe caches injected into the request handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::cache::{CacheLookup, CacheStats, CacheStore};

// == Result Cache Trait ==
/// Memoization seam used by the handlers.
pub trait ResultCache: Send + Sync {
    /// Returns the result for `(operation, text)`, calling `compute` only
    /// when no stored result exists.
    fn get_or_compute(
        &self,
        operation: &str,
        text: &str,
        compute: &dyn Fn(&str) -> u64,
    ) -> CacheLookup;

    /// Snapshot of the cache counters.
    fn stats(&self) -> CacheStats;
}

// == Shared Cache ==
/// LRU cache guarded by a single mutex.
///
/// The lock is held across lookup, computation and insertion, so two
/// concurrent identical requests compute the result once and the LRU
/// bookkeeping is never observed half-updated.
#[derive(Debug)]
pub struct SharedCache {
    inner: Mutex<CacheStore>,
}

impl SharedCache {
    pub fn new(capacity: usize) -> Self {
        Self::from_store(CacheStore::new(capacity))
    }

    pub fn from_store(store: CacheStore) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    /// Drops every stored result.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic can only interrupt a metric function, before the store is
    // touched, so a poisoned store is still consistent.
    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultCache for SharedCache {
    fn get_or_compute(
        &self,
        operation: &str,
        text: &str,
        compute: &dyn Fn(&str) -> u64,
    ) -> CacheLookup {
        self.lock().get_or_compute(operation, text, compute)
    }

    fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}

// == Noop Cache ==
/// Cache that never stores anything; every lookup is a miss.
#[derive(Debug, Default)]
pub struct NoopCache {
    misses: AtomicU64,
}

impl NoopCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultCache for NoopCache {
    fn get_or_compute(
        &self,
        _operation: &str,
        text: &str,
        compute: &dyn Fn(&str) -> u64,
    ) -> CacheLookup {
        self.misses.fetch_add(1, Ordering::Relaxed);
        CacheLookup::miss(compute(text))
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            misses: self.misses.load(Ordering::Relaxed),
            ..CacheStats::default()
        }
    }
}
