//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a fresh, strictly increasing tick.
/// `order` maps ticks back to keys, so its first entry is always the least
/// recently used key and its last entry the most recently used.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Latest tick per key
    ticks: HashMap<K, u64>,
    /// Keys ordered by tick
    order: BTreeMap<u64, K>,
    /// Next tick to hand out
    next_tick: u64,
}

impl<K: Hash + Eq + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            ticks: HashMap::new(),
            order: BTreeMap::new(),
            next_tick: 0,
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if it is new.
    pub fn touch(&mut self, key: &K) {
        let tick = self.next_tick;
        self.next_tick += 1;

        match self.ticks.get_mut(key) {
            Some(previous) => {
                if let Some(k) = self.order.remove(&*previous) {
                    self.order.insert(tick, k);
                }
                *previous = tick;
            }
            None => {
                self.ticks.insert(key.clone(), tick);
                self.order.insert(tick, key.clone());
            }
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.ticks.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
        self.order.clear();
    }
}

impl<K: Hash + Eq + Clone> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
