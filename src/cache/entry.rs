//! Cache Entry Module
//!
//! Defines the key and value stored for each memoized result.

// == Cache Key ==
/// Identifies a cached result by operation and exact input text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Operation key, e.g. `unique_words`
    pub operation: String,
    /// Input text, byte for byte
    pub text: String,
}

impl CacheKey {
    /// Creates a key for `operation` applied to `text`.
    pub fn new(operation: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            text: text.into(),
        }
    }

    /// Bytes held by the key.
    pub fn size_bytes(&self) -> usize {
        self.operation.len() + self.text.len()
    }
}

// == Cache Entry ==
/// A computed result. Entries are never mutated once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// The computed value
    pub value: u64,
}

impl CacheEntry {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}
