//! Operation Registry
//!
//! Maps operation keys to pure text metrics. Operations are registered once
//! at startup and never replaced or removed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ServiceError};

use super::builtin::{char_count, unique_chars, unique_words, CHAR_COUNT, UNIQUE_CHARS, UNIQUE_WORDS};

const BUILTINS: [(&str, fn(&str) -> u64); 3] = [
    (UNIQUE_CHARS, unique_chars),
    (UNIQUE_WORDS, unique_words),
    (CHAR_COUNT, char_count),
];

/// Shared metric function.
pub type MetricFn = Arc<dyn Fn(&str) -> u64 + Send + Sync>;

// == Operation ==
/// A registered metric together with its key.
///
/// Cloning is cheap; the function itself is shared.
#[derive(Clone)]
pub struct Operation {
    key: Arc<str>,
    func: MetricFn,
}

impl Operation {
    /// Creates an operation from a key and a pure function.
    pub fn new<F>(key: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&str) -> u64 + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            func: Arc::new(func),
        }
    }

    /// The operation key, e.g. `unique_chars`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Runs the metric over `text`.
    pub fn compute(&self, text: &str) -> u64 {
        (self.func)(text)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation").field("key", &self.key).finish()
    }
}

// == Operation Registry ==
/// Registry of available operations keyed by name.
#[derive(Debug, Default, Clone)]
pub struct OperationRegistry {
    operations: HashMap<String, Operation>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in metric.
    ///
    /// Built-ins go through [`register`](Self::register), so a key clash
    /// among them surfaces as `DuplicateOperation`.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for (key, func) in BUILTINS {
            registry.register(key, func)?;
        }
        Ok(registry)
    }

    // == Register ==
    /// Adds an operation under `key`.
    ///
    /// Fails with `DuplicateOperation` if the key is already taken; the
    /// existing operation is left untouched.
    pub fn register<F>(&mut self, key: &str, func: F) -> Result<()>
    where
        F: Fn(&str) -> u64 + Send + Sync + 'static,
    {
        if self.operations.contains_key(key) {
            return Err(ServiceError::DuplicateOperation(key.to_string()));
        }
        self.operations
            .insert(key.to_string(), Operation::new(key, func));
        Ok(())
    }

    // == Resolve ==
    /// Looks up the operation registered under `key`.
    pub fn resolve(&self, key: &str) -> Result<Operation> {
        self.operations
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownOperation(key.to_string()))
    }

    /// Returns true if `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.operations.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
