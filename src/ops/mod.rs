//! Operations Module
//!
//! Text metrics and the registry that maps operation keys to them.

mod builtin;
mod registry;

pub use builtin::{char_count, unique_chars, unique_words, CHAR_COUNT, UNIQUE_CHARS, UNIQUE_WORDS};
pub use registry::{MetricFn, Operation, OperationRegistry};
