//! Built-in Text Metrics
//!
//! Pure functions from input text to a non-negative count.

use std::collections::HashSet;

/// Operation key for [`unique_chars`].
pub const UNIQUE_CHARS: &str = "unique_chars";

/// Operation key for [`unique_words`].
pub const UNIQUE_WORDS: &str = "unique_words";

/// Operation key for [`char_count`].
pub const CHAR_COUNT: &str = "char_count";

// == Unique Chars ==
/// Counts distinct UTF-16 code units in `text`.
///
/// Positions are compared one unit at a time, so a character outside the
/// Basic Multilingual Plane contributes its two surrogate halves and
/// combining sequences are not merged.
pub fn unique_chars(text: &str) -> u64 {
    text.encode_utf16().collect::<HashSet<u16>>().len() as u64
}

// == Unique Words ==
/// Counts the tokens produced by splitting `text` on the ASCII space.
///
/// Only `' '` separates tokens. Consecutive, leading and trailing spaces
/// yield empty tokens which are still counted, so the result is always
/// the number of spaces plus one.
pub fn unique_words(text: &str) -> u64 {
    text.split(' ').count() as u64
}

// == Char Count ==
/// Counts the Unicode scalar values in `text`.
pub fn char_count(text: &str) -> u64 {
    text.chars().count() as u64
}
