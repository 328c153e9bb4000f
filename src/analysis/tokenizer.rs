//! Whitespace tokenization and word validation.
//!
//! Text is split on runs of space characters; leading and trailing
//! spaces produce no tokens. A word is valid when it contains no
//! character with a code point below `0x20` (control characters,
//! including NUL). Validation is applied to stop words at construction,
//! to document text at insertion, and to query tokens at parsing, so
//! invalid words never reach the index.
//!
//! # Examples
//!
//! ```
//! use sagitta::analysis::tokenizer::{is_valid_word, split_into_words};
//!
//! let words = split_into_words("  white cat   and collar ");
//! assert_eq!(words, vec!["white", "cat", "and", "collar"]);
//!
//! assert!(is_valid_word("cat"));
//! assert!(!is_valid_word("ca\u{1}t"));
//! ```

/// Split text into non-empty, space-delimited words, in order.
///
/// Any run of space characters separates words; other characters,
/// including tabs and newlines, are part of the surrounding word (and
/// make it invalid, so such text is rejected before indexing).
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// Check that a word contains no control characters.
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}
