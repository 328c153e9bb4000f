//! Stop word sets.
//!
//! Stop words are excluded from indexing and querying entirely. A set is
//! validated once at construction; an invalid stop word is an
//! [`InvalidArgument`](crate::error::SagittaError::InvalidArgument)
//! error, while empty strings are silently dropped.
//!
//! # Examples
//!
//! ```
//! use sagitta::analysis::stop_words::StopWordSet;
//!
//! let stop_words = StopWordSet::new(["and", "the", ""]).unwrap();
//! assert!(stop_words.contains("and"));
//! assert!(!stop_words.contains("cat"));
//! assert_eq!(stop_words.len(), 2);
//! ```

use ahash::AHashSet;

use crate::analysis::tokenizer::is_valid_word;
use crate::error::{Result, SagittaError};

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// A validated set of stop words.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: AHashSet<String>,
}

impl StopWordSet {
    /// Build a stop word set from any collection of strings.
    ///
    /// Empty strings are dropped; a word containing control characters
    /// fails the whole construction.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AHashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SagittaError::invalid_argument(format!(
                    "stop word contains control characters: {word:?}"
                )));
            }
            set.insert(word.to_string());
        }
        Ok(StopWordSet { words: set })
    }

    /// A set with the default English stop words.
    pub fn english() -> Self {
        StopWordSet {
            words: DEFAULT_ENGLISH_STOP_WORDS
                .iter()
                .map(|word| word.to_string())
                .collect(),
        }
    }

    /// Whether `word` is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
