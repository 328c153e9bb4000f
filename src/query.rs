//! Query parsing: tokenization, minus-word classification, and
//! normalization.
//!
//! A raw query is split into words; a leading `-` marks a minus word.
//! After stripping the sign, a token is rejected when the remainder
//! contains control characters, is empty (a bare `-`), or itself starts
//! with `-` (double negation). Stop words are dropped silently
//! regardless of sign. Words the index has never seen are dropped after
//! validation: with no arena handle they can neither score, veto, nor
//! match.
//!
//! Sequential parsing additionally sorts each bucket lexicographically
//! and removes duplicates. Parallel parsing deliberately skips that
//! normalization for throughput, so a duplicate plus-word reaching the
//! ranker through the parallel path double-counts its term-frequency
//! contribution. This asymmetry is intentional and relied upon by
//! existing callers; do not fold the two paths together silently.

use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::analysis::{StopWordSet, WordArena, WordId};
use crate::error::{Result, SagittaError};
use crate::index::config::ExecutionMode;

/// A parsed query: plus-word and minus-word buckets of arena handles.
///
/// Buckets are sorted and deduplicated only when the query was parsed
/// sequentially.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: Vec<WordId>,
    pub minus_words: Vec<WordId>,
}

/// One classified query token.
struct QueryToken<'t> {
    word: &'t str,
    is_minus: bool,
    is_stop: bool,
}

/// Parses raw query text against an index's stop words and arena.
pub(crate) struct QueryParser<'a> {
    stop_words: &'a StopWordSet,
    arena: &'a WordArena,
}

impl<'a> QueryParser<'a> {
    pub(crate) fn new(stop_words: &'a StopWordSet, arena: &'a WordArena) -> Self {
        QueryParser { stop_words, arena }
    }

    /// Parse `text` into a [`Query`], normalizing the buckets only in
    /// [`ExecutionMode::Sequential`].
    pub(crate) fn parse(&self, text: &str, mode: ExecutionMode) -> Result<Query> {
        let mut query = Query::default();
        for raw in split_into_words(text) {
            let token = self.parse_token(raw)?;
            if token.is_stop {
                continue;
            }
            let Some(word_id) = self.arena.lookup(token.word) else {
                continue;
            };
            if token.is_minus {
                query.minus_words.push(word_id);
            } else {
                query.plus_words.push(word_id);
            }
        }
        if mode == ExecutionMode::Sequential {
            self.normalize(&mut query.plus_words);
            self.normalize(&mut query.minus_words);
        }
        Ok(query)
    }

    /// Sort a bucket lexicographically by resolved word and dedup.
    fn normalize(&self, words: &mut Vec<WordId>) {
        words.sort_by(|&a, &b| self.arena.get(a).cmp(self.arena.get(b)));
        words.dedup();
    }

    fn parse_token<'t>(&self, raw: &'t str) -> Result<QueryToken<'t>> {
        let (word, is_minus) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        if !is_valid_word(word) {
            return Err(SagittaError::invalid_argument(format!(
                "query word contains control characters: {word:?}"
            )));
        }
        if word.is_empty() {
            return Err(SagittaError::invalid_argument("no word after '-'"));
        }
        if word.starts_with('-') {
            return Err(SagittaError::invalid_argument(format!(
                "double '-' before word: {raw:?}"
            )));
        }
        Ok(QueryToken {
            word,
            is_minus,
            is_stop: self.stop_words.contains(word),
        })
    }
}
