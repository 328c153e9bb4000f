//! The search index: document store, inverted index, and the mutation
//! path.
//!
//! A [`SearchIndex`] owns all core state: the stop words, the word
//! arena, per-document metadata and frequency maps, and the
//! word→(document→term-frequency) postings. Mutations
//! ([`SearchIndex::add_document`], [`SearchIndex::remove_document`])
//! take `&mut self`; reads take `&self`, so Rust's borrow rules enforce
//! the single-writer contract directly: a mutation can never overlap a
//! ranking, matching, or lookup on the same index.
//!
//! Within one parallel read all core state is shared read-only across
//! the workers of the index's own bounded thread pool; the only
//! internally synchronized mutable state is the
//! [`ConcurrentMap`](crate::concurrent::ConcurrentMap) accumulator.
//!
//! # Examples
//!
//! ```
//! use sagitta::index::{DocumentStatus, ExecutionMode, SearchIndex};
//!
//! let mut index = SearchIndex::new(["and"]).unwrap();
//! index
//!     .add_document(0, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3])
//!     .unwrap();
//!
//! let results = index
//!     .find_top_documents("fancy cat", DocumentStatus::Actual, ExecutionMode::Sequential)
//!     .unwrap();
//! assert_eq!(results[0].id, 0);
//! ```

pub mod config;
pub mod document;
mod search;

pub use config::{ExecutionMode, SearchConfig};
pub use document::{DocumentId, DocumentStatus, ScoredDocument};

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::analysis::{StopWordSet, WordArena, WordId};
use crate::error::{Result, SagittaError};
use document::DocumentData;

/// Maximum number of documents returned by one ranking pass.
pub const MAX_RESULT_COUNT: usize = 5;

/// Relevance delta below which two documents tie and rating decides.
pub const MIN_RELEVANCE_DIFFERENCE: f64 = 1e-6;

/// An in-memory full-text search index with TF-IDF ranking.
pub struct SearchIndex {
    stop_words: StopWordSet,
    arena: WordArena,
    documents: BTreeMap<DocumentId, DocumentData>,
    document_words: AHashMap<DocumentId, BTreeMap<WordId, f64>>,
    word_to_documents: AHashMap<WordId, BTreeMap<DocumentId, f64>>,
    thread_pool: Arc<ThreadPool>,
}

impl SearchIndex {
    /// Create an index with the given stop words and default
    /// configuration.
    ///
    /// Fails with `InvalidArgument` if any stop word contains control
    /// characters.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(stop_words, SearchConfig::default())
    }

    /// Create an index with the given stop words and configuration.
    pub fn with_config<I, S>(stop_words: I, config: SearchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_stop_word_set(StopWordSet::new(stop_words)?, config)
    }

    /// Create an index around an already-built stop word set.
    pub fn with_stop_word_set(stop_words: StopWordSet, config: SearchConfig) -> Result<Self> {
        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("sagitta-search-{i}"))
            .build()
            .map_err(|e| SagittaError::internal(format!("failed to create thread pool: {e}")))?;

        Ok(SearchIndex {
            stop_words,
            arena: WordArena::new(),
            documents: BTreeMap::new(),
            document_words: AHashMap::new(),
            word_to_documents: AHashMap::new(),
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// Add a document to the index.
    ///
    /// The rating is computed once, as the truncating average of
    /// `ratings` (0 if empty); each occurrence of a non-stop word
    /// contributes `1 / word_count` to the document's term frequency
    /// for that word.
    ///
    /// Fails with `InvalidArgument` if `id` is negative or already
    /// present, or if any token of `text` contains control characters.
    /// Validation happens before any structure is touched, so a failed
    /// call leaves the index unchanged.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SagittaError::invalid_argument(format!(
                "document id {id} is negative"
            )));
        }
        if self.documents.contains_key(&id) {
            return Err(SagittaError::invalid_argument(format!(
                "document id {id} already exists"
            )));
        }
        let tokens = split_into_words(text);
        if let Some(bad) = tokens.iter().find(|word| !is_valid_word(word)) {
            return Err(SagittaError::invalid_argument(format!(
                "document text contains control characters: {bad:?}"
            )));
        }

        let words: Vec<&str> = tokens
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect();

        // A document made only of stop words still exists, with empty maps.
        let mut word_freq: BTreeMap<WordId, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let word_id = self.arena.intern(word);
                *word_freq.entry(word_id).or_insert(0.0) += inv_word_count;
            }
        }

        for (&word_id, &tf) in &word_freq {
            self.word_to_documents
                .entry(word_id)
                .or_default()
                .insert(id, tf);
        }
        self.documents.insert(
            id,
            DocumentData {
                rating: document::average_rating(ratings),
                status,
            },
        );
        self.document_words.insert(id, word_freq);
        Ok(())
    }

    /// Remove a document from the index. A no-op if `id` is absent.
    ///
    /// In [`ExecutionMode::Parallel`] the per-word posting deletions fan
    /// out across the thread pool; the cheap structural deletions run on
    /// the calling thread after the join.
    pub fn remove_document(&mut self, id: DocumentId, mode: ExecutionMode) {
        if !self.documents.contains_key(&id) {
            return;
        }
        match mode {
            ExecutionMode::Sequential => self.remove_postings_sequential(id),
            ExecutionMode::Parallel => self.remove_postings_parallel(id),
        }
        self.documents.remove(&id);
        self.document_words.remove(&id);
    }

    fn remove_postings_sequential(&mut self, id: DocumentId) {
        let Some(words) = self.document_words.get(&id) else {
            return;
        };
        for &word_id in words.keys() {
            if let Some(postings) = self.word_to_documents.get_mut(&word_id) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.word_to_documents.remove(&word_id);
                }
            }
        }
    }

    fn remove_postings_parallel(&mut self, id: DocumentId) {
        let Some(words) = self.document_words.get(&id) else {
            return;
        };
        // Detach the affected posting lists so every worker owns a
        // disjoint one.
        let mut detached: Vec<(WordId, BTreeMap<DocumentId, f64>)> = words
            .keys()
            .filter_map(|word_id| self.word_to_documents.remove_entry(word_id))
            .collect();

        self.thread_pool.install(|| {
            detached.par_iter_mut().for_each(|(_, postings)| {
                postings.remove(&id);
            });
        });

        for (word_id, postings) in detached {
            if !postings.is_empty() {
                self.word_to_documents.insert(word_id, postings);
            }
        }
    }

    /// The document's word→term-frequency map, resolved to words.
    ///
    /// Returns an empty map when `id` is absent; never an error.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<&str, f64> {
        self.document_words
            .get(&id)
            .map(|words| {
                words
                    .iter()
                    .map(|(&word_id, &tf)| (self.arena.get(word_id), tf))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ascending iteration over all currently-present document ids.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    /// Number of documents currently in the index.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Whether a document with this id is present.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Number of distinct non-stop words ever indexed.
    ///
    /// Vocabulary is never reclaimed, so this grows monotonically and
    /// is unaffected by document removal.
    pub fn vocabulary_len(&self) -> usize {
        self.arena.len()
    }
}
