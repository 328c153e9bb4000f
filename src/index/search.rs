//! Ranking and matching over the index.
//!
//! Both operations come in one implementation parameterized by
//! [`ExecutionMode`]. The sequential path accumulates relevance into a
//! local ordered map; the parallel path fans plus/minus words out over
//! the index's thread pool and accumulates through the sharded
//! [`ConcurrentMap`], then snapshots it once at the end. Both paths
//! build their candidate list in ascending-id order before the final
//! sort, so they agree exactly on the same normalized query and corpus.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::analysis::WordId;
use crate::concurrent::ConcurrentMap;
use crate::error::Result;
use crate::query::{Query, QueryParser};

use super::document::{DocumentId, DocumentStatus, ScoredDocument};
use super::{ExecutionMode, MAX_RESULT_COUNT, MIN_RELEVANCE_DIFFERENCE, SearchIndex};

impl SearchIndex {
    /// Rank documents with the given status against a free-text query.
    ///
    /// Returns at most [`MAX_RESULT_COUNT`] results, sorted by relevance
    /// descending; ties closer than [`MIN_RELEVANCE_DIFFERENCE`] are
    /// broken by rating descending. An empty candidate set yields an
    /// empty vector, not an error.
    pub fn find_top_documents(
        &self,
        query: &str,
        status: DocumentStatus,
        mode: ExecutionMode,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(
            query,
            move |_, document_status, _| document_status == status,
            mode,
        )
    }

    /// Rank documents accepted by an arbitrary predicate over
    /// `(id, status, rating)`.
    ///
    /// Minus words exclude documents absolutely, bypassing the
    /// predicate. Note that in [`ExecutionMode::Parallel`] the query is
    /// not normalized, so a duplicate plus-word double-counts its
    /// contribution (see [`crate::query`]).
    pub fn find_top_documents_with<P>(
        &self,
        query: &str,
        predicate: P,
        mode: ExecutionMode,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let parser = QueryParser::new(&self.stop_words, &self.arena);
        let query = parser.parse(query, mode)?;
        let mut results = self.find_all_documents(&query, &predicate, mode);
        results.sort_by(by_relevance_then_rating);
        results.truncate(MAX_RESULT_COUNT);
        Ok(results)
    }

    /// Report which plus words of `query` the document contains.
    ///
    /// Returns `None` when the document is absent. If the document has
    /// a posting for any minus word, the match list is empty but the
    /// status is still reported. The sequential path preserves the
    /// parser's normalized order; the parallel path sorts and dedups
    /// its output because its query was not normalized.
    pub fn match_document(
        &self,
        query: &str,
        id: DocumentId,
        mode: ExecutionMode,
    ) -> Result<Option<(Vec<String>, DocumentStatus)>> {
        let parser = QueryParser::new(&self.stop_words, &self.arena);
        let query = parser.parse(query, mode)?;
        let Some(data) = self.documents.get(&id) else {
            return Ok(None);
        };
        let status = data.status;

        if query
            .minus_words
            .iter()
            .any(|&word_id| self.has_posting(word_id, id))
        {
            return Ok(Some((Vec::new(), status)));
        }

        let matched = match mode {
            ExecutionMode::Sequential => query
                .plus_words
                .iter()
                .filter(|&&word_id| self.has_posting(word_id, id))
                .map(|&word_id| self.arena.get(word_id).to_string())
                .collect(),
            ExecutionMode::Parallel => {
                let mut words: Vec<String> = self.thread_pool.install(|| {
                    query
                        .plus_words
                        .par_iter()
                        .filter(|&&word_id| self.has_posting(word_id, id))
                        .map(|&word_id| self.arena.get(word_id).to_string())
                        .collect()
                });
                words.sort();
                words.dedup();
                words
            }
        };
        Ok(Some((matched, status)))
    }

    fn find_all_documents<P>(
        &self,
        query: &Query,
        predicate: &P,
        mode: ExecutionMode,
    ) -> Vec<ScoredDocument>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance = match mode {
            ExecutionMode::Sequential => self.accumulate_sequential(query, predicate),
            ExecutionMode::Parallel => self.accumulate_parallel(query, predicate),
        };
        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.documents.get(&id).map(|data| ScoredDocument {
                    id,
                    relevance,
                    rating: data.rating,
                })
            })
            .collect()
    }

    fn accumulate_sequential<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance = BTreeMap::new();
        for &word_id in &query.plus_words {
            let Some(postings) = self.word_to_documents.get(&word_id) else {
                continue;
            };
            let idf = self.inverse_document_frequency(postings.len());
            for (&doc_id, &tf) in postings {
                let Some(data) = self.documents.get(&doc_id) else {
                    continue;
                };
                if predicate(doc_id, data.status, data.rating) {
                    *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
                }
            }
        }
        for &word_id in &query.minus_words {
            let Some(postings) = self.word_to_documents.get(&word_id) else {
                continue;
            };
            for &doc_id in postings.keys() {
                relevance.remove(&doc_id);
            }
        }
        relevance
    }

    fn accumulate_parallel<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: ConcurrentMap<f64> =
            ConcurrentMap::new(self.thread_pool.current_num_threads());
        self.thread_pool.install(|| {
            query.plus_words.par_iter().for_each(|&word_id| {
                let Some(postings) = self.word_to_documents.get(&word_id) else {
                    return;
                };
                let idf = self.inverse_document_frequency(postings.len());
                for (&doc_id, &tf) in postings {
                    let Some(data) = self.documents.get(&doc_id) else {
                        continue;
                    };
                    if predicate(doc_id, data.status, data.rating) {
                        *relevance.slot(doc_id) += tf * idf;
                    }
                }
            });
            query.minus_words.par_iter().for_each(|&word_id| {
                let Some(postings) = self.word_to_documents.get(&word_id) else {
                    return;
                };
                for &doc_id in postings.keys() {
                    relevance.erase(doc_id);
                }
            });
        });
        relevance.snapshot()
    }

    fn inverse_document_frequency(&self, documents_containing: usize) -> f64 {
        (self.documents.len() as f64 / documents_containing as f64).ln()
    }

    fn has_posting(&self, word_id: WordId, id: DocumentId) -> bool {
        self.word_to_documents
            .get(&word_id)
            .is_some_and(|postings| postings.contains_key(&id))
    }
}

/// Relevance descending; within [`MIN_RELEVANCE_DIFFERENCE`], rating
/// descending.
fn by_relevance_then_rating(a: &ScoredDocument, b: &ScoredDocument) -> Ordering {
    if (a.relevance - b.relevance).abs() < MIN_RELEVANCE_DIFFERENCE {
        b.rating.cmp(&a.rating)
    } else {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    }
}
