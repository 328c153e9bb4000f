//! Batch query runner: fans independent queries out in parallel.
//!
//! Each query is one self-contained sequential
//! [`find_top_documents`](crate::index::SearchIndex::find_top_documents)
//! call; the fan-out is across the query list, not within a query, so
//! results come back in input-query order.

use rayon::prelude::*;

use crate::error::Result;
use crate::index::{DocumentStatus, ExecutionMode, ScoredDocument, SearchIndex};

/// Run every query against the index, in parallel across queries.
///
/// The output vector is aligned with `queries`: `result[i]` holds the
/// ranked documents of `queries[i]`. The first malformed query fails
/// the whole batch.
pub fn process_queries(
    index: &SearchIndex,
    queries: &[String],
) -> Result<Vec<Vec<ScoredDocument>>> {
    queries
        .par_iter()
        .map(|query| index.find_top_documents(query, DocumentStatus::Actual, ExecutionMode::Sequential))
        .collect()
}

/// Like [`process_queries`], flattened into one sequence.
///
/// Per-query order is preserved and queries are concatenated in input
/// order.
pub fn process_queries_joined(
    index: &SearchIndex,
    queries: &[String],
) -> Result<Vec<ScoredDocument>> {
    Ok(process_queries(index, queries)?.into_iter().flatten().collect())
}
