//! Sliding-window request statistics.
//!
//! [`RequestLog`] wraps an index's
//! [`find_top_documents`](crate::index::SearchIndex::find_top_documents)
//! and retains, in arrival order, whether each of the most recent 1440
//! calls returned an empty result. Once the window is full the oldest
//! entry is evicted. Failed (malformed) queries are not recorded.

use std::collections::VecDeque;

use crate::error::Result;
use crate::index::{DocumentId, DocumentStatus, ExecutionMode, ScoredDocument, SearchIndex};

/// Number of requests retained: one per minute over a day.
const WINDOW_SIZE: usize = 1440;

/// A fixed-size sliding window over search requests.
pub struct RequestLog<'a> {
    index: &'a SearchIndex,
    /// `true` per entry that returned no results.
    window: VecDeque<bool>,
    empty_count: usize,
}

impl<'a> RequestLog<'a> {
    /// Wrap an index with an empty window.
    pub fn new(index: &'a SearchIndex) -> Self {
        RequestLog {
            index,
            window: VecDeque::with_capacity(WINDOW_SIZE),
            empty_count: 0,
        }
    }

    /// Run a status-filtered search and record whether it came back
    /// empty.
    pub fn add_request(
        &mut self,
        query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        let results = self
            .index
            .find_top_documents(query, status, ExecutionMode::Sequential)?;
        self.record(results.is_empty());
        Ok(results)
    }

    /// Run a predicate-filtered search and record whether it came back
    /// empty.
    pub fn add_request_with<P>(&mut self, query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let results = self
            .index
            .find_top_documents_with(query, predicate, ExecutionMode::Sequential)?;
        self.record(results.is_empty());
        Ok(results)
    }

    /// Count of empty-result calls currently in the window.
    pub fn no_result_requests(&self) -> usize {
        self.empty_count
    }

    fn record(&mut self, empty: bool) {
        if self.window.len() == WINDOW_SIZE {
            if let Some(true) = self.window.pop_front() {
                self.empty_count -= 1;
            }
        }
        self.window.push_back(empty);
        if empty {
            self.empty_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> SearchIndex {
        let mut index = SearchIndex::new(["and"]).unwrap();
        index
            .add_document(0, "curly cat", DocumentStatus::Actual, &[1])
            .unwrap();
        index
    }

    #[test]
    fn test_counts_empty_results() {
        let index = corpus();
        let mut log = RequestLog::new(&index);
        log.add_request("cat", DocumentStatus::Actual).unwrap();
        log.add_request("unicorn", DocumentStatus::Actual).unwrap();
        log.add_request("dragon", DocumentStatus::Actual).unwrap();
        assert_eq!(log.no_result_requests(), 2);
    }

    #[test]
    fn test_window_evicts_oldest_entries() {
        let index = corpus();
        let mut log = RequestLog::new(&index);
        // Fill the whole window with empty results.
        for _ in 0..WINDOW_SIZE {
            log.add_request("unicorn", DocumentStatus::Actual).unwrap();
        }
        assert_eq!(log.no_result_requests(), WINDOW_SIZE);
        // Each non-empty result evicts one empty entry.
        for step in 1..=10 {
            log.add_request("cat", DocumentStatus::Actual).unwrap();
            assert_eq!(log.no_result_requests(), WINDOW_SIZE - step);
        }
    }

    #[test]
    fn test_failed_queries_are_not_recorded() {
        let index = corpus();
        let mut log = RequestLog::new(&index);
        assert!(log.add_request("--cat", DocumentStatus::Actual).is_err());
        assert_eq!(log.no_result_requests(), 0);
    }

    #[test]
    fn test_predicate_requests_are_recorded_too() {
        let index = corpus();
        let mut log = RequestLog::new(&index);
        log.add_request_with("cat", |_, _, _| false).unwrap();
        assert_eq!(log.no_result_requests(), 1);
    }
}
