//! Configuration for the search index.

use serde::{Deserialize, Serialize};

/// Execution strategy for ranking, matching, and removal.
///
/// One implementation is parameterized by this value instead of
/// duplicating sequential/parallel method pairs. Parallel operations
/// are fork-join on the index's own bounded thread pool; the caller
/// blocks until all workers finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Single thread, no worker fan-out.
    Sequential,
    /// Fork-join fan-out over the index's thread pool.
    Parallel,
}

/// Configuration for a [`SearchIndex`](crate::index::SearchIndex).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Thread pool size for parallel execution.
    /// If `None`, uses the number of CPU cores.
    ///
    /// The concurrent accumulator used by parallel ranking shards its
    /// key space to match this size.
    pub thread_pool_size: Option<usize>,
}
