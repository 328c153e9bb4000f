//! # Sagitta
//!
//! An in-memory TF-IDF full-text search engine for Rust.
//!
//! ## Features
//!
//! - Whitespace tokenization with stop-word filtering and eager
//!   validation
//! - Inverted index kept transactionally consistent under document
//!   add/remove
//! - TF-IDF ranking with deterministic tie-breaking, sequential or
//!   parallel
//! - Sharded concurrent accumulator so parallel ranking matches
//!   sequential results
//! - Thin collaborators: batch query runner, duplicate detector,
//!   request-statistics window, paginator
//!
//! ## Example
//!
//! ```
//! use sagitta::index::{DocumentStatus, ExecutionMode, SearchIndex};
//!
//! let mut index = SearchIndex::new(["and"]).unwrap();
//! index
//!     .add_document(0, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3])
//!     .unwrap();
//! index
//!     .add_document(1, "black dog fluffy tail", DocumentStatus::Actual, &[5])
//!     .unwrap();
//!
//! let top = index
//!     .find_top_documents("fluffy -cat", DocumentStatus::Actual, ExecutionMode::Parallel)
//!     .unwrap();
//! assert_eq!(top.len(), 1);
//! assert_eq!(top[0].id, 1);
//! ```

pub mod analysis;
pub mod batch;
pub mod concurrent;
pub mod dedup;
pub mod error;
pub mod index;
pub mod paginate;
pub mod query;
pub mod request_log;

pub use error::{Result, SagittaError};
pub use index::{
    DocumentId, DocumentStatus, ExecutionMode, ScoredDocument, SearchConfig, SearchIndex,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
