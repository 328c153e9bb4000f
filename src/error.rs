//! Error types for the Sagitta library.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`SagittaError`]. Validation is eager: the operation that introduces a
//! bad input (construction, document insertion, query parsing) is the one
//! that reports it, and not-found conditions are never errors.
//!
//! # Examples
//!
//! ```
//! use sagitta::error::{Result, SagittaError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SagittaError::invalid_argument("negative document id"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("success"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for Sagitta operations.
#[derive(Error, Debug)]
pub enum SagittaError {
    /// Caller-supplied input failed validation: a negative or duplicate
    /// document id, a token containing control characters, a malformed
    /// minus-word, or an invalid stop word at construction.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal failure, such as thread pool construction.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that may fail with [`SagittaError`].
pub type Result<T> = std::result::Result<T, SagittaError>;

impl SagittaError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SagittaError::InvalidArgument(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SagittaError::Internal(msg.into())
    }
}
