//! Error types for trie operations.

use thiserror::Error;

/// Error variants returned by the trie and its configuration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation exists in the API but has no implementation.
    #[error("operation not supported: {operation}")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for trie operations.
pub type Result<T> = std::result::Result<T, Error>;
