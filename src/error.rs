//! Error types for pdf-merger

use thiserror::Error;

/// Errors produced by the orchestrator, the API client and configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level HTTP failure (unreachable host, broken connection)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The merge endpoint answered with a non-success status
    #[error("{message}")]
    MergeRejected {
        /// HTTP status code returned by the service
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// Local I/O failure (reading a staged file, writing the merged output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// A positional operation referenced an index outside the file list
    #[error("index {index} is out of bounds for {len} staged file(s)")]
    InvalidIndex {
        /// Offending index
        index: usize,
        /// Number of staged files at the time of the call
        len: usize,
    },

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for pdf-merger
pub type Result<T> = std::result::Result<T, Error>;
