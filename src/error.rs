use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Everything that can go wrong while building, evaluating or persisting a network.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Malformed topology: empty network, zero-width layer, mismatched
    /// activation count, layers that do not chain, bad init range.
    #[error("invalid topology: {0}")]
    Construction(String),

    /// An input or weight vector does not have the width the receiver expects.
    #[error("dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The allocator could not provide a buffer.
    #[error("failed to allocate a buffer of {requested} values: {source}")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn construction(msg: impl Into<String>) -> NetworkError {
        NetworkError::Construction(msg.into())
    }
}
