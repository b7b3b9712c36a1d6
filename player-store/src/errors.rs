//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for player-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing / serialization errors.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A roster update payload that cannot be applied.
    #[error("invalid roster update: {0}")]
    InvalidUpdate(String),

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// The embedding backend failed.
    #[error("embedding provider error: {0}")]
    Provider(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
