//! Typed error for the chat-engine crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Errors from the underlying player-store crate (retrieval and
    /// embedding failures both arrive through it).
    #[error("store error: {0}")]
    Store(#[from] player_store::StoreError),

    /// JSON (de)serialization issues (should be rare).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
