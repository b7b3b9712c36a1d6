use crate::errors::StoreError;
use std::{future::Future, pin::Pin};

/// Provider interface for embedding generation.
///
/// Async because real providers (Gemini, Ollama) perform HTTP requests.
/// Implement this trait to plug in another embedding backend.
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;
}

pub mod noop;
pub mod profile;
