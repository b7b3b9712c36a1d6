//! Embedding provider backed by the shared LLM service profiles.
//!
//! Delegates to the `embedding` profile of [`LlmServiceProfiles`] and
//! optionally enforces the expected dimensionality.

use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;

/// Configuration for the profile-backed embedding provider.
#[derive(Clone)]
pub struct ProfileEmbedderConfig {
    pub svc: Arc<LlmServiceProfiles>,
    /// Expected embedding dimension size (None = accept whatever comes back).
    pub dim: Option<usize>,
}

/// Embedding provider that calls the shared LLM service.
#[derive(Clone)]
pub struct ProfileEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: Option<usize>,
}

impl ProfileEmbedder {
    /// Construct a new embedder from configuration.
    pub fn new(cfg: ProfileEmbedderConfig) -> Self {
        Self {
            svc: cfg.svc,
            dim: cfg.dim,
        }
    }
}

impl EmbeddingsProvider for ProfileEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>
    {
        Box::pin(async move {
            let v = self
                .svc
                .embed(text)
                .await
                .map_err(|e| StoreError::Provider(e.to_string()))?;

            if let Some(want) = self.dim {
                if v.len() != want {
                    return Err(StoreError::VectorSizeMismatch { got: v.len(), want });
                }
            }

            Ok(v)
        })
    }
}
