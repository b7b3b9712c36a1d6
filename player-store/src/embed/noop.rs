//! Deterministic offline embedder for tests and dry runs.

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;

/// Produces fixed-dimension pseudo-embeddings from a cheap byte hash.
///
/// Not semantically meaningful; exists so ingestion and retrieval code
/// paths can run without a live embedding backend.
#[derive(Clone, Copy, Debug)]
pub struct NoopEmbedder {
    pub dim: usize,
}

impl NoopEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl EmbeddingsProvider for NoopEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>
    {
        let dim = self.dim;
        let bytes = text.as_bytes().to_vec();
        Box::pin(async move {
            let mut v = vec![0f32; dim.max(1)];
            for (i, b) in bytes.iter().enumerate() {
                v[i % dim.max(1)] += *b as f32 / 255.0;
            }
            Ok(v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeddings_are_deterministic() {
        let e = NoopEmbedder::new(8);
        let a = e.embed("Nuwan Perera").await.unwrap();
        let b = e.embed("Nuwan Perera").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }
}
