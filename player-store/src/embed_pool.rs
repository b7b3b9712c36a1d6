//! Embedding executor with concurrency and dimension checks.

use crate::{embed::EmbeddingsProvider, errors::StoreError};
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

/// Embeds a list of texts, preserving order.
///
/// # Arguments
/// - `texts`: documents to embed (one per roster entry).
/// - `provider`: embedding backend.
/// - `expected_dim`: if `Some`, enforces this vector size (error on mismatch).
/// - `concurrency`: maximum number of concurrent embedding requests.
///
/// # Errors
/// Returns [`StoreError::VectorSizeMismatch`] if dimensions mismatch, or
/// [`StoreError::Provider`] if the backend fails.
pub async fn embed_texts(
    texts: &[String],
    provider: &dyn EmbeddingsProvider,
    expected_dim: Option<usize>,
    concurrency: usize,
) -> Result<Vec<Vec<f32>>, StoreError> {
    info!(
        "embed_pool::embed_texts: total={} concurrency={}",
        texts.len(),
        concurrency
    );

    if texts.is_empty() {
        debug!("embed_pool::embed_texts: nothing to embed");
        return Ok(Vec::new());
    }

    let futs = texts.iter().cloned().enumerate().map(|(i, text)| async move {
        let v = provider.embed(&text).await?;
        Ok::<(usize, Vec<f32>), StoreError>((i, v))
    });

    let results: Vec<(usize, Vec<f32>)> = stream::iter(futs)
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, StoreError>>()?;

    let mut out = vec![Vec::new(); texts.len()];
    for (i, v) in results {
        if let Some(want) = expected_dim {
            if v.len() != want {
                return Err(StoreError::VectorSizeMismatch { got: v.len(), want });
            }
        }
        out[i] = v;
    }

    debug!("embed_pool::embed_texts: embeddings filled");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::noop::NoopEmbedder;

    #[tokio::test]
    async fn preserves_order_under_concurrency() {
        let texts: Vec<String> = (0..16).map(|i| format!("player {i}")).collect();
        let provider = NoopEmbedder::new(4);
        let out = embed_texts(&texts, &provider, Some(4), 8).await.unwrap();
        assert_eq!(out.len(), texts.len());
        for (i, text) in texts.iter().enumerate() {
            let direct = provider.embed(text).await.unwrap();
            assert_eq!(out[i], direct);
        }
    }

    #[tokio::test]
    async fn dimension_mismatch_is_an_error() {
        let texts = vec!["a".to_string()];
        let provider = NoopEmbedder::new(4);
        let err = embed_texts(&texts, &provider, Some(8), 2).await.unwrap_err();
        assert!(matches!(err, StoreError::VectorSizeMismatch { got: 4, want: 8 }));
    }
}
