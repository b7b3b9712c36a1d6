//! Retrieval helpers: low-level vector search and high-level player context.

use crate::config::StoreConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::filters::to_qdrant_filter;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{Player, PlayerHit, PlayerQuery};

use qdrant_client::qdrant::Filter;
use tracing::trace;

/// Performs a low-level similarity search given a ready query vector.
///
/// # Errors
/// Returns `StoreError::Qdrant` on client failures.
pub async fn search_by_vector(
    client: &QdrantFacade,
    query_vector: Vec<f32>,
    top_k: u64,
    filter: Option<Filter>,
    with_payload: bool,
    exact: bool,
) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
    trace!("retrieve::search_by_vector top_k={top_k} with_payload={with_payload} exact={exact}");
    client
        .search(query_vector, top_k, filter, with_payload, exact)
        .await
}

/// Embeds the query text and returns reconstructed player hits.
///
/// # Errors
/// Returns embedding/provider errors or Qdrant failures.
pub async fn player_context(
    cfg: &StoreConfig,
    client: &QdrantFacade,
    query: PlayerQuery<'_>,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<PlayerHit>, StoreError> {
    trace!(
        "retrieve::player_context top_k={} filter={}",
        query.top_k,
        query.filter.is_some()
    );

    let qv = provider.embed(query.text).await?;
    let filter = query.filter.as_ref().map(to_qdrant_filter);

    let hits = search_by_vector(
        client,
        qv,
        query.top_k,
        filter,
        /* with_payload = */ true,
        cfg.exact_search,
    )
    .await?;

    let mut out = Vec::with_capacity(hits.len());
    for (score, payload) in hits {
        let document = payload
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let player = Player::from_payload(&payload);
        out.push(PlayerHit {
            score,
            player,
            document,
            raw_payload: payload,
        });
    }

    trace!("retrieve::player_context hits={}", out.len());
    Ok(out)
}
