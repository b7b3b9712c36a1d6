//! Player roster storage and semantic retrieval over Qdrant.
//!
//! This crate provides a clean API to:
//! - Load and persist the roster dataset (JSONL) and apply upstream updates
//! - Ingest players into a Qdrant collection with profile embeddings
//! - Retrieve the closest players for a free-text query
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules.

mod config;
mod embed_pool;
mod errors;
mod filters;
mod ingest;
mod qdrant_facade;
mod record;
mod retrieve;
mod roster;

pub mod embed;

pub use config::{DistanceKind, StoreConfig, VectorSpace};
pub use embed::EmbeddingsProvider;
pub use errors::StoreError;
pub use record::{Player, PlayerFilter, PlayerHit, PlayerQuery, PlayerRole};
pub use roster::{Roster, UpdateOutcome};

use tracing::{debug, trace};

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct PlayerStore {
    cfg: StoreConfig,
    client: qdrant_facade::QdrantFacade,
}

impl PlayerStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Config` if the client initialization fails.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        trace!("PlayerStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Embeds and upserts the given players into the collection.
    ///
    /// Idempotent per player: point ids are derived from names, so
    /// re-ingesting overwrites rather than duplicates.
    ///
    /// # Errors
    /// Returns errors on embedding, vector size mismatch, or Qdrant failures.
    pub async fn index_players(
        &self,
        players: &[Player],
        provider: &(dyn EmbeddingsProvider + Send + Sync),
    ) -> Result<u64, StoreError> {
        debug!("PlayerStore::index_players n={}", players.len());
        ingest::ingest_players(&self.cfg, players, provider, &self.client).await
    }

    /// Drops the collection and re-ingests the full roster.
    ///
    /// Used after roster updates so deletions and renames are reflected.
    ///
    /// # Errors
    /// Same failure modes as [`PlayerStore::index_players`].
    pub async fn rebuild(
        &self,
        players: &[Player],
        provider: &(dyn EmbeddingsProvider + Send + Sync),
    ) -> Result<u64, StoreError> {
        debug!("PlayerStore::rebuild n={}", players.len());
        self.client.drop_collection().await?;
        ingest::ingest_players(&self.cfg, players, provider, &self.client).await
    }

    /// Performs a low-level vector search and returns `(score, payload)` tuples.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if search fails.
    pub async fn search_by_vector(
        &self,
        query_vector: Vec<f32>,
        top_k: u64,
        filter: Option<PlayerFilter>,
        with_payload: bool,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        trace!("PlayerStore::search_by_vector top_k={top_k} with_payload={with_payload}");
        let qfilter = filter.as_ref().map(filters::to_qdrant_filter);
        retrieve::search_by_vector(
            &self.client,
            query_vector,
            top_k,
            qfilter,
            with_payload,
            self.cfg.exact_search,
        )
        .await
    }

    /// Retrieves the closest players for a textual query.
    ///
    /// # Errors
    /// Returns embedding errors or Qdrant failures.
    pub async fn player_context(
        &self,
        query: PlayerQuery<'_>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<PlayerHit>, StoreError> {
        trace!("PlayerStore::player_context top_k={}", query.top_k);
        retrieve::player_context(&self.cfg, &self.client, query, provider).await
    }
}
