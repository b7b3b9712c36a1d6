//! Shared state for all HTTP handlers.

use std::path::PathBuf;
use std::sync::Arc;

use ai_llm_service::config::default_config::profiles_from_env;
use ai_llm_service::service_profiles::LlmServiceProfiles;
use chat_engine::EngineContext;
use player_store::embed::profile::{ProfileEmbedder, ProfileEmbedderConfig};
use player_store::{DistanceKind, PlayerStore, Roster, StoreConfig, StoreError};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Path of the roster JSONL file (source of truth).
    pub dataset_path: PathBuf,
    /// In-memory roster, guarded for concurrent query/update handlers.
    pub roster: RwLock<Roster>,
    /// Vector store over the player collection. `None` when Qdrant is not
    /// configured; the chatbot keeps answering with deterministic paths.
    pub store: Option<Arc<PlayerStore>>,
    /// LLM profiles. `None` when no provider is configured; every answer
    /// then uses the deterministic formatter.
    pub llm: Option<Arc<LlmServiceProfiles>>,
    /// Expected embedding dimensionality, if pinned via env.
    pub embedding_dim: Option<usize>,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// Nothing here is fatal: a missing roster file starts the service with
    /// an empty roster, a missing API key disables LLM enhancement, an
    /// unreachable Qdrant config disables the semantic fallback. Each
    /// degradation is logged once at startup.
    pub fn from_env() -> Self {
        let dataset_path = PathBuf::from(
            std::env::var("DATASET_PATH").unwrap_or_else(|_| "data/players.jsonl".into()),
        );

        let roster = match Roster::load(&dataset_path) {
            Ok(r) => {
                info!("Loaded {} players from {:?}", r.len(), dataset_path);
                r
            }
            Err(e) => {
                warn!("Roster file not loaded ({e}); starting with an empty roster");
                Roster::default()
            }
        };

        let llm = match profiles_from_env() {
            Ok(svc) => Some(svc),
            Err(e) => {
                warn!("LLM service not configured ({e}); answers will not be enhanced");
                None
            }
        };

        let store_cfg = store_config_from_env();
        let embedding_dim = store_cfg.embedding_dim;
        let store = match PlayerStore::new(store_cfg) {
            Ok(s) => Some(Arc::new(s)),
            Err(e) => {
                warn!("Vector store not available ({e}); semantic fallback disabled");
                None
            }
        };

        Self {
            dataset_path,
            roster: RwLock::new(roster),
            store,
            llm,
            embedding_dim,
        }
    }

    /// Backends handed to the chat engine per request.
    pub fn engine_context(&self) -> EngineContext {
        EngineContext {
            llm: self.llm.clone(),
            store: self.store.clone(),
        }
    }

    /// Embedder over the configured embedding profile, when available.
    pub fn embedder(&self) -> Option<ProfileEmbedder> {
        self.llm.as_ref().map(|svc| {
            ProfileEmbedder::new(ProfileEmbedderConfig {
                svc: svc.clone(),
                dim: self.embedding_dim,
            })
        })
    }

    /// Rebuilds the vector collection from the current roster.
    ///
    /// # Errors
    /// [`StoreError::Config`] when the store or the embedding backend is
    /// missing, otherwise whatever ingestion returns.
    pub async fn reindex(&self) -> Result<u64, StoreError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| StoreError::Config("vector store is not configured".into()))?;
        let embedder = self
            .embedder()
            .ok_or_else(|| StoreError::Config("embedding backend is not configured".into()))?;

        let roster = self.roster.read().await;
        store.rebuild(roster.players(), &embedder).await
    }
}

/// Store configuration strictly from environment, with the defaults the
/// deployment has always used.
fn store_config_from_env() -> StoreConfig {
    let url = std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://127.0.0.1:6333".into());
    let collection =
        std::env::var("QDRANT_COLLECTION").unwrap_or_else(|_| "cricket_players".into());

    let mut cfg = StoreConfig::new_default(url, collection);
    cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY").ok();
    cfg.distance = DistanceKind::Cosine;
    cfg.upsert_batch = parse_env("QDRANT_BATCH_SIZE", 256);
    cfg.exact_search = std::env::var("RAG_EXACT_SEARCH").as_deref() == Ok("true");
    cfg.embedding_dim = std::env::var("EMBEDDING_DIM")
        .ok()
        .and_then(|s| s.parse().ok());
    cfg.embedding_concurrency = std::env::var("EMBEDDING_CONCURRENCY")
        .ok()
        .and_then(|s| s.parse().ok());
    cfg
}

fn parse_env<T: std::str::FromStr>(key: &str, dflt: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}
