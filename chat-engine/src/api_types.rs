//! Public API types re-used by external crates (e.g., the HTTP API layer).

use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use player_store::PlayerStore;

/// Options that control a single question.
///
/// Setting a field to `0` means: "use the value from env-config".
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryOptions {
    /// Candidates to fetch from the vector store in the semantic fallback.
    /// If `0`, the engine falls back to `RAG_TOP_K` from env.
    pub top_k: u64,
}

/// Shared backends available to the engine.
///
/// Both are optional: without an LLM every answer uses the deterministic
/// formatter, without a store the semantic fallback is skipped. This keeps
/// the chatbot usable in development with no API key and no Qdrant.
#[derive(Clone, Default)]
pub struct EngineContext {
    pub llm: Option<Arc<LlmServiceProfiles>>,
    pub store: Option<Arc<PlayerStore>>,
}

impl EngineContext {
    /// Context with no backends: deterministic answers only.
    pub fn offline() -> Self {
        Self::default()
    }
}
