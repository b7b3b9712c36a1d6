//! Runtime configuration loaded from environment variables.

/// Config bag for the answer pipeline. All fields have defaults.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Candidates fetched from the vector store in the semantic fallback.
    pub top_k: u64,
    /// Character budget for the context block passed to the LLM.
    pub max_ctx_chars: usize,
}

impl EngineConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            top_k: parse("RAG_TOP_K", 3),
            max_ctx_chars: parse("MAX_CTX_CHARS", 8500usize),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_ctx_chars: 8500,
        }
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}
