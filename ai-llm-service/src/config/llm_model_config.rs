use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// One value describes one (provider, endpoint, model) combination together
/// with its sampling knobs. The same struct is used for generation and for
/// embedding profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend (Gemini or Ollama).
    pub provider: LlmProvider,

    /// Model identifier string (e.g. `"gemini-1.5-pro"`, `"qwen3:14b"`).
    pub model: String,

    /// Inference endpoint (API base URL or local server URL).
    pub endpoint: String,

    /// Optional API key for authentication (required for Gemini).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
