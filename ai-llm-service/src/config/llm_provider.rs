/// Represents the provider (backend) used for LLM inference.
///
/// The chatbot supports Google's Gemini API for hosted inference and a
/// local Ollama runtime for development without an API key. Adding more
/// providers later (e.g. OpenAI, Anthropic) means extending this enum and
/// the matching service/probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini API (`generativelanguage.googleapis.com`).
    Gemini,
    /// Local Ollama runtime for on-device inference.
    Ollama,
}
