//! Default LLM configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], grouped by provider and
//! role. Two providers are supported:
//!
//! - **Gemini** — hosted inference, needs `GEMINI_API_KEY`
//! - **Ollama** — local inference for development
//!
//! with three roles each:
//!
//! - **Slow**      → high-quality model (final answer rewriting)
//! - **Fast**      → cheaper model (query analysis, entity extraction)
//! - **Embedding** → embedding generator for the vector store
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND` = provider kind (`gemini` (default) or `ollama`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! Gemini-specific:
//! - `GEMINI_API_KEY`        = API key (mandatory)
//! - `GEMINI_MODEL`          = slow/quality model (mandatory)
//! - `GEMINI_MODEL_FAST`     = fast model (optional, falls back to `GEMINI_MODEL`)
//! - `GEMINI_EMBEDDING_MODEL`= embedding model (mandatory)
//! - `GEMINI_URL`            = optional API base override
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = slow/quality model (mandatory)
//! - `OLLAMA_MODEL_FAST`           = fast model (mandatory)
//! - `EMBEDDING_MODEL`             = embedding model (mandatory)

use std::sync::Arc;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_opt_u32, must_env, validate_http_endpoint},
    service_profiles::LlmServiceProfiles,
};

/// Default Gemini API base.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Resolves the provider kind from `LLM_KIND` (default: `gemini`).
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for unknown values.
pub fn provider_kind() -> Result<LlmProvider, AiLlmError> {
    let kind = std::env::var("LLM_KIND").unwrap_or_else(|_| "gemini".into());
    match kind.trim().to_ascii_lowercase().as_str() {
        "gemini" => Ok(LlmProvider::Gemini),
        "ollama" => Ok(LlmProvider::Ollama),
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}

/// Builds the three profiles `(fast, slow, embedding)` for the configured
/// provider and wraps them in a ready-to-share [`LlmServiceProfiles`].
///
/// # Errors
/// Propagates missing/invalid environment variables for the selected kind.
pub fn profiles_from_env() -> Result<Arc<LlmServiceProfiles>, AiLlmError> {
    let (fast, slow, embedding) = match provider_kind()? {
        LlmProvider::Gemini => (
            config_gemini_fast()?,
            config_gemini_slow()?,
            config_gemini_embedding()?,
        ),
        LlmProvider::Ollama => (
            config_ollama_fast()?,
            config_ollama_slow()?,
            config_ollama_embedding()?,
        ),
    };
    Ok(Arc::new(LlmServiceProfiles::new(
        fast,
        Some(slow),
        embedding,
        None,
    )?))
}

/// Resolves the Gemini API base strictly from environment.
///
/// Precedence: `GEMINI_URL` if present and non-empty, otherwise the public
/// Google endpoint.
fn gemini_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("GEMINI_URL") {
        if !url.trim().is_empty() {
            validate_http_endpoint("GEMINI_URL", url.trim())?;
            return Ok(url);
        }
    }
    Ok(GEMINI_API_BASE.to_string())
}

/// Config for the **slow/quality** Gemini model.
///
/// # Env
/// - `GEMINI_API_KEY`, `GEMINI_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
pub fn config_gemini_slow() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = gemini_endpoint()?;
    let api_key = must_env("GEMINI_API_KEY")?;
    let model = must_env("GEMINI_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Config for the **fast** Gemini model.
///
/// `GEMINI_MODEL_FAST` is optional; the quality model doubles as the fast
/// one when unset (the original deployment ran a single model).
pub fn config_gemini_fast() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = gemini_endpoint()?;
    let api_key = must_env("GEMINI_API_KEY")?;
    let model = std::env::var("GEMINI_MODEL_FAST")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Ok)
        .unwrap_or_else(|| must_env("GEMINI_MODEL"))?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.7),
        top_p: Some(0.9),
        timeout_secs: Some(45),
    })
}

/// Config for the **embedding** Gemini model.
///
/// # Env
/// - `GEMINI_API_KEY`, `GEMINI_EMBEDDING_MODEL` (required)
pub fn config_gemini_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = gemini_endpoint()?;
    let api_key = must_env("GEMINI_API_KEY")?;
    let model = must_env("GEMINI_EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Config for the **slow/quality** Ollama model.
pub fn config_ollama_slow() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Config for the **fast** Ollama model.
pub fn config_ollama_fast() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL_FAST")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.7),
        top_p: Some(0.9),
        timeout_secs: Some(45),
    })
}

/// Config for the **embedding** Ollama model.
pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
