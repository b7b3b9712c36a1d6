//! Lightweight Ollama service for text generation and embeddings.
//!
//! Thin client for the local Ollama API:
//! - `POST {endpoint}/api/generate`   — synchronous text generation (`stream=false`)
//! - `POST {endpoint}/api/embeddings` — embeddings retrieval
//!
//! Uses the universal [`LlmModelConfig`] and requires the selected provider
//! to be [`LlmProvider::Ollama`]. Mostly useful for running the chatbot
//! without a Gemini API key.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HttpError, Result, make_snippet};

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses one HTTP client with
/// a configurable timeout. High-level calls:
/// - [`OllamaService::generate`]   — synchronous text generation
/// - [`OllamaService::embeddings`] — embeddings retrieval
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embeddings: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::InvalidProvider`] if `cfg.provider` is not `Ollama`
    /// - [`AiLlmError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(AiLlmError::InvalidProvider { expected: "Ollama" });
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(AiLlmError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/api/generate", base);
        let url_embeddings = format!("{}/api/embeddings", base);

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embeddings,
        })
    }

    /// Performs a **non-streaming** generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`       ← `self.cfg.model`
    /// - `prompt`      ← argument
    /// - `system`      ← optional system instruction
    /// - `num_predict` ← `self.cfg.max_tokens`
    /// - `temperature` ← `self.cfg.temperature`
    /// - `top_p`       ← `self.cfg.top_p`
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - [`AiLlmError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        let body = GenerateRequest::from_cfg(&self.cfg, prompt, system);

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            }));
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            AiLlmError::Decode(format!("serde error: {e}; ensure `stream=false` is used"))
        })?;

        Ok(out.response)
    }

    /// Retrieves embeddings via `/api/embeddings`.
    ///
    /// Usually a dedicated embedding model is configured for this; create a
    /// separate [`OllamaService`] per model.
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - [`AiLlmError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
        };

        debug!("POST {}", self.url_embeddings);
        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            }));
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
            AiLlmError::Decode(format!("serde error: {e}; expected `{{ embedding: number[] }}`"))
        })?;

        Ok(out.embedding)
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let options = GenerateOptions {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            num_predict: cfg.max_tokens,
        };

        Self {
            model: &cfg.model,
            prompt,
            system,
            stream: false,
            options: Some(options),
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response body for `/api/generate`. The generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Request body for `/api/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response body for `/api/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_endpoint() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen3:14b".into(),
            endpoint: "localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        };
        assert!(OllamaService::new(cfg).is_err());
    }

    #[test]
    fn generate_request_serializes_options() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen3:14b".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: Some(128),
            temperature: Some(0.7),
            top_p: Some(0.9),
            timeout_secs: None,
        };
        let body = GenerateRequest::from_cfg(&cfg, "hello", Some("be brief"));
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["model"], "qwen3:14b");
        assert_eq!(v["system"], "be brief");
        assert_eq!(v["stream"], false);
        assert_eq!(v["options"]["num_predict"], 128);
    }
}
