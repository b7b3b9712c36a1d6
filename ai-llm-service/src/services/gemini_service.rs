//! Lightweight Gemini service for text generation and embeddings.
//!
//! Thin client for the Google Generative Language API:
//! - `POST {endpoint}/models/{model}:generateContent` — synchronous text generation
//! - `POST {endpoint}/models/{model}:embedContent`    — embeddings retrieval
//!
//! Authentication uses the `key` query parameter, matching the public API.
//! The client is built from the universal [`LlmModelConfig`] and requires
//! the selected provider to be [`LlmProvider::Gemini`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HttpError, Result, make_snippet};

/// Thin client for the Gemini API.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses one HTTP client with
/// a configurable timeout. High-level calls:
/// - [`GeminiService::generate`]   — synchronous text generation
/// - [`GeminiService::embeddings`] — embeddings retrieval
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    api_key: String,
    base: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::InvalidProvider`] if `cfg.provider` is not `Gemini`
    /// - [`AiLlmError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiLlmError::Decode`] if the config has no API key
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(AiLlmError::InvalidProvider { expected: "Gemini" });
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(AiLlmError::InvalidEndpoint(cfg.endpoint));
        }

        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiLlmError::Decode("missing Gemini API key".into()))?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base = endpoint.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            cfg,
            api_key,
            base,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base, self.cfg.model, method, self.api_key
        )
    }

    /// Performs a non-streaming `generateContent` request.
    ///
    /// The optional `system` text is sent as `systemInstruction`; sampling
    /// knobs come from the config (`temperature`, `top_p`, `max_tokens`).
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - [`AiLlmError::Decode`] if the response carries no text candidate
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: system.map(|s| SystemInstruction {
                parts: vec![Part { text: s }],
            }),
            generation_config: Some(GenerationConfig {
                temperature: self.cfg.temperature,
                top_p: self.cfg.top_p,
                max_output_tokens: self.cfg.max_tokens,
            }),
        };

        let url = self.method_url("generateContent");
        debug!("POST {}/models/{}:generateContent", self.base, self.cfg.model);

        let resp = self.client.post(&url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url: redact_key(&url),
                snippet: make_snippet(&text),
            }));
        }

        let out: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AiLlmError::Decode(format!("serde error: {e}")))?;

        out.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AiLlmError::Decode("response carried no text candidate".into()))
    }

    /// Retrieves embeddings via `embedContent`.
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - [`AiLlmError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbedContentRequest {
            content: EmbedContent {
                parts: vec![Part { text: input }],
            },
        };

        let url = self.method_url("embedContent");
        debug!("POST {}/models/{}:embedContent", self.base, self.cfg.model);

        let resp = self.client.post(&url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url: redact_key(&url),
                snippet: make_snippet(&text),
            }));
        }

        let out: EmbedContentResponse = resp.json().await.map_err(|e| {
            AiLlmError::Decode(format!(
                "serde error: {e}; expected `{{ embedding: {{ values: number[] }} }}`"
            ))
        })?;

        Ok(out.embedding.values)
    }
}

/// Strips the `key=` query parameter before a URL ends up in errors/logs.
fn redact_key(url: &str) -> String {
    match url.split_once("?key=") {
        Some((base, _)) => format!("{base}?key=***"),
        None => url.to_string(),
    }
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    content: EmbedContent<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-1.5-pro".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key: Some("test-key".into()),
            max_tokens: None,
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn rejects_wrong_provider() {
        let mut c = cfg();
        c.provider = LlmProvider::Ollama;
        assert!(GeminiService::new(c).is_err());
    }

    #[test]
    fn rejects_missing_key() {
        let mut c = cfg();
        c.api_key = None;
        assert!(GeminiService::new(c).is_err());
    }

    #[test]
    fn redacts_api_key_in_urls() {
        let svc = GeminiService::new(cfg()).unwrap();
        let url = svc.method_url("generateContent");
        assert!(url.contains("key=test-key"));
        assert!(!redact_key(&url).contains("test-key"));
    }
}
