//! Universal health service for LLM backends (Gemini, Ollama).
//!
//! Lightweight health checks for the supported providers:
//! - Gemini: `GET {endpoint}/models?key=…` (best-effort model existence check)
//! - Ollama: `GET {endpoint}/api/tags` (best-effort model existence check)
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a
//! status endpoint. [`HealthService::check`] is resilient and never fails
//! (errors mapped to `ok=false`). Provider-specific probes (`try_*`) return
//! strict `Result`.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HttpError, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g. "Gemini", "Ollama").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Optional model identifier relevant to the probe (if any).
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the main probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    #[inline]
    fn ok(
        provider: LlmProvider,
        endpoint: &str,
        model: Option<&str>,
        latency_ms: u128,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: format!("{provider:?}"),
            endpoint: endpoint.to_string(),
            model: model.map(str::to_string),
            ok: true,
            latency_ms,
            message: message.into(),
        }
    }

    #[inline]
    fn fail(
        provider: LlmProvider,
        endpoint: &str,
        model: Option<&str>,
        latency_ms: u128,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: format!("{provider:?}"),
            endpoint: endpoint.to_string(),
            model: model.map(str::to_string),
            ok: false,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A universal health checker that reuses a single HTTP client.
///
/// The client is constructed with a default timeout. Individual probes may
/// override the timeout per request based on the provided config.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Checks health for a single LLM config, routing to the provider-specific probe.
    ///
    /// This method is **resilient**: it never returns an error. Any failure is
    /// converted to `HealthStatus { ok: false, message: … }`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        // Quick endpoint validation to avoid obvious issues.
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            warn!(
                provider = ?cfg.provider,
                endpoint = %cfg.endpoint,
                "invalid endpoint (empty or missing http/https)"
            );
            return HealthStatus::fail(
                cfg.provider,
                endpoint,
                Some(&cfg.model),
                0,
                "endpoint is empty or missing http/https",
            );
        }

        let start = Instant::now();
        let result = match cfg.provider {
            LlmProvider::Gemini => self.try_probe_gemini(cfg).await,
            LlmProvider::Ollama => self.try_probe_ollama(cfg).await,
        };

        match result {
            Ok(mut status) => {
                if status.latency_ms == 0 {
                    status.latency_ms = start.elapsed().as_millis();
                }
                info!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    model = %status.model.as_deref().unwrap_or("n/a"),
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status =
                    Self::status_from_error(cfg, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    model = %status.model.as_deref().unwrap_or("n/a"),
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Checks health for multiple configs and returns a vector of statuses.
    ///
    /// Never returns an error: each failing check is converted into a
    /// `HealthStatus` with `ok = false`.
    pub async fn check_many(&self, configs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        debug!(count = configs.len(), "running batch health probes");
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    /// Strict Gemini probe. Returns an error on hard failures.
    ///
    /// Probe:
    /// - `GET {endpoint}/models?key=<api_key>`
    /// - Ensure 2xx
    /// - Best-effort: verify `cfg.model` appears in the returned model list
    ///   (entries are named `models/<id>`)
    async fn try_probe_gemini(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let base = cfg.endpoint.trim_end_matches('/');
        let api_key = cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiLlmError::Decode("missing Gemini API key".into()))?;
        let url = format!("{base}/models?key={api_key}");
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let start = Instant::now();
        debug!(
            provider = "Gemini",
            endpoint = %cfg.endpoint,
            model = %cfg.model,
            "GET {}/models", base
        );

        let resp = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(AiLlmError::from)?;

        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                provider = "Gemini",
                %status,
                %snippet,
                latency_ms = latency,
                "health GET /models returned non-success status"
            );

            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url: format!("{base}/models?key=***"),
                snippet,
            }));
        }

        // Expected minimal JSON: { "models": [ { "name": "models/<id>" }, … ] }
        #[derive(serde::Deserialize)]
        struct ModelItem {
            name: String,
        }
        #[derive(serde::Deserialize)]
        struct Models {
            #[serde(default)]
            models: Vec<ModelItem>,
        }

        match resp.json::<Models>().await {
            Ok(models) => {
                let suffix = format!("models/{}", cfg.model);
                let exists = models.models.iter().any(|m| m.name == suffix);
                if exists {
                    Ok(HealthStatus::ok(
                        cfg.provider,
                        &cfg.endpoint,
                        Some(&cfg.model),
                        latency,
                        "Gemini is healthy; model is available",
                    ))
                } else {
                    Ok(HealthStatus::fail(
                        cfg.provider,
                        &cfg.endpoint,
                        Some(&cfg.model),
                        latency,
                        "Gemini is up, but model not found in /models",
                    ))
                }
            }
            Err(e) => {
                warn!(
                    provider = "Gemini",
                    endpoint = %cfg.endpoint,
                    model = %cfg.model,
                    error = %e,
                    latency_ms = latency,
                    "failed to decode /models; treating server as reachable"
                );
                Ok(HealthStatus::ok(
                    cfg.provider,
                    &cfg.endpoint,
                    Some(&cfg.model),
                    latency,
                    format!("Gemini is reachable; failed to decode /models: {e}"),
                ))
            }
        }
    }

    /// Strict Ollama probe. Returns an error on hard failures.
    ///
    /// Probe:
    /// - `GET {endpoint}/api/tags`
    /// - Ensure 2xx
    /// - Best-effort: verify `cfg.model` exists in the returned tags
    async fn try_probe_ollama(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let url = format!("{}/api/tags", cfg.endpoint.trim_end_matches('/'));
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let start = Instant::now();
        debug!(
            provider = "Ollama",
            endpoint = %cfg.endpoint,
            model = %cfg.model,
            "GET {}", url
        );

        let resp = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(AiLlmError::from)?;

        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                provider = "Ollama",
                %url,
                %status,
                %snippet,
                latency_ms = latency,
                "health GET /api/tags returned non-success status"
            );

            return Err(AiLlmError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            }));
        }

        // Expected minimal JSON: { "models": [ { "name": "<model>" }, … ] }
        #[derive(serde::Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(serde::Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        match resp.json::<Tags>().await {
            Ok(tags) => {
                if let Some(models) = tags.models {
                    let exists = models.iter().any(|m| m.name == cfg.model);
                    if exists {
                        Ok(HealthStatus::ok(
                            cfg.provider,
                            &cfg.endpoint,
                            Some(&cfg.model),
                            latency,
                            "Ollama is healthy; model is available",
                        ))
                    } else {
                        Ok(HealthStatus::fail(
                            cfg.provider,
                            &cfg.endpoint,
                            Some(&cfg.model),
                            latency,
                            "Ollama is up, but model not found in /api/tags",
                        ))
                    }
                } else {
                    Ok(HealthStatus::ok(
                        cfg.provider,
                        &cfg.endpoint,
                        Some(&cfg.model),
                        latency,
                        "Ollama is healthy; tags response without `models` field",
                    ))
                }
            }
            Err(e) => {
                warn!(
                    provider = "Ollama",
                    endpoint = %cfg.endpoint,
                    model = %cfg.model,
                    error = %e,
                    latency_ms = latency,
                    "failed to decode /api/tags; treating server as reachable"
                );
                Ok(HealthStatus::ok(
                    cfg.provider,
                    &cfg.endpoint,
                    Some(&cfg.model),
                    latency,
                    format!("Ollama is reachable; failed to decode /api/tags: {e}"),
                ))
            }
        }
    }

    /// Converts an error into a failure `HealthStatus` with a concise message.
    #[inline]
    fn status_from_error(cfg: &LlmModelConfig, latency_ms: u128, msg: String) -> HealthStatus {
        HealthStatus::fail(cfg.provider, &cfg.endpoint, Some(&cfg.model), latency_ms, msg)
    }
}
