//! Shared LLM service for the chatbot backend.
//!
//! Provides:
//! - Thin HTTP clients for the supported providers (Gemini, Ollama)
//! - Three logical profiles: `fast` (entity extraction), `slow` (answer
//!   quality), and `embedding`
//! - Resilient health probes suitable for a `/health` endpoint
//! - A crate-scoped `tracing` layer for library logs
//!
//! Construct [`service_profiles::LlmServiceProfiles`] once (usually from
//! environment via [`config::default_config::profiles_from_env`]), wrap it
//! in `Arc`, and pass clones to dependents.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;
