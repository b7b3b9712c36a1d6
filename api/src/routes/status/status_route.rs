//! GET /chatbot/ — liveness, and GET /chatbot/health — backend probes.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::core::app_state::AppState;

/// Handler: GET /chatbot/
///
/// Cheap liveness payload, matching what the upstream dashboard polls.
pub async fn home() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "Cricket Chatbot is Running!",
    }))
}

/// Handler: GET /chatbot/health
///
/// Reports roster size and a health snapshot per configured LLM profile.
/// Always 200: degraded backends show up as `ok: false` entries.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let roster_players = state.roster.read().await.len();

    let llm = match &state.llm {
        Some(svc) => json!(svc.health_all().await),
        None => Value::Null,
    };

    Json(json!({
        "status": "online",
        "roster_players": roster_players,
        "vector_store": state.store.is_some(),
        "llm": llm,
    }))
}
