//! POST /chatbot/api/update-player-data — roster sync from the upstream service.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::roster::update_roster_request::UpdateRosterResponse,
};

/// Handler: POST /chatbot/api/update-player-data
///
/// Accepts a single player entry, a `players` batch, or a deletion request;
/// persists the roster file and rebuilds the vector collection.
///
/// Structurally invalid payloads (nameless entry, non-array `players`) are
/// 400s; downstream failures keep HTTP 200 with `success: false`, which is
/// what the upstream service checks.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/chatbot/api/update-player-data \
///   -H 'content-type: application/json' \
///   -d '{"name":"Nuwan Perera","basePrice":900000,"tournamentData":{"runs":1200}}'
/// ```
pub async fn update_player_data(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> AppResult<Json<UpdateRosterResponse>> {
    if payload.is_null() || payload.as_object().is_some_and(|o| o.is_empty()) {
        return Ok(Json(UpdateRosterResponse::failed("No data provided")));
    }

    // Apply to the in-memory roster and persist, under one write guard so
    // concurrent updates cannot interleave between apply and save.
    {
        let mut roster = state.roster.write().await;
        let snapshot = roster.clone();

        match roster.apply_update(&payload) {
            Ok(outcome) => info!(?outcome, "roster update applied"),
            Err(e) => {
                warn!("roster update rejected: {e}");
                // A batch may have been partially applied before the bad
                // entry; roll the memory back.
                *roster = snapshot;
                return Err(e.into());
            }
        }

        if let Err(e) = roster.save(&state.dataset_path) {
            error!("failed to persist roster: {e}");
            // Keep memory consistent with the file we could not write.
            *roster = snapshot;
            return Ok(Json(UpdateRosterResponse::failed(
                "Failed to update player data in dataset",
            )));
        }
    }

    // Rebuild the derived vector collection from the new roster.
    match state.reindex().await {
        Ok(n) => {
            info!(points = n, "vector collection rebuilt");
            Ok(Json(UpdateRosterResponse::ok(
                "Player data updated in RAG database successfully",
            )))
        }
        Err(e) => {
            error!("vector collection rebuild failed: {e}");
            Ok(Json(UpdateRosterResponse::failed(
                "Dataset updated but failed to refresh the vector store",
            )))
        }
    }
}
