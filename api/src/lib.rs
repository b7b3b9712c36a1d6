//! HTTP surface of the cricket chatbot.
//!
//! Routes (all nested under `/chatbot`):
//! - `GET  /`                        — liveness
//! - `GET  /health`                  — roster size + backend probes
//! - `GET  /query/?query=<text>`     — ask the chatbot
//! - `POST /api/update-player-data`  — roster sync from the upstream service

use std::{env, sync::Arc};

use axum::{Router, middleware, routing::get, routing::post};
use tokio::signal;
use tracing::{info, warn};

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::routes::{
    query::query_route::query_chatbot,
    roster::update_roster_route::update_player_data,
    status::status_route::{health, home},
};

/// Builds the full router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let chatbot = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/query/", get(query_chatbot))
        .route("/api/update-player-data", post(update_player_data))
        .with_state(state);

    Router::new()
        .nest("/chatbot", chatbot)
        .fallback(not_found)
        .layer(middleware::from_fn(
            middleware_layer::json_extractor::json_error_mapper,
        ))
}

/// Fallback for unknown paths: enveloped 404 instead of an empty body.
async fn not_found() -> AppError {
    AppError::NotFound
}

/// Loads state, binds the listener and serves until Ctrl+C.
///
/// # Errors
/// [`AppError::MissingEnv`] without `API_ADDRESS`, [`AppError::Bind`] /
/// [`AppError::Server`] on socket failures.
pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").map_err(|_| AppError::MissingEnv("API_ADDRESS"))?;

    let state = Arc::new(AppState::from_env());

    // Seed the vector collection from the roster. Best-effort: the bot is
    // fully usable for keyword intents while the store is empty.
    match state.reindex().await {
        Ok(n) => info!(points = n, "vector collection seeded at startup"),
        Err(e) => warn!("vector collection not seeded ({e})"),
    }

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!("listening on {host_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
    }
}
