//! GET /chatbot/query/ — asks the chatbot.

use std::sync::Arc;

use axum::{Json, extract::Query, extract::State};
use tracing::debug;

use crate::{
    core::app_state::AppState,
    routes::query::query_request::{QueryParams, QueryResponse},
};

/// Handler: GET /chatbot/query/?query=<text>
///
/// Always replies `200 {"response": "<text>"}`; missing parameters, empty
/// rosters and internal failures all surface as friendly text.
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8080/chatbot/query/?query=who%20is%20the%20best%20batsman%3F'
/// ```
pub async fn query_chatbot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Json<QueryResponse> {
    let question = params.query.unwrap_or_default();
    debug!(query = %question, "query_chatbot: start");

    let roster = state.roster.read().await;
    let response = chat_engine::answer(&question, &roster, &state.engine_context()).await;

    Json(QueryResponse { response })
}
