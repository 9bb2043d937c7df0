//! Health check endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::state::AppState;

/// Report whether the event store is reachable
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.events.store().backend_name();
    match state.events.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "storage": backend }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "storage unavailable", "storage": backend })),
        ),
    }
}
