use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness: the process is up, whether or not the AI client is configured.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "sahayak-service",
        "version": env!("CARGO_PKG_VERSION"),
        "ai_configured": state.ai.is_ready(),
    }))
}

/// Readiness: only ready when AI calls can succeed.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.ai.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
