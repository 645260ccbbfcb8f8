use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Health check endpoint. Reports whether a model credential is configured
/// without calling the provider.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "api_configured": state.api_configured(),
    }))
}
