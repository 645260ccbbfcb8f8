use crate::services::dispatcher::Exhausted;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the API handlers. Every response body carries
/// `success: false`; the service never emits a non-JSON error page.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("API key not configured. Please set GEMINI_API_KEY in the environment")]
    NotConfigured,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("all candidate models failed")]
    Exhausted(Exhausted),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for RelayError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        RelayError::Validation(message)
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let summary = self.to_string();
        match self {
            RelayError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": summary,
                    "success": false,
                })),
            )
                .into_response(),
            RelayError::Validation(message) | RelayError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": message,
                    "success": false,
                })),
            )
                .into_response(),
            RelayError::Exhausted(exhausted) => {
                let technical_details = exhausted
                    .failures
                    .first()
                    .map(|f| format!("{}: {}", f.model, f.message))
                    .unwrap_or_else(|| "Unknown error".to_string());
                let suggestion = format!(
                    "Wait {} seconds and retry your request.",
                    10 * exhausted.failures.len().max(1)
                );

                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": "All AI models are currently busy. Please try again in a few seconds.",
                        "success": false,
                        "technical_details": technical_details,
                        "suggestion": suggestion,
                    })),
                )
                    .into_response()
            }
            RelayError::Internal(err) => {
                tracing::error!(error = %err, "Unhandled error in request handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": format!("Server error: {}", err),
                        "success": false,
                    })),
                )
                    .into_response()
            }
        }
    }
}
