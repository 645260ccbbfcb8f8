use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::services::prompts;
use crate::services::providers::GenerationRequest;
use crate::startup::AppState;

use super::{JsonBody, RelayError};

#[derive(Debug, Deserialize, Validate)]
pub struct TranslateRequest {
    #[validate(length(min = 1, message = "Code and target language are required"))]
    #[serde(default)]
    pub code: String,
    #[validate(length(min = 1, message = "Code and target language are required"))]
    #[serde(default)]
    pub target_language: String,
}

/// Translate code to a different programming language.
pub async fn translate_code(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TranslateRequest>,
) -> Result<impl IntoResponse, RelayError> {
    req.validate()?;

    let dispatcher = state.dispatcher()?;

    let request = GenerationRequest::from_text(prompts::translation_prompt(
        &req.code,
        &req.target_language,
    ));

    let outcome = dispatcher
        .dispatch(&state.config.models.translate, &request)
        .await
        .map_err(RelayError::Exhausted)?;

    Ok(Json(json!({
        "translated_code": prompts::strip_code_fences(&outcome.text),
        "success": true,
        "model_used": outcome.model_used,
    })))
}
