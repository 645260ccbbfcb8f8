use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::services::image::decode_image;
use crate::services::prompts;
use crate::services::providers::GenerationRequest;
use crate::startup::AppState;

use super::{JsonBody, RelayError};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Base64 image data, optionally with a data-URL prefix.
    #[serde(default)]
    pub image: Option<String>,
}

/// Handle chat messages and return model responses, with optional image
/// support.
pub async fn chat(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ChatRequest>,
) -> Result<impl IntoResponse, RelayError> {
    let message = req.message.unwrap_or_default();
    let raw_image = req.image.as_deref().filter(|i| !i.is_empty());

    if message.trim().is_empty() && raw_image.is_none() {
        return Err(RelayError::Validation(
            "Message or image is required".to_string(),
        ));
    }

    let dispatcher = state.dispatcher()?;

    // Decoded once here; a bad payload never reaches the dispatch loop.
    let image = raw_image
        .map(|raw| {
            decode_image(raw)
                .map_err(|e| RelayError::BadRequest(format!("Invalid image payload: {}", e)))
        })
        .transpose()?;

    let request = GenerationRequest {
        text: Some(message).filter(|m| !m.trim().is_empty()),
        image,
        system_instruction: Some(prompts::SYSTEM_INSTRUCTION.to_string()),
    };

    let outcome = dispatcher
        .dispatch(&state.config.models.chat, &request)
        .await
        .map_err(RelayError::Exhausted)?;

    Ok(Json(json!({
        "response": outcome.text,
        "success": true,
        "model_used": outcome.model_used,
    })))
}
