use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::services::prompts;
use crate::services::providers::GenerationRequest;
use crate::startup::AppState;

use super::{JsonBody, RelayError};

#[derive(Debug, Deserialize, Validate)]
pub struct ImagePromptRequest {
    #[validate(length(min = 1, message = "Prompt is required"))]
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_style() -> String {
    "professional".to_string()
}

/// Enhance a user's idea into a professional image generation prompt.
pub async fn generate_image_prompt(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ImagePromptRequest>,
) -> Result<impl IntoResponse, RelayError> {
    req.validate()?;

    let dispatcher = state.dispatcher()?;

    let request = GenerationRequest::from_text(prompts::image_prompt(&req.prompt, &req.style));

    let outcome = dispatcher
        .dispatch(&state.config.models.image, &request)
        .await
        .map_err(RelayError::Exhausted)?;

    Ok(Json(json!({
        "response": outcome.text,
        "original_prompt": req.prompt,
        "style": req.style,
        "success": true,
        "model_used": outcome.model_used,
        "platforms": platform_catalog(),
        "message": "Professional prompt created! Copy and use with your preferred platform.",
    })))
}

/// Static metadata about downstream image generation platforms.
fn platform_catalog() -> Value {
    json!({
        "dalle3": {
            "name": "DALL-E 3",
            "url": "https://platform.openai.com/playground",
            "best_for": "Photorealistic, precise prompts"
        },
        "midjourney": {
            "name": "Midjourney",
            "url": "https://www.midjourney.com/",
            "best_for": "Artistic, creative styles"
        },
        "leonardo": {
            "name": "Leonardo.AI",
            "url": "https://leonardo.ai/",
            "best_for": "Game assets, 3D renders"
        },
        "stable_diffusion": {
            "name": "Stable Diffusion",
            "url": "https://stability.ai/",
            "best_for": "Customizable, open-source"
        }
    })
}
