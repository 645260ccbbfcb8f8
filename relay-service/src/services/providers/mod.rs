//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for generative model
//! providers, allowing easy swapping between backends (Gemini, mock).

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Image attached to a generation request.
///
/// The payload is decoded from base64 exactly once, before the dispatch loop,
/// so a malformed image never burns a model attempt.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Payload forwarded to a model: primary text, an optional image, and an
/// optional system instruction.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub text: Option<String>,
    pub image: Option<ImagePayload>,
    pub system_instruction: Option<String>,
}

impl GenerationRequest {
    /// Prompt substituted when an image arrives without accompanying text.
    pub const DEFAULT_IMAGE_PROMPT: &'static str =
        "What is in this image? Describe it in detail.";

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The text part a provider should send. Falls back to
    /// [`Self::DEFAULT_IMAGE_PROMPT`] when an image is present without text.
    pub fn effective_text(&self) -> Option<&str> {
        match &self.text {
            Some(text) if !text.trim().is_empty() => Some(text),
            _ if self.image.is_some() => Some(Self::DEFAULT_IMAGE_PROMPT),
            _ => None,
        }
    }
}

/// Trait for text generation providers (e.g., Gemini).
///
/// The model identifier is a per-call argument: the fallback dispatcher
/// varies it across attempts while the provider instance stays fixed.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response from the given model.
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_text_prefers_message() {
        let request = GenerationRequest::from_text("hello");
        assert_eq!(request.effective_text(), Some("hello"));
    }

    #[test]
    fn effective_text_defaults_for_image_only_requests() {
        let request = GenerationRequest {
            text: None,
            image: Some(ImagePayload {
                mime_type: "image/png".to_string(),
                data: vec![0u8; 4],
            }),
            system_instruction: None,
        };
        assert_eq!(
            request.effective_text(),
            Some(GenerationRequest::DEFAULT_IMAGE_PROMPT)
        );
    }

    #[test]
    fn effective_text_is_none_for_empty_requests() {
        assert_eq!(GenerationRequest::default().effective_text(), None);
    }
}
