//! Multi-model fallback dispatcher.
//!
//! Tries an ordered list of candidate models against a single provider until
//! one succeeds or the list is exhausted. Candidates are attempted strictly
//! sequentially: speculative parallel calls would burn quota on several
//! models at once. Quota failures are classified separately from other
//! transient failures; the next candidate is tried immediately either way
//! (no blocking delay inside the request-handling task).

use crate::services::providers::{GenerationRequest, ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Duration;

/// Successful dispatch: the response text and the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub text: String,
    pub model_used: String,
}

/// One failed candidate attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub model: String,
    pub message: String,
    pub quota: bool,
}

/// All candidates failed. Failures are in attempt order, one per candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exhausted {
    pub failures: Vec<AttemptFailure>,
}

pub type DispatchResult = Result<Dispatched, Exhausted>;

/// Returns true when an error message indicates an upstream quota/rate limit:
/// contains "429" (exact) or "quota" (case-insensitive).
pub fn is_quota_message(message: &str) -> bool {
    message.contains("429") || message.to_lowercase().contains("quota")
}

/// Sequential fallback dispatcher over an injected [`TextProvider`].
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn TextProvider>,
    attempt_timeout: Duration,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn TextProvider>, attempt_timeout: Duration) -> Self {
        Self {
            provider,
            attempt_timeout,
        }
    }

    /// Try each candidate in list order until one succeeds. Each candidate
    /// gets exactly one attempt per dispatch call; the first success
    /// short-circuits the rest.
    pub async fn dispatch(
        &self,
        candidates: &[String],
        request: &GenerationRequest,
    ) -> DispatchResult {
        let mut failures = Vec::new();

        for model in candidates {
            tracing::info!(model = %model, "Trying model");

            match self.attempt(model, request).await {
                Ok(text) => {
                    tracing::info!(model = %model, "Model succeeded");
                    return Ok(Dispatched {
                        text,
                        model_used: model.clone(),
                    });
                }
                Err(err) => {
                    let message = err.to_string();
                    let quota =
                        matches!(err, ProviderError::RateLimited) || is_quota_message(&message);

                    if quota {
                        tracing::warn!(
                            model = %model,
                            error = %message,
                            "Quota exceeded, switching to next model"
                        );
                    } else {
                        tracing::warn!(
                            model = %model,
                            error = %message,
                            "Model failed, trying next model"
                        );
                    }

                    failures.push(AttemptFailure {
                        model: model.clone(),
                        message,
                        quota,
                    });
                }
            }
        }

        tracing::error!(attempts = failures.len(), "All candidate models failed");
        Err(Exhausted { failures })
    }

    /// One bounded attempt against a single model. A timed-out attempt is
    /// recorded as a non-quota failure for that candidate.
    async fn attempt(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, ProviderError> {
        match tokio::time::timeout(self.attempt_timeout, self.provider.generate(model, request))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::NetworkError(format!(
                "Attempt timed out after {:?}",
                self.attempt_timeout
            ))),
        }
    }
}
