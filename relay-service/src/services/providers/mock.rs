//! Mock provider implementation for testing.

use super::{GenerationRequest, ProviderError, TextProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Outcome the mock returns for a specific model id.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeed with this text.
    Reply(String),
    /// Fail with an API error carrying this message.
    Fail(String),
    /// Fail with a rate-limit error.
    RateLimited,
    /// Sleep for this long, then succeed with this text. Lets tests drive a
    /// caller-side timeout.
    Delay(Duration, String),
}

/// Mock text provider with a scripted per-model outcome table and a recorded
/// call log. Models without a scripted outcome echo the prompt back.
#[derive(Default)]
pub struct MockTextProvider {
    outcomes: HashMap<String, MockOutcome>,
    calls: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for one model id.
    pub fn with_outcome(mut self, model: impl Into<String>, outcome: MockOutcome) -> Self {
        self.outcomes.insert(model.into(), outcome);
        self
    }

    /// Model ids attempted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(model.to_string());

        match self.outcomes.get(model) {
            Some(MockOutcome::Reply(text)) => Ok(text.clone()),
            Some(MockOutcome::Fail(message)) => Err(ProviderError::ApiError(message.clone())),
            Some(MockOutcome::RateLimited) => Err(ProviderError::RateLimited),
            Some(MockOutcome::Delay(duration, text)) => {
                tokio::time::sleep(*duration).await;
                Ok(text.clone())
            }
            None => Ok(format!(
                "Mock response for: {}",
                request.effective_text().unwrap_or_default()
            )),
        }
    }
}
