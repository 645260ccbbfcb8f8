use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Default per-attempt timeout for upstream model calls.
const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 60;

/// Default candidate lists, highest free-tier quota first. Order encodes a
/// manually curated quota/stability priority; the dispatcher never reorders.
const DEFAULT_CHAT_MODELS: &str = "gemini-1.5-flash,gemini-1.5-flash-latest,\
gemini-flash-latest,gemini-1.5-pro,gemini-2.0-flash-exp";
const DEFAULT_IMAGE_MODELS: &str =
    "gemini-1.5-flash,gemini-1.5-flash-latest,gemini-flash-latest";
const DEFAULT_TRANSLATE_MODELS: &str =
    "gemini-1.5-flash,gemini-1.5-flash-latest,gemini-flash-latest,gemini-1.5-pro";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub provider: ProviderKind,
    /// Absent when no credential is configured; model-backed routes then
    /// fail fast instead of dispatching.
    pub gemini_api_key: Option<String>,
    pub models: ModelConfig,
    pub attempt_timeout: Duration,
}

/// Which text provider backs the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

/// Per-operation model candidate lists.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub chat: Vec<String>,
    pub image: Vec<String>,
    pub translate: Vec<String>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider = match get_env("RELAY_PROVIDER", Some("gemini"), is_prod)?.as_str() {
            "mock" => ProviderKind::Mock,
            _ => ProviderKind::Gemini,
        };

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let models = ModelConfig {
            chat: parse_model_list(&get_env(
                "RELAY_CHAT_MODELS",
                Some(DEFAULT_CHAT_MODELS),
                is_prod,
            )?),
            image: parse_model_list(&get_env(
                "RELAY_IMAGE_MODELS",
                Some(DEFAULT_IMAGE_MODELS),
                is_prod,
            )?),
            translate: parse_model_list(&get_env(
                "RELAY_TRANSLATE_MODELS",
                Some(DEFAULT_TRANSLATE_MODELS),
                is_prod,
            )?),
        };

        let attempt_timeout = Duration::from_secs(
            get_env(
                "RELAY_ATTEMPT_TIMEOUT_SECS",
                Some(&DEFAULT_ATTEMPT_TIMEOUT_SECS.to_string()),
                is_prod,
            )?
            .parse()
            .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT_SECS),
        );

        Ok(RelayConfig {
            common,
            provider,
            gemini_api_key,
            models,
            attempt_timeout,
        })
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_lists_split_on_commas_and_trim() {
        assert_eq!(
            parse_model_list(" m1 , m2,m3 , "),
            vec!["m1".to_string(), "m2".to_string(), "m3".to_string()]
        );
    }

    #[test]
    fn default_chat_list_keeps_curated_order() {
        let models = parse_model_list(DEFAULT_CHAT_MODELS);
        assert_eq!(models.first().map(String::as_str), Some("gemini-1.5-flash"));
        assert_eq!(models.len(), 5);
    }
}
