use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::http_client::HttpClient;
use super::{GeminiProvider, OpenAiProvider};
use crate::domain::{DomainError, LlmProvider};

/// Judgment model backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderConfig {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl std::fmt::Display for LlmProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider.
    ///
    /// Gemini always needs an API key. An OpenAI-compatible provider may run
    /// without one when pointed at a local server through `base_url`.
    pub fn create(
        config: LlmProviderConfig,
        api_key: Option<&str>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let http_client = HttpClient::with_timeout(timeout)?;
        let api_key = api_key.unwrap_or_default();

        match config {
            LlmProviderConfig::Gemini => {
                Self::require_key(config, api_key)?;
                let provider = match base_url {
                    Some(url) => GeminiProvider::with_base_url(http_client, api_key, url),
                    None => GeminiProvider::new(http_client, api_key),
                };
                Ok(Arc::new(provider))
            }

            LlmProviderConfig::OpenAi => {
                let provider = match base_url {
                    Some(url) => OpenAiProvider::with_base_url(http_client, api_key, url),
                    None => {
                        Self::require_key(config, api_key)?;
                        OpenAiProvider::new(http_client, api_key)
                    }
                };
                Ok(Arc::new(provider))
            }
        }
    }

    fn require_key(config: LlmProviderConfig, api_key: &str) -> Result<(), DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "An API key is required for the {} judgment provider",
                config
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn test_create_gemini_provider() {
        let provider =
            LlmProviderFactory::create(LlmProviderConfig::Gemini, Some("key"), None, TIMEOUT)
                .unwrap();
        assert_eq!(provider.provider_name(), "gemini");
    }

    #[test]
    fn test_gemini_requires_key() {
        let result = LlmProviderFactory::create(LlmProviderConfig::Gemini, None, None, TIMEOUT);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_openai_local_server_without_key() {
        let provider = LlmProviderFactory::create(
            LlmProviderConfig::OpenAi,
            None,
            Some("http://localhost:11434"),
            TIMEOUT,
        )
        .unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_openai_hosted_requires_key() {
        let result = LlmProviderFactory::create(LlmProviderConfig::OpenAi, Some(" "), None, TIMEOUT);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_deserialization() {
        let config: LlmProviderConfig = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(config, LlmProviderConfig::OpenAi);
        assert_eq!(config.to_string(), "openai");
    }
}
