use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::{GeminiEmbeddingProvider, HashingEmbeddingProvider, OpenAiEmbeddingProvider};
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::llm::HttpClient;

/// Embedding backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderConfig {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Hashing,
}

impl EmbeddingProviderConfig {
    pub fn needs_api_key(&self) -> bool {
        matches!(self, Self::Gemini | Self::OpenAi)
    }
}

impl std::fmt::Display for EmbeddingProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::OpenAi => write!(f, "openai"),
            Self::Hashing => write!(f, "hashing"),
        }
    }
}

/// Options shared by all embedding backends
#[derive(Debug, Clone, Default)]
pub struct EmbeddingProviderOptions<'a> {
    pub api_key: Option<&'a str>,
    pub base_url: Option<&'a str>,
    pub dimensions: Option<usize>,
    pub timeout: Duration,
}

/// Factory for creating embedding providers
#[derive(Debug)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    pub fn create(
        config: EmbeddingProviderConfig,
        options: &EmbeddingProviderOptions<'_>,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let api_key = options.api_key.unwrap_or_default();

        match config {
            EmbeddingProviderConfig::Gemini => {
                Self::require_key(config, api_key)?;
                let client = HttpClient::with_timeout(options.timeout)?;
                let provider = match options.base_url {
                    Some(url) => GeminiEmbeddingProvider::with_base_url(client, api_key, url),
                    None => GeminiEmbeddingProvider::new(client, api_key),
                };
                Ok(Arc::new(provider))
            }

            EmbeddingProviderConfig::OpenAi => {
                let client = HttpClient::with_timeout(options.timeout)?;
                let provider = match options.base_url {
                    Some(url) => OpenAiEmbeddingProvider::with_base_url(client, api_key, url),
                    None => {
                        Self::require_key(config, api_key)?;
                        OpenAiEmbeddingProvider::new(client, api_key)
                    }
                };
                Ok(Arc::new(provider))
            }

            EmbeddingProviderConfig::Hashing => {
                let provider = match options.dimensions {
                    Some(dims) => HashingEmbeddingProvider::new(dims)?,
                    None => HashingEmbeddingProvider::default(),
                };
                Ok(Arc::new(provider))
            }
        }
    }

    fn require_key(config: EmbeddingProviderConfig, api_key: &str) -> Result<(), DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "An API key is required for the {} embedding provider",
                config
            )));
        }
        Ok(())
    }
}
