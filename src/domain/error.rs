use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Ingestion error: {message}")]
    Ingestion { message: String },

    #[error("Embedding failure: {provider} - {message}")]
    Embedding { provider: String, message: String },

    #[error("Index '{index}' is empty")]
    IndexEmpty { index: String },

    #[error("Index write failure: {message}")]
    IndexWrite { message: String },

    #[error("Judgment service failure: {provider} - {message}")]
    JudgmentService { provider: String, message: String },

    #[error("Entity extraction error: {message}")]
    EntityExtraction { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn ingestion(message: impl Into<String>) -> Self {
        Self::Ingestion {
            message: message.into(),
        }
    }

    pub fn embedding(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Embedding {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn index_empty(index: impl Into<String>) -> Self {
        Self::IndexEmpty {
            index: index.into(),
        }
    }

    pub fn index_write(message: impl Into<String>) -> Self {
        Self::IndexWrite {
            message: message.into(),
        }
    }

    pub fn judgment_service(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JudgmentService {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn entity_extraction(message: impl Into<String>) -> Self {
        Self::EntityExtraction {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error happened while talking to an external model service
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Embedding { .. } | Self::JudgmentService { .. } | Self::Provider { .. }
        )
    }
}
