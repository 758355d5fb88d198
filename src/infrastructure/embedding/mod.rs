//! Embedding provider implementations

mod factory;
mod gemini;
mod hashing;
mod openai;

pub use factory::{EmbeddingProviderConfig, EmbeddingProviderFactory, EmbeddingProviderOptions};
pub use gemini::{GeminiEmbeddingProvider, DEFAULT_GEMINI_EMBEDDING_MODEL};
pub use hashing::{HashingEmbeddingProvider, DEFAULT_HASHING_DIMENSIONS};
pub use openai::OpenAiEmbeddingProvider;

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};
