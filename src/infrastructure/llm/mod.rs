//! LLM provider implementations

mod factory;
mod gemini;
mod http_client;
mod openai;

pub use factory::{LlmProviderConfig, LlmProviderFactory};
pub use gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{OpenAiProvider, DEFAULT_OPENAI_BASE_URL};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
