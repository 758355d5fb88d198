//! Gemini embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingPurpose, EmbeddingRequest, EmbeddingResponse,
};
use crate::domain::DomainError;
use crate::infrastructure::llm::DEFAULT_GEMINI_BASE_URL;

pub const DEFAULT_GEMINI_EMBEDDING_MODEL: &str = "gemini-embedding-001";

const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("gemini-embedding-001", 3072),
    ("text-embedding-004", 768),
];

/// Gemini `batchEmbedContents` provider
#[derive(Debug)]
pub struct GeminiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> GeminiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
        }
    }

    fn batch_url(model: &str, base_url: &str) -> String {
        format!("{}/v1beta/models/{}:batchEmbedContents", base_url, model)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(model: &str, request: &EmbeddingRequest) -> serde_json::Value {
        let task_type = match request.purpose() {
            EmbeddingPurpose::Document => "RETRIEVAL_DOCUMENT",
            EmbeddingPurpose::Query => "RETRIEVAL_QUERY",
        };
        let qualified = format!("models/{}", model);

        let requests: Vec<serde_json::Value> = request
            .texts()
            .iter()
            .map(|text| {
                let mut item = serde_json::json!({
                    "model": qualified,
                    "content": { "parts": [{ "text": text }] },
                    "taskType": task_type,
                });
                if let Some(dims) = request.dimensions() {
                    item["outputDimensionality"] = serde_json::json!(dims);
                }
                item
            })
            .collect();

        serde_json::json!({ "requests": requests })
    }

    fn parse_response(
        model: &str,
        json: serde_json::Value,
    ) -> Result<EmbeddingResponse, DomainError> {
        let response: GeminiBatchEmbedResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::embedding("gemini", format!("Failed to parse embedding response: {}", e))
        })?;

        // Embeddings come back in request order without explicit indices
        let embeddings = response
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(index, e)| Embedding::new(index, e.values))
            .collect();

        Ok(EmbeddingResponse::new(model, embeddings))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for GeminiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let model = request.model().trim_start_matches("models/").to_string();

        if request.is_empty() {
            return Ok(EmbeddingResponse::new(model, Vec::new()));
        }

        let url = Self::batch_url(&model, &self.base_url);
        let body = Self::build_request(&model, &request);

        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| DomainError::embedding("gemini", e.to_string()))?;

        Self::parse_response(&model, response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_GEMINI_EMBEDDING_MODEL
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        let model = model.trim_start_matches("models/");
        EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, dims)| *dims)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiBatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<GeminiEmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct GeminiEmbeddingValues {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::MockHttpClient;

    const TEST_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-embedding-001:batchEmbedContents";

    fn batch_response(vectors: &[&[f32]]) -> serde_json::Value {
        let embeddings: Vec<serde_json::Value> = vectors
            .iter()
            .map(|v| serde_json::json!({ "values": v }))
            .collect();
        serde_json::json!({ "embeddings": embeddings })
    }

    #[tokio::test]
    async fn test_embed_documents() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, batch_response(&[&[0.1, 0.2], &[0.3, 0.4]]));
        let provider = GeminiEmbeddingProvider::new(client, "test-key");

        let response = provider
            .embed(EmbeddingRequest::documents(
                "gemini-embedding-001",
                vec!["Grass is green.".into(), "The sky is blue.".into()],
            ))
            .await
            .unwrap();

        assert_eq!(response.embeddings().len(), 2);
        assert_eq!(response.embeddings()[1].index(), 1);
        assert_eq!(response.embeddings()[1].vector(), &[0.3, 0.4]);

        let (_, body) = provider.client.requests().remove(0);
        let requests = body["requests"].as_array().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0]["model"], "models/gemini-embedding-001");
        assert_eq!(requests[0]["taskType"], "RETRIEVAL_DOCUMENT");
        assert_eq!(requests[1]["content"]["parts"][0]["text"], "The sky is blue.");
    }

    #[tokio::test]
    async fn test_query_task_type_and_dimensions() {
        let client = MockHttpClient::new().with_response(TEST_URL, batch_response(&[&[1.0]]));
        let provider = GeminiEmbeddingProvider::new(client, "test-key");

        provider
            .embed(
                EmbeddingRequest::query("models/gemini-embedding-001", "Is the sky green?")
                    .with_dimensions(768),
            )
            .await
            .unwrap();

        let (url, body) = provider.client.requests().remove(0);
        assert_eq!(url, TEST_URL);
        assert_eq!(body["requests"][0]["taskType"], "RETRIEVAL_QUERY");
        assert_eq!(body["requests"][0]["outputDimensionality"], 768);
    }

    #[tokio::test]
    async fn test_embed_error_is_embedding_failure() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 400: bad request");
        let provider = GeminiEmbeddingProvider::new(client, "test-key");

        let result = provider
            .embed(EmbeddingRequest::query("gemini-embedding-001", "text"))
            .await;

        assert!(matches!(result, Err(DomainError::Embedding { .. })));
    }

    #[test]
    fn test_provider_info() {
        let provider = GeminiEmbeddingProvider::new(MockHttpClient::new(), "test-key");

        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.default_model(), "gemini-embedding-001");
        assert_eq!(provider.dimensions("models/text-embedding-004"), Some(768));
    }
}
