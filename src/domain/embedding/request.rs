//! Embedding request types

use serde::{Deserialize, Serialize};

/// What the embedded text will be used for.
///
/// Some providers (Gemini) produce different vectors for stored documents
/// and for search queries; others ignore this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingPurpose {
    /// Facts stored in the knowledge base
    #[default]
    Document,
    /// Claims used to search the knowledge base
    Query,
}

/// Request to embed a batch of texts, one vector per text, in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    texts: Vec<String>,
    #[serde(default)]
    purpose: EmbeddingPurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            model: model.into(),
            texts,
            purpose: EmbeddingPurpose::default(),
            dimensions: None,
        }
    }

    /// Single-element batch for a search query
    pub fn query(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, vec![text.into()]).with_purpose(EmbeddingPurpose::Query)
    }

    /// Batch of knowledge base documents
    pub fn documents(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self::new(model, texts).with_purpose(EmbeddingPurpose::Document)
    }

    pub fn with_purpose(mut self, purpose: EmbeddingPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    /// Request reduced output dimensions (for models that support it)
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn purpose(&self) -> EmbeddingPurpose {
        self.purpose
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_is_single_element() {
        let request = EmbeddingRequest::query("gemini-embedding-001", "The sky is green.");

        assert_eq!(request.len(), 1);
        assert_eq!(request.texts(), &["The sky is green.".to_string()]);
        assert_eq!(request.purpose(), EmbeddingPurpose::Query);
    }

    #[test]
    fn test_document_request_keeps_order() {
        let request =
            EmbeddingRequest::documents("all-MiniLM-L6-v2", vec!["b".into(), "a".into()]);

        assert_eq!(request.texts(), &["b".to_string(), "a".to_string()]);
        assert_eq!(request.purpose(), EmbeddingPurpose::Document);
        assert!(!request.is_empty());
    }

    #[test]
    fn test_request_with_dimensions() {
        let request = EmbeddingRequest::new("m", vec!["x".into()]).with_dimensions(256);

        assert_eq!(request.dimensions(), Some(256));
        assert_eq!(request.model(), "m");
    }
}
