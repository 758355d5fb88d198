//! Embedding response types

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A single embedding vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    /// Position of the source text in the request batch
    index: usize,
    embedding: Vec<f32>,
}

impl Embedding {
    pub fn new(index: usize, embedding: Vec<f32>) -> Self {
        Self { index, embedding }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn vector(&self) -> &[f32] {
        &self.embedding
    }

    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }

    pub fn into_vector(self) -> Vec<f32> {
        self.embedding
    }
}

/// Token usage, when the provider reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}

impl EmbeddingUsage {
    pub fn new(prompt_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            total_tokens,
        }
    }

    pub fn prompt_tokens(&self) -> u32 {
        self.prompt_tokens
    }

    pub fn total_tokens(&self) -> u32 {
        self.total_tokens
    }
}

/// Response from an embedding request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    model: String,
    data: Vec<Embedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<EmbeddingUsage>,
}

impl EmbeddingResponse {
    pub fn new(model: impl Into<String>, data: Vec<Embedding>) -> Self {
        Self {
            model: model.into(),
            data,
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: EmbeddingUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embeddings(&self) -> &[Embedding] {
        &self.data
    }

    pub fn usage(&self) -> Option<&EmbeddingUsage> {
        self.usage.as_ref()
    }

    /// Consume the response and return one vector per requested text, in
    /// request order.
    ///
    /// Fails if the provider returned a different number of vectors than
    /// `expected`, repeated an index, or returned an empty vector.
    pub fn into_ordered_vectors(self, expected: usize) -> Result<Vec<Vec<f32>>, DomainError> {
        if self.data.len() != expected {
            return Err(DomainError::embedding(
                self.model,
                format!(
                    "expected {} embeddings, provider returned {}",
                    expected,
                    self.data.len()
                ),
            ));
        }

        let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];

        for embedding in self.data {
            let index = embedding.index();
            let slot = slots.get_mut(index).ok_or_else(|| {
                DomainError::embedding(&self.model, format!("embedding index {} out of range", index))
            })?;

            if slot.is_some() {
                return Err(DomainError::embedding(
                    &self.model,
                    format!("duplicate embedding index {}", index),
                ));
            }

            if embedding.dimensions() == 0 {
                return Err(DomainError::embedding(
                    &self.model,
                    format!("empty embedding at index {}", index),
                ));
            }

            *slot = Some(embedding.into_vector());
        }

        // Every slot is filled: counts match and no index repeats
        Ok(slots.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_creation() {
        let emb = Embedding::new(0, vec![0.1, 0.2, 0.3]);

        assert_eq!(emb.index(), 0);
        assert_eq!(emb.dimensions(), 3);
        assert_eq!(emb.vector(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_ordered_vectors_restores_request_order() {
        let response = EmbeddingResponse::new(
            "test-model",
            vec![
                Embedding::new(1, vec![2.0]),
                Embedding::new(0, vec![1.0]),
                Embedding::new(2, vec![3.0]),
            ],
        );

        let vectors = response.into_ordered_vectors(3).unwrap();

        assert_eq!(vectors, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_ordered_vectors_count_mismatch() {
        let response = EmbeddingResponse::new("test-model", vec![Embedding::new(0, vec![1.0])]);

        let result = response.into_ordered_vectors(2);

        assert!(matches!(result, Err(DomainError::Embedding { .. })));
    }

    #[test]
    fn test_ordered_vectors_duplicate_index() {
        let response = EmbeddingResponse::new(
            "test-model",
            vec![Embedding::new(0, vec![1.0]), Embedding::new(0, vec![2.0])],
        );

        assert!(response.into_ordered_vectors(2).is_err());
    }

    #[test]
    fn test_ordered_vectors_rejects_empty_vector() {
        let response = EmbeddingResponse::new("test-model", vec![Embedding::new(0, vec![])]);

        assert!(response.into_ordered_vectors(1).is_err());
    }

    #[test]
    fn test_embedding_response_usage() {
        let response = EmbeddingResponse::new("test-model", vec![])
            .with_usage(EmbeddingUsage::new(10, 10));

        assert_eq!(response.model(), "test-model");
        assert_eq!(response.usage().map(|u| u.total_tokens()), Some(10));
    }
}
