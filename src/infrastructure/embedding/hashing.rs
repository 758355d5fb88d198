//! Offline feature-hashing embedding provider

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

pub const DEFAULT_HASHING_DIMENSIONS: usize = 384;
const HASHING_MODEL: &str = "feature-hashing";

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

/// Deterministic bag-of-words embedder that needs no network or model files.
///
/// Lower-cased word unigrams and bigrams are hashed into a fixed number of
/// signed buckets and the result is L2-normalised. Texts sharing vocabulary
/// end up close under cosine distance; there is no semantic generalisation.
#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "Hashing embedder needs at least one dimension",
            ));
        }
        Ok(Self { dimensions })
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let tokens: Vec<String> = TOKEN_REGEX
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        let mut vector = vec![0.0f32; self.dimensions];

        for token in &tokens {
            self.accumulate(&mut vector, token.as_bytes(), 1.0);
        }

        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.accumulate(&mut vector, bigram.as_bytes(), 0.5);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }

        vector
    }

    fn accumulate(&self, vector: &mut [f32], feature: &[u8], weight: f32) {
        let hash = fnv1a(feature);
        let bucket = (hash % self.dimensions as u64) as usize;
        let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Default for HashingEmbeddingProvider {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_HASHING_DIMENSIONS,
        }
    }
}

/// 64-bit FNV-1a, stable across platforms and releases
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf29ce484222325u64, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x100000001b3)
    })
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let embeddings = request
            .texts()
            .iter()
            .enumerate()
            .map(|(index, text)| Embedding::new(index, self.embed_text(text)))
            .collect();

        Ok(EmbeddingResponse::new(request.model(), embeddings))
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn default_model(&self) -> &'static str {
        HASHING_MODEL
    }

    fn dimensions(&self, _model: &str) -> Option<usize> {
        Some(self.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge_base::cosine_similarity;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(HashingEmbeddingProvider::new(0).is_err());
    }

    #[test]
    fn test_embedding_is_deterministic_and_normalised() {
        let provider = HashingEmbeddingProvider::default();

        let a = provider.embed_text("The sky is blue on a clear day.");
        let b = provider.embed_text("The sky is blue on a clear day.");

        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_HASHING_DIMENSIONS);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_case_and_punctuation_are_ignored() {
        let provider = HashingEmbeddingProvider::new(64).unwrap();

        assert_eq!(
            provider.embed_text("Grass is GREEN!"),
            provider.embed_text("grass is green")
        );
    }

    #[test]
    fn test_shared_vocabulary_is_closer() {
        let provider = HashingEmbeddingProvider::default();

        let claim = provider.embed_text("The sky is green.");
        let sky = provider.embed_text("The sky is blue on a clear day.");
        let water = provider.embed_text("Water boils at 100 degrees Celsius at sea level.");

        assert!(cosine_similarity(&claim, &sky) > cosine_similarity(&claim, &water));
    }

    #[test]
    fn test_empty_text_gives_zero_vector() {
        let provider = HashingEmbeddingProvider::new(8).unwrap();

        assert!(provider.embed_text("  ...  ").iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_order() {
        let provider = HashingEmbeddingProvider::new(32).unwrap();

        let response = provider
            .embed(EmbeddingRequest::documents(
                HASHING_MODEL,
                vec!["alpha".into(), "beta".into()],
            ))
            .await
            .unwrap();

        assert_eq!(response.embeddings().len(), 2);
        assert_eq!(response.embeddings()[1].vector(), provider.embed_text("beta").as_slice());
    }
}
