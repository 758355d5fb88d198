//! Domain layer - Core fact-checking logic and contracts

pub mod embedding;
pub mod entity;
pub mod error;
pub mod fact_check;
pub mod knowledge_base;
pub mod llm;

pub use embedding::{EmbeddingProvider, EmbeddingPurpose, EmbeddingRequest, EmbeddingResponse};
pub use entity::{Entity, EntityExtractor, EntityLabel};
pub use error::DomainError;
pub use fact_check::{ClaimReport, Judgment, RetrievalMetadata, Verdict};
pub use knowledge_base::{
    DistanceMetric, FactRecord, IndexedFact, IngestionSummary, RetrievedFact, VectorIndex,
};
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, LlmResponseFormat,
    Message, MessageRole, Usage,
};
