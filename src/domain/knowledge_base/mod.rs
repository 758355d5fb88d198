//! Knowledge base domain: fact records and the vector index contract

mod distance;
mod index;
mod record;

pub use distance::{cosine_similarity, DistanceMetric};
pub use index::VectorIndex;
pub use record::{FactRecord, IndexedFact, IngestionSummary, RetrievedFact};

#[cfg(test)]
pub use index::MockVectorIndex;
