//! In-memory vector index with brute-force nearest-neighbour search

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::knowledge_base::{DistanceMetric, IndexedFact, RetrievedFact, VectorIndex};
use crate::domain::DomainError;

/// Exact k-NN over facts held in memory.
///
/// The embedding dimension is fixed by the first successful `add` and
/// released again by `reset`.
#[derive(Debug)]
pub struct InMemoryVectorIndex {
    name: String,
    metric: DistanceMetric,
    state: Arc<RwLock<IndexState>>,
}

#[derive(Debug, Default)]
struct IndexState {
    dimension: Option<usize>,
    facts: Vec<IndexedFact>,
    ids: HashSet<String>,
}

impl InMemoryVectorIndex {
    pub fn new(name: impl Into<String>, metric: DistanceMetric) -> Self {
        Self {
            name: name.into(),
            metric,
            state: Arc::new(RwLock::new(IndexState::default())),
        }
    }

    /// Embedding dimension of the stored facts, once known
    pub async fn dimension(&self) -> Option<usize> {
        self.state.read().await.dimension
    }
}

impl IndexState {
    fn validate(&self, records: &[IndexedFact]) -> Result<Option<usize>, DomainError> {
        let mut dimension = self.dimension;
        let mut batch_ids = HashSet::with_capacity(records.len());

        for record in records {
            if record.id.trim().is_empty() {
                return Err(DomainError::index_write("Fact id must not be empty"));
            }

            if self.ids.contains(&record.id) || !batch_ids.insert(record.id.as_str()) {
                return Err(DomainError::index_write(format!(
                    "Duplicate fact id '{}'",
                    record.id
                )));
            }

            if record.embedding.is_empty() {
                return Err(DomainError::index_write(format!(
                    "Fact '{}' has an empty embedding",
                    record.id
                )));
            }

            match dimension {
                Some(expected) if expected != record.embedding.len() => {
                    return Err(DomainError::index_write(format!(
                        "Fact '{}' has dimension {}, expected {}",
                        record.id,
                        record.embedding.len(),
                        expected
                    )));
                }
                Some(_) => {}
                None => dimension = Some(record.embedding.len()),
            }
        }

        Ok(dimension)
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    async fn add(&self, records: Vec<IndexedFact>) -> Result<usize, DomainError> {
        let mut state = self.state.write().await;

        let dimension = state.validate(&records)?;
        state.dimension = dimension;

        let count = records.len();
        for record in records {
            state.ids.insert(record.id.clone());
            state.facts.push(record);
        }

        Ok(count)
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<RetrievedFact>, DomainError> {
        let state = self.state.read().await;

        if state.facts.is_empty() {
            return Err(DomainError::index_empty(&self.name));
        }

        if state.dimension != Some(embedding.len()) {
            return Err(DomainError::validation(format!(
                "Query embedding has dimension {}, index '{}' stores {}",
                embedding.len(),
                self.name,
                state.dimension.unwrap_or_default()
            )));
        }

        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, &IndexedFact)> = state
            .facts
            .iter()
            .map(|fact| (self.metric.distance(embedding, &fact.embedding), fact))
            .collect();

        // Stable sort keeps insertion order for equal distances
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(distance, fact)| RetrievedFact::new(&fact.id, &fact.text, distance))
            .collect())
    }

    async fn fact_count(&self) -> Result<usize, DomainError> {
        Ok(self.state.read().await.facts.len())
    }

    async fn reset(&self) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        *state = IndexState::default();
        Ok(())
    }
}
