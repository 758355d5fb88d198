//! Vector index trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::distance::DistanceMetric;
use super::record::{IndexedFact, RetrievedFact};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Stores `(id, text, embedding)` triples and answers nearest-neighbour
/// queries.
///
/// The index is loaded once and then only read, so implementations must
/// allow concurrent `query` calls through a shared reference.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync + Debug {
    /// Collection name
    fn name(&self) -> &str;

    /// Distance metric used for queries
    fn metric(&self) -> DistanceMetric;

    /// Insert all records, or none of them.
    ///
    /// Fails with `IndexWrite` if any id is empty, repeated within the batch,
    /// already present, or if embedding dimensions are inconsistent.
    async fn add(&self, records: Vec<IndexedFact>) -> Result<usize, DomainError>;

    /// Return up to `k` nearest records by ascending distance, ties broken by
    /// insertion order.
    ///
    /// Fails with `IndexEmpty` when nothing has been added.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<RetrievedFact>, DomainError>;

    /// Number of stored records
    async fn fact_count(&self) -> Result<usize, DomainError>;

    /// Drop all stored records. Not an error if the index is already empty.
    async fn reset(&self) -> Result<(), DomainError>;
}
