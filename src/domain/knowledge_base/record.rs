//! Fact records and retrieval results

use serde::{Deserialize, Serialize};

/// A reference fact loaded from the knowledge base source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    pub id: String,
    pub text: String,
}

impl FactRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Attach the embedding computed for this fact's text
    pub fn into_indexed(self, embedding: Vec<f32>) -> IndexedFact {
        IndexedFact {
            id: self.id,
            text: self.text,
            embedding,
        }
    }
}

/// A fact together with its embedding, ready to be stored in a vector index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedFact {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A nearest-neighbour hit returned by a vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedFact {
    pub id: String,
    pub text: String,
    /// Distance from the query vector; smaller is closer
    pub distance: f32,
}

impl RetrievedFact {
    pub fn new(id: impl Into<String>, text: impl Into<String>, distance: f32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            distance,
        }
    }
}

/// Outcome of a knowledge base load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub loaded: usize,
    pub collection: String,
}

impl std::fmt::Display for IngestionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Loaded {} facts into {}.", self.loaded, self.collection)
    }
}
