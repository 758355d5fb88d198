//! Claim report returned to callers

use serde::Serialize;
use serde_json::{Map, Value};

use super::verdict::{Judgment, Verdict};
use crate::domain::knowledge_base::RetrievedFact;

/// Reasoning attached to a report whose model output could not be parsed
pub const MODEL_OUTPUT_FORMAT_ERROR: &str = "Model output format error";

/// Keys owned by the report; a model emitting them has them overwritten
const RESERVED_KEYS: &[&str] = &[
    "retrieved_context",
    "entities_detected",
    "confidence_scores",
    "raw_response",
];

/// Map a vector distance to a confidence score: `round(1 - distance, 2)`
pub fn confidence_from_distance(distance: f32) -> f64 {
    ((1.0 - f64::from(distance)) * 100.0).round() / 100.0
}

/// Retrieval and entity metadata attached to a successful report.
///
/// `retrieved_context` and `confidence_scores` come from the same retrieval
/// result and always have the same length and order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalMetadata {
    retrieved_context: Vec<String>,
    entities_detected: Vec<String>,
    confidence_scores: Vec<f64>,
}

impl RetrievalMetadata {
    pub fn new(retrieved: &[RetrievedFact], entities_detected: Vec<String>) -> Self {
        let (retrieved_context, confidence_scores) = retrieved
            .iter()
            .map(|fact| (fact.text.clone(), confidence_from_distance(fact.distance)))
            .unzip();

        Self {
            retrieved_context,
            entities_detected,
            confidence_scores,
        }
    }

    pub fn retrieved_context(&self) -> &[String] {
        &self.retrieved_context
    }

    pub fn entities_detected(&self) -> &[String] {
        &self.entities_detected
    }

    pub fn confidence_scores(&self) -> &[f64] {
        &self.confidence_scores
    }
}

/// Verdict on a claim plus the context it was judged against.
///
/// Serialises to a flat JSON object: `verdict`, `reasoning`,
/// `evidence_used`, then either the retrieval metadata fields or
/// `raw_response`, then any extra keys the model produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimReport {
    pub verdict: Verdict,
    pub reasoning: String,
    pub evidence_used: Vec<String>,
    #[serde(flatten)]
    pub metadata: Option<RetrievalMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaimReport {
    /// Report for a successfully parsed judgment
    pub fn grounded(judgment: Judgment, metadata: RetrievalMetadata) -> Self {
        let mut extra = judgment.extra;
        for key in RESERVED_KEYS {
            extra.remove(*key);
        }

        Self {
            verdict: judgment.verdict,
            reasoning: judgment.reasoning,
            evidence_used: judgment.evidence_used,
            metadata: Some(metadata),
            raw_response: None,
            extra,
        }
    }

    /// Degraded report for model output that was not valid JSON.
    ///
    /// Carries the untrimmed response for diagnostics and no retrieval
    /// metadata.
    pub fn format_error(raw_response: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Error,
            reasoning: MODEL_OUTPUT_FORMAT_ERROR.to_string(),
            evidence_used: Vec::new(),
            metadata: None,
            raw_response: Some(raw_response.into()),
            extra: Map::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.verdict == Verdict::Error
    }

    /// Retrieved fact texts, empty for a degraded report
    pub fn retrieved_context(&self) -> &[String] {
        self.metadata
            .as_ref()
            .map(RetrievalMetadata::retrieved_context)
            .unwrap_or_default()
    }

    pub fn entities_detected(&self) -> &[String] {
        self.metadata
            .as_ref()
            .map(RetrievalMetadata::entities_detected)
            .unwrap_or_default()
    }

    pub fn confidence_scores(&self) -> &[f64] {
        self.metadata
            .as_ref()
            .map(RetrievalMetadata::confidence_scores)
            .unwrap_or_default()
    }
}
