//! Claim check request and knowledge base summary

use serde::{Deserialize, Serialize};

use crate::domain::knowledge_base::DistanceMetric;

/// Body of `POST /v1/claims/check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckClaimRequest {
    pub claim: String,
}

/// Body of `GET /v1/knowledge-base`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseInfo {
    pub collection: String,
    pub facts: usize,
    pub metric: DistanceMetric,
}
