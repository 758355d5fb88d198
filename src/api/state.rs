//! Application state for shared services

use std::sync::Arc;

use crate::api::types::KnowledgeBaseInfo;
use crate::domain::{ClaimReport, DomainError};
use crate::infrastructure::services::FactCheckService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub fact_checker: Arc<dyn FactCheckServiceTrait>,
}

impl AppState {
    pub fn new(fact_checker: Arc<dyn FactCheckServiceTrait>) -> Self {
        Self { fact_checker }
    }
}

/// Operations the HTTP surface needs from the fact checker
#[async_trait::async_trait]
pub trait FactCheckServiceTrait: Send + Sync {
    async fn check_claim(&self, claim: &str) -> Result<ClaimReport, DomainError>;
    async fn knowledge_base(&self) -> Result<KnowledgeBaseInfo, DomainError>;
}

#[async_trait::async_trait]
impl FactCheckServiceTrait for FactCheckService {
    async fn check_claim(&self, claim: &str) -> Result<ClaimReport, DomainError> {
        FactCheckService::check_claim(self, claim).await
    }

    async fn knowledge_base(&self) -> Result<KnowledgeBaseInfo, DomainError> {
        Ok(KnowledgeBaseInfo {
            collection: self.collection().to_string(),
            facts: self.fact_count().await?,
            metric: self.metric(),
        })
    }
}
