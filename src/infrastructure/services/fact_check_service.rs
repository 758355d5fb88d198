//! Fact-check orchestration: retrieval, entity tagging and LLM judgment

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingPurpose, EmbeddingRequest};
use crate::domain::entity::EntityExtractor;
use crate::domain::fact_check::{
    build_judgment_prompt, parse_judgment, ClaimReport, RetrievalMetadata,
};
use crate::domain::knowledge_base::{
    DistanceMetric, FactRecord, IndexedFact, IngestionSummary, RetrievedFact, VectorIndex,
};
use crate::domain::llm::{LlmProvider, LlmRequest, LlmResponseFormat};
use crate::domain::DomainError;
use crate::infrastructure::knowledge_base::read_facts;

/// Tunables for the fact-check pipeline
#[derive(Debug, Clone)]
pub struct FactCheckConfig {
    /// Number of facts retrieved per claim
    pub top_k: usize,
    pub embedding_model: String,
    pub embedding_dimensions: Option<usize>,
    pub judgment_model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub response_format: LlmResponseFormat,
    /// Facts embedded per provider call during ingestion
    pub batch_size: usize,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            embedding_model: "gemini-embedding-001".to_string(),
            embedding_dimensions: None,
            judgment_model: "gemini-2.5-flash".to_string(),
            temperature: None,
            max_tokens: None,
            response_format: LlmResponseFormat::Text,
            batch_size: 64,
        }
    }
}

/// Runs claims through embed → retrieve → prompt → judge → repair.
///
/// Collaborators are passed in explicitly. The index is reset on
/// construction and is only read once the knowledge base is loaded, so a
/// single service can serve concurrent `check_claim` calls.
#[derive(Debug)]
pub struct FactCheckService {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    extractor: Arc<dyn EntityExtractor>,
    judge: Arc<dyn LlmProvider>,
    config: FactCheckConfig,
}

impl FactCheckService {
    /// Create the service, clearing any stale state left in `index`
    pub async fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        extractor: Arc<dyn EntityExtractor>,
        judge: Arc<dyn LlmProvider>,
        config: FactCheckConfig,
    ) -> Result<Self, DomainError> {
        if config.batch_size == 0 {
            return Err(DomainError::configuration("batch_size must be at least 1"));
        }

        index.reset().await?;

        Ok(Self {
            embedder,
            index,
            extractor,
            judge,
            config,
        })
    }

    pub fn config(&self) -> &FactCheckConfig {
        &self.config
    }

    pub fn collection(&self) -> &str {
        self.index.name()
    }

    pub fn metric(&self) -> DistanceMetric {
        self.index.metric()
    }

    pub async fn fact_count(&self) -> Result<usize, DomainError> {
        self.index.fact_count().await
    }

    /// Read a CSV knowledge base and index every fact in it
    pub async fn load_knowledge_base(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<IngestionSummary, DomainError> {
        let path = path.as_ref();
        let records = read_facts(path)?;

        tracing::info!(path = %path.display(), rows = records.len(), "Read knowledge base");

        self.load_records(records).await
    }

    /// Embed and index `records` as a single all-or-nothing load
    pub async fn load_records(
        &self,
        records: Vec<FactRecord>,
    ) -> Result<IngestionSummary, DomainError> {
        if records.is_empty() {
            return Err(DomainError::ingestion("Knowledge base contains no facts"));
        }

        let start = Instant::now();
        let mut indexed: Vec<IndexedFact> = Vec::with_capacity(records.len());

        for batch in records.chunks(self.config.batch_size) {
            let texts: Vec<String> = batch.iter().map(|r| r.text.clone()).collect();
            let vectors = self.embed_texts(texts, EmbeddingPurpose::Document).await?;

            indexed.extend(
                batch
                    .iter()
                    .cloned()
                    .zip(vectors)
                    .map(|(record, vector)| record.into_indexed(vector)),
            );
        }

        let loaded = self.index.add(indexed).await?;

        tracing::info!(
            collection = self.index.name(),
            loaded,
            provider = self.embedder.provider_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded knowledge base"
        );

        Ok(IngestionSummary {
            loaded,
            collection: self.index.name().to_string(),
        })
    }

    /// Embed texts, one vector per text in input order
    pub async fn embed_texts(
        &self,
        texts: Vec<String>,
        purpose: EmbeddingPurpose,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let expected = texts.len();
        let mut request =
            EmbeddingRequest::new(&self.config.embedding_model, texts).with_purpose(purpose);
        if let Some(dims) = self.config.embedding_dimensions {
            request = request.with_dimensions(dims);
        }

        let provider = self.embedder.provider_name();
        let response = self.embedder.embed(request).await.map_err(|e| match e {
            DomainError::Embedding { .. } => e,
            other => DomainError::embedding(provider, other.to_string()),
        })?;

        response.into_ordered_vectors(expected)
    }

    /// Nearest facts to `claim`, closest first
    pub async fn retrieve(&self, claim: &str) -> Result<Vec<RetrievedFact>, DomainError> {
        let mut vectors = self
            .embed_texts(vec![claim.to_string()], EmbeddingPurpose::Query)
            .await?;
        let query = vectors
            .pop()
            .ok_or_else(|| DomainError::embedding(self.embedder.provider_name(), "no vector returned"))?;

        self.index.query(&query, self.config.top_k).await
    }

    /// Entity span texts found in `text`, in order of appearance
    pub async fn extract_entities(&self, text: &str) -> Result<Vec<String>, DomainError> {
        let entities = self.extractor.extract(text).await.map_err(|e| match e {
            DomainError::EntityExtraction { .. } => e,
            other => DomainError::entity_extraction(format!(
                "{}: {}",
                self.extractor.extractor_name(),
                other
            )),
        })?;

        Ok(entities.into_iter().map(|e| e.text).collect())
    }

    /// Check a claim against the knowledge base.
    ///
    /// Model output that cannot be parsed yields a degraded `Error` report
    /// rather than a failure; every other failure is returned as-is.
    pub async fn check_claim(&self, claim: &str) -> Result<ClaimReport, DomainError> {
        if claim.trim().is_empty() {
            return Err(DomainError::validation("Claim must not be empty"));
        }

        let start = Instant::now();

        let (retrieved, entities) =
            tokio::try_join!(self.retrieve(claim), self.extract_entities(claim))?;

        tracing::debug!(
            claim_len = claim.len(),
            retrieved = retrieved.len(),
            entities = entities.len(),
            "Retrieved context"
        );

        let facts: Vec<String> = retrieved.iter().map(|f| f.text.clone()).collect();
        let prompt = build_judgment_prompt(claim, &facts)?;

        let mut builder = LlmRequest::builder()
            .user(prompt)
            .response_format(self.config.response_format);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let provider = self.judge.provider_name();
        let response = self
            .judge
            .chat(&self.config.judgment_model, builder.build())
            .await
            .map_err(|e| match e {
                DomainError::JudgmentService { .. } => e,
                other => DomainError::judgment_service(provider, other.to_string()),
            })?;

        let raw = response.content();
        tracing::debug!(raw_response = raw, "Judgment model output");

        let report = match parse_judgment(raw) {
            Ok(judgment) => {
                ClaimReport::grounded(judgment, RetrievalMetadata::new(&retrieved, entities))
            }
            Err(e) => {
                tracing::warn!(error = %e, provider, "Judgment output was not valid JSON");
                ClaimReport::format_error(raw)
            }
        };

        tracing::info!(
            verdict = %report.verdict,
            provider,
            model = %self.config.judgment_model,
            duration_ms = start.elapsed().as_millis() as u64,
            "Checked claim"
        );

        Ok(report)
    }
}
