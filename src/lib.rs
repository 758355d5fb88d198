//! Claim Checker
//!
//! Retrieval-augmented fact checking:
//! - Embeds a claim and retrieves the closest reference facts
//! - Asks a generative model to judge the claim against them
//! - Repairs and parses the model's JSON verdict into a claim report

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::{DomainError, IngestionSummary, LlmResponseFormat};
use infrastructure::{
    embedding::{EmbeddingProviderFactory, EmbeddingProviderOptions},
    entity::RuleBasedEntityExtractor,
    knowledge_base::InMemoryVectorIndex,
    llm::LlmProviderFactory,
    services::{FactCheckConfig, FactCheckService},
};
use tracing::info;

/// Wire the providers, index and extractor described by `config`.
///
/// `api_key` is the key given on the command line, if any; see
/// [`config::JudgmentSettings::resolve_api_key`] for precedence.
pub async fn build_fact_check_service(
    config: &AppConfig,
    api_key: Option<&str>,
) -> Result<FactCheckService, DomainError> {
    let judgment = &config.judgment;
    let judgment_key = judgment.resolve_api_key(api_key);
    if judgment.needs_api_key() && judgment_key.is_none() {
        return Err(DomainError::configuration(format!(
            "No API key for the {} judgment provider; set {} or pass --api-key",
            judgment.provider,
            judgment.key_variable()
        )));
    }

    let judge = LlmProviderFactory::create(
        judgment.provider,
        judgment_key.as_deref(),
        judgment.base_url.as_deref(),
        judgment.timeout(),
    )?;

    let embedding = &config.embedding;
    let embedding_key = embedding.resolve_api_key(api_key);
    let embedder = EmbeddingProviderFactory::create(
        embedding.provider,
        &EmbeddingProviderOptions {
            api_key: embedding_key.as_deref(),
            base_url: embedding.base_url.as_deref(),
            dimensions: embedding.dimensions,
            timeout: embedding.timeout(),
        },
    )?;

    let kb = &config.knowledge_base;
    let index = Arc::new(InMemoryVectorIndex::new(&kb.collection_name, kb.distance));

    let fact_check_config = FactCheckConfig {
        top_k: config.fact_check.top_k,
        embedding_model: embedding
            .model
            .clone()
            .unwrap_or_else(|| embedder.default_model().to_string()),
        embedding_dimensions: embedding.dimensions,
        judgment_model: judgment.model.clone(),
        temperature: judgment.temperature,
        max_tokens: judgment.max_tokens,
        response_format: if judgment.json_mode {
            LlmResponseFormat::Json
        } else {
            LlmResponseFormat::Text
        },
        batch_size: kb.batch_size,
    };

    info!(
        judgment_provider = %judgment.provider,
        judgment_model = %fact_check_config.judgment_model,
        embedding_provider = %embedding.provider,
        embedding_model = %fact_check_config.embedding_model,
        collection = %kb.collection_name,
        metric = %kb.distance,
        "Fact checker configured"
    );

    FactCheckService::new(
        embedder,
        index,
        Arc::new(RuleBasedEntityExtractor::new()),
        judge,
        fact_check_config,
    )
    .await
}

/// Build the service and load the configured knowledge base into it
pub async fn create_fact_check_service(
    config: &AppConfig,
    api_key: Option<&str>,
) -> Result<(FactCheckService, IngestionSummary), DomainError> {
    let service = build_fact_check_service(config, api_key).await?;
    let summary = service.load_knowledge_base(&config.knowledge_base.path).await?;

    info!(%summary, "Knowledge base ready");

    Ok((service, summary))
}
