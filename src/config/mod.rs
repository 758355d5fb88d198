//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, EmbeddingSettings, FactCheckSettings, JudgmentSettings, KnowledgeBaseConfig,
    LogFormat, LoggingConfig, ServerConfig,
};
