//! Infrastructure layer - provider, index and extractor implementations

pub mod embedding;
pub mod entity;
pub mod knowledge_base;
pub mod llm;
pub mod logging;
pub mod services;
