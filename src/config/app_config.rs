use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::knowledge_base::DistanceMetric;
use crate::infrastructure::embedding::EmbeddingProviderConfig;
use crate::infrastructure::llm::LlmProviderConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub knowledge_base: KnowledgeBaseConfig,
    pub fact_check: FactCheckSettings,
    pub embedding: EmbeddingSettings,
    pub judgment: JudgmentSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Where facts come from and how they are indexed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    pub path: PathBuf,
    pub collection_name: String,
    pub distance: DistanceMetric,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FactCheckSettings {
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub provider: EmbeddingProviderConfig,
    /// Falls back to the provider's default model
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub dimensions: Option<usize>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JudgmentSettings {
    pub provider: LlmProviderConfig,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask the provider for JSON-constrained output
    pub json_mode: bool,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/facts.csv"),
            collection_name: "fact_check_db".to_string(),
            distance: DistanceMetric::default(),
            batch_size: 64,
        }
    }
}

impl Default for FactCheckSettings {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderConfig::default(),
            model: None,
            base_url: None,
            api_key: None,
            api_key_env: None,
            dimensions: None,
            timeout_secs: 30,
        }
    }
}

impl Default for JudgmentSettings {
    fn default() -> Self {
        Self {
            provider: LlmProviderConfig::default(),
            model: "gemini-2.5-flash".to_string(),
            base_url: None,
            api_key: None,
            api_key_env: None,
            temperature: None,
            max_tokens: None,
            json_mode: false,
            timeout_secs: 60,
        }
    }
}

impl EmbeddingSettings {
    /// Environment variable consulted for the key, if the backend needs one
    pub fn key_variable(&self) -> Option<&str> {
        if let Some(name) = non_empty(self.api_key_env.as_deref()) {
            return Some(name);
        }

        match self.provider {
            EmbeddingProviderConfig::Gemini => Some("GEMINI_API_KEY"),
            EmbeddingProviderConfig::OpenAi => Some("OPENAI_API_KEY"),
            EmbeddingProviderConfig::Hashing => None,
        }
    }

    /// Resolve the key: configured value, then `cli_key`, then the environment
    pub fn resolve_api_key(&self, cli_key: Option<&str>) -> Option<String> {
        resolve_key(self.api_key.as_deref(), cli_key, self.key_variable())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl JudgmentSettings {
    pub fn key_variable(&self) -> &str {
        if let Some(name) = non_empty(self.api_key_env.as_deref()) {
            return name;
        }

        match self.provider {
            LlmProviderConfig::Gemini => "GEMINI_API_KEY",
            LlmProviderConfig::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Resolve the key: configured value, then `cli_key`, then the environment
    pub fn resolve_api_key(&self, cli_key: Option<&str>) -> Option<String> {
        resolve_key(self.api_key.as_deref(), cli_key, Some(self.key_variable()))
    }

    /// Whether a key is mandatory for the configured backend
    pub fn needs_api_key(&self) -> bool {
        match self.provider {
            LlmProviderConfig::Gemini => true,
            LlmProviderConfig::OpenAi => non_empty(self.base_url.as_deref()).is_none(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn resolve_key(configured: Option<&str>, cli: Option<&str>, variable: Option<&str>) -> Option<String> {
    non_empty(configured)
        .or_else(|| non_empty(cli))
        .map(str::to_string)
        .or_else(|| {
            variable
                .and_then(|name| std::env::var(name).ok())
                .filter(|v| !v.trim().is_empty())
        })
}

impl AppConfig {
    /// Layered load: defaults, `config/default`, `config/local`, then `APP__*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.knowledge_base.collection_name, "fact_check_db");
        assert_eq!(config.knowledge_base.distance, DistanceMetric::Cosine);
        assert_eq!(config.fact_check.top_k, 3);
        assert_eq!(config.judgment.model, "gemini-2.5-flash");
        assert_eq!(config.judgment.provider, LlmProviderConfig::Gemini);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [judgment]
            provider = "openai"
            model = "gpt-4o-mini"
            json_mode = true

            [knowledge_base]
            distance = "squared_l2"

            [embedding]
            provider = "hashing"
            dimensions = 128
            "#,
        );

        assert_eq!(config.judgment.provider, LlmProviderConfig::OpenAi);
        assert!(config.judgment.json_mode);
        assert_eq!(config.judgment.timeout_secs, 60);
        assert_eq!(config.knowledge_base.distance, DistanceMetric::SquaredL2);
        assert_eq!(config.knowledge_base.batch_size, 64);
        assert_eq!(config.embedding.provider, EmbeddingProviderConfig::Hashing);
        assert_eq!(config.embedding.dimensions, Some(128));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_configured_key_wins() {
        let settings = JudgmentSettings {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };

        assert_eq!(
            settings.resolve_api_key(Some("from-cli")).as_deref(),
            Some("from-config")
        );
    }

    #[test]
    fn test_cli_key_used_when_not_configured() {
        let settings = JudgmentSettings {
            api_key: Some("  ".to_string()),
            api_key_env: Some("CLAIM_CHECKER_TEST_UNSET_KEY".to_string()),
            ..Default::default()
        };

        assert_eq!(settings.resolve_api_key(Some("from-cli")).as_deref(), Some("from-cli"));
        assert_eq!(settings.resolve_api_key(None), None);
    }

    #[test]
    fn test_key_variable_defaults_by_provider() {
        let gemini = JudgmentSettings::default();
        let openai = JudgmentSettings {
            provider: LlmProviderConfig::OpenAi,
            ..Default::default()
        };

        assert_eq!(gemini.key_variable(), "GEMINI_API_KEY");
        assert_eq!(openai.key_variable(), "OPENAI_API_KEY");
        assert_eq!(
            EmbeddingSettings {
                provider: EmbeddingProviderConfig::Hashing,
                ..Default::default()
            }
            .key_variable(),
            None
        );
    }

    #[test]
    fn test_local_openai_server_needs_no_key() {
        let settings = JudgmentSettings {
            provider: LlmProviderConfig::OpenAi,
            base_url: Some("http://localhost:11434".to_string()),
            ..Default::default()
        };

        assert!(!settings.needs_api_key());
        assert!(JudgmentSettings::default().needs_api_key());
    }
}
