//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub prompts: PromptConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (overridden by `RUST_LOG`)
    pub level: String,
    /// Output format: "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Active provider: "openai" or "azure"
    pub provider: String,

    /// OpenAI (or OpenAI-compatible) configuration
    pub openai: OpenAIConfig,

    /// Azure OpenAI configuration
    pub azure: AzureOpenAIConfig,

    /// Default model to use (provider-specific)
    pub default_model: String,
    /// Model to use for CVSS generation (overrides default)
    pub cvss_model: Option<String>,
    /// Temperature for generation (0.0 to 2.0)
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Resilience configuration
    pub resilience: LlmResilienceConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            openai: OpenAIConfig::default(),
            azure: AzureOpenAIConfig::default(),
            default_model: "gpt-4o-mini".to_string(),
            cvss_model: None,
            temperature: 0.0,
            max_tokens: 256,
            timeout_seconds: 60,
            resilience: LlmResilienceConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Model used for CVSS generation
    pub fn cvss_model(&self) -> &str {
        self.cvss_model.as_deref().unwrap_or(&self.default_model)
    }
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    /// API Key (can also use OPENAI_API_KEY env var)
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Organization ID (optional)
    pub organization_id: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            organization_id: None,
        }
    }
}

/// Azure OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureOpenAIConfig {
    /// Azure resource endpoint
    pub endpoint: String,
    /// API Key (can also use AZURE_OPENAI_KEY env var)
    pub api_key: Option<String>,
    /// Deployment name
    pub deployment: String,
    /// API version
    pub api_version: String,
}

impl Default for AzureOpenAIConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            deployment: String::new(),
            api_version: "2024-02-15-preview".to_string(),
        }
    }
}

/// LLM resilience configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmResilienceConfig {
    /// Enable resilience wrapper (circuit breaker + retry)
    pub enabled: bool,
    /// Maximum retry attempts
    pub max_retries: u32,
    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,
    /// Number of failures before circuit opens
    pub circuit_breaker_threshold: u32,
    /// Seconds before circuit attempts recovery
    pub circuit_breaker_timeout_secs: u64,
}

impl Default for LlmResilienceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 2,
            initial_backoff_ms: 500,
            max_backoff_ms: 10_000,
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout_secs: 60,
        }
    }
}

/// Prompt source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Directory holding prompt files; `None` selects the compiled-in prompt
    pub directory: Option<PathBuf>,
    /// File name of the CVSS system prompt inside `directory`
    pub system_prompt_file: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            directory: None,
            system_prompt_file: "cvss_system.txt".to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.llm.validate()?;
        self.prompts.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from the default file locations and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file (if given) above the defaults
    ///
    /// Precedence, lowest first: `config/default`, `config/{ENV}`, `config/local`,
    /// `path`, `VULNSCORE__*` environment variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder.add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(config::Environment::with_prefix("VULNSCORE").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        // Conventional provider key variables fill in keys not set explicitly
        if config.llm.openai.api_key.is_none()
            && let Ok(key) = std::env::var("OPENAI_API_KEY")
        {
            config.llm.openai.api_key = Some(key);
        }
        if config.llm.azure.api_key.is_none()
            && let Ok(key) = std::env::var("AZURE_OPENAI_KEY")
        {
            config.llm.azure.api_key = Some(key);
        }

        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
