//! Configuration validation module

use crate::config::{LlmConfig, LoggingConfig, PromptConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Logging configuration error: {message}")]
    Logging { message: String },

    #[error("LLM configuration error: {message}")]
    Llm { message: String },

    #[error("Prompt configuration error: {message}")]
    Prompt { message: String },
}

impl ValidationError {
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "json" | "pretty" => {}
            other => {
                return Err(ValidationError::logging(format!(
                    "Unknown log format '{}', expected 'json' or 'pretty'",
                    other
                )));
            }
        }

        if self.level.trim().is_empty() {
            return Err(ValidationError::logging("Log level cannot be empty"));
        }

        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm("LLM timeout must be > 0"));
        }

        if self.max_tokens == 0 {
            return Err(ValidationError::llm("max_tokens must be > 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.default_model.trim().is_empty() {
            return Err(ValidationError::llm("default_model cannot be empty"));
        }

        match self.provider.to_lowercase().as_str() {
            "openai" => {
                if self.openai.base_url.trim().is_empty() {
                    return Err(ValidationError::llm("openai.base_url cannot be empty"));
                }
            }
            "azure" | "azure_openai" => {
                if self.azure.endpoint.trim().is_empty() {
                    return Err(ValidationError::llm(
                        "azure.endpoint is required when provider is azure",
                    ));
                }
                if self.azure.deployment.trim().is_empty() {
                    return Err(ValidationError::llm(
                        "azure.deployment is required when provider is azure",
                    ));
                }
            }
            other => {
                return Err(ValidationError::llm(format!(
                    "Unknown LLM provider '{}'",
                    other
                )));
            }
        }

        if self.resilience.enabled && self.resilience.initial_backoff_ms > self.resilience.max_backoff_ms
        {
            return Err(ValidationError::llm(
                "resilience.initial_backoff_ms cannot exceed resilience.max_backoff_ms",
            ));
        }

        Ok(())
    }
}

impl Validate for PromptConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.is_some() && self.system_prompt_file.trim().is_empty() {
            return Err(ValidationError::prompt(
                "system_prompt_file cannot be empty when a prompt directory is set",
            ));
        }
        Ok(())
    }
}
