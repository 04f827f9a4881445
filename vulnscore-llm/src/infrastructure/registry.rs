//! Provider construction from configuration

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;
use vulnscore_core::config::LlmConfig;

use crate::domain::{LlmError, LlmProvider};
use crate::infrastructure::providers::{OpenAIProvider, ResilienceConfig, ResilientProvider};

/// Provider type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    OpenAI,
    Azure,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Azure => "azure",
        }
    }
}

impl FromStr for ProviderType {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Self::OpenAI),
            "azure" | "azure_openai" => Ok(Self::Azure),
            other => Err(LlmError::configuration(format!(
                "Unknown LLM provider '{}'",
                other
            ))),
        }
    }
}

/// Build the configured provider, wrapped for resilience when enabled
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider_type: ProviderType = config.provider.parse()?;

    let provider = match provider_type {
        ProviderType::OpenAI => {
            let api_key = config.openai.api_key.clone().ok_or_else(|| {
                LlmError::configuration("OpenAI API key not configured (set OPENAI_API_KEY)")
            })?;

            let mut provider =
                OpenAIProvider::new(api_key, &config.default_model, config.timeout_seconds)?
                    .with_base_url(&config.openai.base_url);
            if let Some(org) = &config.openai.organization_id {
                provider = provider.with_organization(org);
            }
            provider
        }
        ProviderType::Azure => {
            let api_key = config.azure.api_key.clone().ok_or_else(|| {
                LlmError::configuration("Azure OpenAI key not configured (set AZURE_OPENAI_KEY)")
            })?;

            OpenAIProvider::azure(
                &config.azure.endpoint,
                api_key,
                &config.azure.deployment,
                Some(config.azure.api_version.clone()),
                config.timeout_seconds,
            )?
        }
    };

    info!(
        provider = provider_type.as_str(),
        model = config.cvss_model(),
        resilient = config.resilience.enabled,
        "LLM provider configured"
    );

    if config.resilience.enabled {
        let resilience = ResilienceConfig::from(&config.resilience);
        Ok(Arc::new(ResilientProvider::new(provider, resilience)))
    } else {
        Ok(Arc::new(provider))
    }
}
