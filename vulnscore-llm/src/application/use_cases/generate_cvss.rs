//! Use case for asking an LLM to assign a CVSS vector to a vulnerability

use std::sync::Arc;

use tracing::{debug, warn};
use vulnscore_core::VulnerabilityRecord;
use vulnscore_core::config::LlmConfig;

use crate::domain::{CompletionRequest, LlmError, LlmProvider};
use crate::infrastructure::prompts::{PromptBuilder, PromptError, PromptLoader};

/// Default name of the system prompt requested from the loader
pub const DEFAULT_SYSTEM_PROMPT_NAME: &str = "cvss_system.txt";

/// Why a CVSS vector could not be generated
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("failed to load system prompt: {0}")]
    Prompt(#[from] PromptError),

    #[error("model invocation failed: {0}")]
    Llm(#[from] LlmError),
}

/// Generates CVSS vector strings for vulnerability records
///
/// The model's reply is returned as-is; it is expected to start with
/// `CVSS:3.1` but is not validated here. Score it with
/// [`vulnscore_core::safe_cvss_score`] before numeric use.
pub struct GenerateCvssUseCase {
    provider: Arc<dyn LlmProvider>,
    prompts: Arc<dyn PromptLoader>,
    config: LlmConfig,
    system_prompt_name: String,
}

impl GenerateCvssUseCase {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        prompts: Arc<dyn PromptLoader>,
        config: LlmConfig,
    ) -> Self {
        Self {
            provider,
            prompts,
            config,
            system_prompt_name: DEFAULT_SYSTEM_PROMPT_NAME.to_string(),
        }
    }

    /// Request a different system prompt from the loader
    pub fn with_system_prompt(mut self, name: impl Into<String>) -> Self {
        self.system_prompt_name = name.into();
        self
    }

    /// Generate a vector, reporting why it failed.
    pub async fn try_generate(
        &self,
        record: &VulnerabilityRecord,
    ) -> Result<String, GenerationError> {
        let system_prompt = self.prompts.load(&self.system_prompt_name).await?;
        let human_prompt = PromptBuilder::build_cvss_prompt(record);

        let model = self.config.cvss_model();
        let request = CompletionRequest::new()
            .with_system(system_prompt)
            .with_user(human_prompt)
            .with_model(model)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        debug!(record_id = %record.id, model = %model, "Requesting CVSS vector");

        let response = self.provider.complete(request).await?;

        if response.is_truncated() {
            warn!(record_id = %record.id, "CVSS reply truncated by token limit");
        }

        Ok(response.content)
    }

    /// Generate a vector, or `None` if anything along the way failed.
    ///
    /// Failures are logged and absorbed; callers treat `None` as "could not
    /// score this record".
    pub async fn execute(&self, record: &VulnerabilityRecord) -> Option<String> {
        match self.try_generate(record).await {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!(record_id = %record.id, error = %e, "CVSS generation failed");
                None
            }
        }
    }
}
