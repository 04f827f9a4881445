//! Common test utilities and mock implementations

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use vulnscore_core::VulnerabilityRecord;
use vulnscore_core::config::LlmConfig;
use vulnscore_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo, StopReason, Usage,
};
use vulnscore_llm::prompts::{PromptError, PromptLoader};

pub const CRITICAL_VECTOR: &str = "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H";

/// Mock LLM provider for testing
pub struct MockLlmProvider {
    /// Response to return from complete()
    pub response: Option<CompletionResponse>,
    /// Error to return (if any)
    pub error: Option<LlmError>,
    /// Captured requests for verification
    pub captured_requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmProvider {
    pub fn new() -> Self {
        Self {
            response: None,
            error: None,
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, response: CompletionResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_error(mut self, error: LlmError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_text_response(content: &str) -> Self {
        Self::new().with_response(create_completion_response(content))
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "mock",
            name: "Mock Provider".to_string(),
        }
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.captured_requests.lock().await.push(request);

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        self.response
            .clone()
            .ok_or_else(|| LlmError::Other("No response configured".to_string()))
    }
}

/// Prompt loader returning a fixed text, recording requested names
pub struct StaticPromptLoader {
    pub text: String,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl StaticPromptLoader {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl PromptLoader for StaticPromptLoader {
    async fn load(&self, name: &str) -> Result<String, PromptError> {
        self.requested.lock().await.push(name.to_string());
        Ok(self.text.clone())
    }
}

/// Prompt loader that always fails, as if the prompt file were unreadable
pub struct FailingPromptLoader;

#[async_trait]
impl PromptLoader for FailingPromptLoader {
    async fn load(&self, name: &str) -> Result<String, PromptError> {
        Err(PromptError::Io {
            path: name.into(),
            source: std::io::Error::other("File read error"),
        })
    }
}

/// Create a standard LLM response with given content
pub fn create_completion_response(content: &str) -> CompletionResponse {
    CompletionResponse {
        id: "test-response-id".to_string(),
        model: "test-model".to_string(),
        content: content.to_string(),
        stop_reason: StopReason::EndTurn,
        usage: Usage {
            prompt_tokens: 100,
            completion_tokens: 30,
            total_tokens: 130,
        },
        created: Some(1234567890),
    }
}

/// Create default test LlmConfig
pub fn create_test_config() -> LlmConfig {
    let mut config = LlmConfig {
        default_model: "test-model".to_string(),
        cvss_model: Some("cvss-model".to_string()),
        temperature: 0.0,
        max_tokens: 64,
        timeout_seconds: 5,
        ..Default::default()
    };
    config.openai.api_key = Some("test-api-key".to_string());
    config.resilience.enabled = false;
    config
}

pub fn sample_record() -> VulnerabilityRecord {
    VulnerabilityRecord::new("VULN-001", "Example Vulnerability")
        .with_description("An example CVE issue description.")
}
