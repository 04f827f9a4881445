//! OpenAI-compatible provider implementation
//!
//! Works with OpenAI, Azure OpenAI deployments, and any server exposing the
//! chat-completions API (Ollama, vLLM, LiteLLM, ...).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo, StopReason, Usage,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";

/// Azure deployments address the model through the URL instead of the body
#[derive(Debug, Clone)]
struct AzureDeployment {
    name: String,
    api_version: String,
}

/// OpenAI-compatible provider
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    organization_id: Option<String>,
    azure: Option<AzureDeployment>,
    timeout_seconds: u64,
}

impl OpenAIProvider {
    /// Create a provider talking to the public OpenAI API
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            organization_id: None,
            azure: None,
            timeout_seconds,
        })
    }

    /// Create a provider for an Azure OpenAI deployment
    pub fn azure(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
        api_version: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self, LlmError> {
        let deployment = deployment.into();

        Ok(Self {
            client: build_client(timeout_seconds)?,
            api_key: api_key.into(),
            base_url: endpoint.into(),
            model: deployment.clone(),
            organization_id: None,
            azure: Some(AzureDeployment {
                name: deployment,
                api_version: api_version.unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
            }),
            timeout_seconds,
        })
    }

    /// Point the provider at another OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_organization(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    fn chat_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        match &self.azure {
            Some(deployment) => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base, deployment.name, deployment.api_version
            ),
            None => format!("{}/chat/completions", base),
        }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        if self.azure.is_some() {
            return req.header("api-key", &self.api_key);
        }

        let req = req.bearer_auth(&self.api_key);
        match &self.organization_id {
            Some(org) => req.header("OpenAI-Organization", org),
            None => req,
        }
    }

    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages: request
                .messages
                .iter()
                .map(|msg| ChatMessage {
                    role: msg.role.as_str().to_string(),
                    content: Some(msg.content.clone()),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn from_wire_response(response: ChatResponse) -> CompletionResponse {
        let choice = response.choices.into_iter().next();

        let stop_reason = choice
            .as_ref()
            .and_then(|c| c.finish_reason.as_deref())
            .map(StopReason::from_finish_reason)
            .unwrap_or(StopReason::Other);

        let content = choice
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        CompletionResponse {
            id: response.id,
            model: response.model,
            content,
            stop_reason,
            usage,
            created: response.created,
        }
    }

    /// Translate a non-success HTTP status into a typed error
    async fn error_from_response(&self, response: Response, model: &str) -> LlmError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response.text().await.unwrap_or_default();

        match status {
            StatusCode::TOO_MANY_REQUESTS => LlmError::rate_limited(text, retry_after),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::auth(text),
            // Azure addresses the deployment, not the body's model
            StatusCode::NOT_FOUND => LlmError::ModelNotFound(match &self.azure {
                Some(deployment) => deployment.name.clone(),
                None => model.to_string(),
            }),
            StatusCode::BAD_REQUEST => LlmError::InvalidRequest(text),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Timeout {
                seconds: self.timeout_seconds,
            },
            s if s.is_server_error() => LlmError::ServiceUnavailable(text),
            s => {
                error!(status = %s, "OpenAI API error: {}", text);
                LlmError::InvalidResponse(format!("API error {}: {}", s, text))
            }
        }
    }
}

fn build_client(timeout_seconds: u64) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| LlmError::configuration(format!("Failed to build HTTP client: {}", e)))
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn info(&self) -> ProviderInfo {
        match self.azure {
            Some(_) => ProviderInfo {
                id: "azure",
                name: "Azure OpenAI".to_string(),
            },
            None => ProviderInfo {
                id: "openai",
                name: "OpenAI".to_string(),
            },
        }
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let wire_request = self.to_wire_request(&request);

        debug!(model = %wire_request.model, "Sending request to OpenAI-compatible API");

        let response = self
            .authorize(self.client.post(self.chat_url()))
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| match LlmError::from(e) {
                LlmError::Timeout { .. } => LlmError::Timeout {
                    seconds: self.timeout_seconds,
                },
                other => other,
            })?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response, &wire_request.model).await);
        }

        let wire_response: ChatResponse = response.json().await?;
        Ok(Self::from_wire_response(wire_response))
    }
}

// === OpenAI API Types ===

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    /// Null when the model produced no text
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    created: Option<u64>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
