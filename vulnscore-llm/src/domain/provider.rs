//! LLM Provider trait and related types

use async_trait::async_trait;

use crate::domain::error::LlmError;
use crate::domain::messages::{CompletionRequest, CompletionResponse};

/// Metadata about a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider identifier (e.g., "openai", "azure")
    pub id: &'static str,
    /// Human-readable name
    pub name: String,
}

/// Core trait for LLM providers
///
/// The trait is object-safe and is normally used as `Arc<dyn LlmProvider>`.
///
/// ```rust,ignore
/// use vulnscore_llm::{CompletionRequest, LlmError, LlmProvider};
///
/// async fn ask(provider: &dyn LlmProvider) -> Result<String, LlmError> {
///     let request = CompletionRequest::new().with_user("Hello");
///     let response = provider.complete(request).await?;
///     Ok(response.text().to_string())
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn info(&self) -> ProviderInfo;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Generate a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Check that the provider accepts requests
    async fn health_check(&self) -> Result<(), LlmError> {
        let request = CompletionRequest::new()
            .with_user("ping")
            .with_max_tokens(1);

        self.complete(request).await.map(|_| ())
    }
}
