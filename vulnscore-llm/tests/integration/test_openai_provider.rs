//! Integration tests for OpenAIProvider using wiremock

use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vulnscore_llm::domain::{CompletionRequest, LlmError, LlmProvider, StopReason};
use vulnscore_llm::infrastructure::providers::OpenAIProvider;

use crate::common::CRITICAL_VECTOR;

fn chat_completion(content: serde_json::Value, finish_reason: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1234567890,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": finish_reason
        }],
        "usage": {
            "prompt_tokens": 120,
            "completion_tokens": 24,
            "total_tokens": 144
        }
    })
}

fn provider_for(server: &MockServer) -> OpenAIProvider {
    OpenAIProvider::new("test-api-key", "test-model", 5)
        .unwrap()
        .with_base_url(server.uri())
}

fn cvss_request() -> CompletionRequest {
    CompletionRequest::new()
        .with_system("System Prompt")
        .with_user("Human Prompt")
        .with_temperature(0.0)
        .with_max_tokens(64)
}

/// Test successful completion with mocked OpenAI API
#[tokio::test]
async fn test_openai_provider_complete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "messages": [
                {"role": "system", "content": "System Prompt"},
                {"role": "user", "content": "Human Prompt"}
            ],
            "max_tokens": 64
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion(CRITICAL_VECTOR.into(), "stop")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = provider_for(&mock_server)
        .complete(cvss_request())
        .await
        .unwrap();

    assert_eq!(response.text(), CRITICAL_VECTOR);
    assert_eq!(response.stop_reason, StopReason::EndTurn);
    assert_eq!(response.usage.total_tokens, 144);
    assert_eq!(response.created, Some(1234567890));
}

#[tokio::test]
async fn test_openai_provider_sends_organization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("OpenAI-Organization", "org-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion(CRITICAL_VECTOR.into(), "stop")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server).with_organization("org-123");
    assert!(provider.complete(cvss_request()).await.is_ok());
}

#[tokio::test]
async fn test_openai_provider_null_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion(serde_json::Value::Null, "length")),
        )
        .mount(&mock_server)
        .await;

    let response = provider_for(&mock_server)
        .complete(cvss_request())
        .await
        .unwrap();

    assert_eq!(response.text(), "");
    assert!(response.is_truncated());
}

#[tokio::test]
async fn test_openai_provider_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "7")
                .set_body_string("Rate limit exceeded"),
        )
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server)
        .complete(cvss_request())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(std::time::Duration::from_secs(7)));
}

#[tokio::test]
async fn test_openai_provider_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server)
        .complete(cvss_request())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Authentication(ref msg) if msg.contains("Invalid API key")));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_openai_provider_unknown_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server)
        .complete(cvss_request().with_model("gpt-99"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ModelNotFound(ref model) if model == "gpt-99"));
}

#[tokio::test]
async fn test_openai_provider_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server)
        .complete(cvss_request())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_openai_provider_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server)
        .complete(cvss_request())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_azure_provider_uses_deployment_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/deployments/cvss-deployment/chat/completions"))
        .and(query_param("api-version", "2024-06-01"))
        .and(header("api-key", "azure-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion(CRITICAL_VECTOR.into(), "stop")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::azure(
        mock_server.uri(),
        "azure-key",
        "cvss-deployment",
        Some("2024-06-01".to_string()),
        5,
    )
    .unwrap();

    let response = provider.complete(cvss_request()).await.unwrap();
    assert_eq!(response.text(), CRITICAL_VECTOR);
}

#[tokio::test]
async fn test_azure_unknown_deployment_names_deployment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::azure(
        mock_server.uri(),
        "azure-key",
        "cvss-deployment",
        None,
        5,
    )
    .unwrap();

    let err = provider
        .complete(cvss_request().with_model("cvss-model"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ModelNotFound(ref name) if name == "cvss-deployment"));
}
