//! End-to-end CVSS generation against a mocked chat-completions server

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vulnscore_core::{Severity, safe_cvss_score, safe_cvss_severity};
use vulnscore_llm::prompts::BuiltinPromptLoader;
use vulnscore_llm::{GenerateCvssUseCase, create_provider};

use crate::common::{CRITICAL_VECTOR, create_test_config, sample_record};

fn reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-cvss",
        "model": "cvss-model",
        "choices": [{
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn use_case_for(server: &MockServer) -> GenerateCvssUseCase {
    let mut config = create_test_config();
    config.openai.base_url = server.uri();

    let provider = create_provider(&config).unwrap();
    GenerateCvssUseCase::new(provider, Arc::new(BuiltinPromptLoader), config)
}

#[tokio::test]
async fn test_generate_and_score_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(CRITICAL_VECTOR)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let use_case = use_case_for(&mock_server);
    let vector = use_case.execute(&sample_record()).await;

    assert_eq!(vector.as_deref(), Some(CRITICAL_VECTOR));
    assert_eq!(safe_cvss_score(vector.as_deref()), Some(9.8));
    assert_eq!(safe_cvss_severity(vector.as_deref()), Some(Severity::Critical));
}

#[tokio::test]
async fn test_request_carries_record_and_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(CRITICAL_VECTOR)))
        .mount(&mock_server)
        .await;

    let use_case = use_case_for(&mock_server);
    use_case.execute(&sample_record()).await;

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "cvss-model");
    assert_eq!(body["max_tokens"], 64);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");

    let human = body["messages"][1]["content"].as_str().unwrap();
    assert!(human.contains("VULN-001"));
    assert!(human.contains("Example Vulnerability"));
}

#[tokio::test]
async fn test_server_error_yields_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let use_case = use_case_for(&mock_server);
    let vector = use_case.execute(&sample_record()).await;

    assert_eq!(vector, None);
    assert_eq!(safe_cvss_score(vector.as_deref()), None);
}

#[tokio::test]
async fn test_unreachable_server_yields_none() {
    let mut config = create_test_config();
    config.openai.base_url = "http://127.0.0.1:1".to_string();

    let provider = create_provider(&config).unwrap();
    let use_case = GenerateCvssUseCase::new(provider, Arc::new(BuiltinPromptLoader), config);

    assert_eq!(use_case.execute(&sample_record()).await, None);
}

#[tokio::test]
async fn test_chatty_reply_is_returned_but_not_scored() {
    let mock_server = MockServer::start().await;
    let chatty = format!("Sure! The vector is {}", CRITICAL_VECTOR);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(&chatty)))
        .mount(&mock_server)
        .await;

    let use_case = use_case_for(&mock_server);
    let vector = use_case.execute(&sample_record()).await;

    assert_eq!(vector.as_deref(), Some(chatty.as_str()));
    assert_eq!(safe_cvss_score(vector.as_deref()), None);
}
