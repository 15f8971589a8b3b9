//! Mock-based tests for the generator client.
//!
//! These use wiremock to simulate the generation endpoint without real HTTP
//! requests, so retry and error mapping are deterministic and run in CI
//! without credentials.

use std::time::Duration;

use mieru_genai::{Client, ClientConfig, GenAiError, GenerationRequest};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer, max_retries: u32) -> Client {
    let config = ClientConfig::new("sk-test-key")
        .with_base_url(server.uri())
        .with_model("test-model")
        .with_timeout(Duration::from_secs(5))
        .with_max_retries(max_retries);
    Client::new(config).expect("client config is valid")
}

fn completion_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": { "role": "assistant", "content": text }
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7 }
    })
}

#[tokio::test]
async fn successful_generation_returns_text_and_usage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("<div class=\"report-summary\">好調です</div>")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server, 0);
    let response = client
        .generate(&GenerationRequest::new("サマリーを書いてください"))
        .await
        .expect("generation succeeds");

    assert!(response.text.contains("report-summary"));
    assert_eq!(response.input_tokens, Some(42));
    assert_eq!(response.output_tokens, Some(7));
}

#[tokio::test]
async fn server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    // First call fails with 500, subsequent calls succeed.
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 2);
    let response = client
        .generate(&GenerationRequest::new("hello"))
        .await
        .expect("retry recovers");
    assert_eq!(response.text, "ok");
}

#[tokio::test]
async fn auth_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 3);
    let err = client
        .generate(&GenerationRequest::new("hello"))
        .await
        .expect_err("auth error surfaces");

    match err {
        GenAiError::Api { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_completion_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("   ")))
        .mount(&server)
        .await;

    let client = test_client(&server, 0);
    let err = client
        .generate(&GenerationRequest::new("hello"))
        .await
        .expect_err("blank text is rejected");
    assert!(matches!(err, GenAiError::EmptyCompletion));
}
