//! Gemini provider against a local stand-in for the Gemini API.

use fingenie_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use fingenie_service::services::providers::{ProviderError, TextProvider};
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn provider(server: &MockServer) -> GeminiTextProvider {
    GeminiTextProvider::new(GeminiConfig {
        api_key: Secret::new("test-api-key".to_string()),
        model: "gemini-2.5-flash".to_string(),
        api_base: format!("{}/v1beta", server.uri()),
    })
    .expect("Failed to build provider")
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 5}
    })
}

#[tokio::test]
async fn sends_prompt_with_key_header_and_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Hi there!")))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider(&server).generate("Hello").await.unwrap();

    assert_eq!(text, "Hi there!");
}

#[tokio::test]
async fn key_is_not_sent_in_the_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("ok")))
        .mount(&server)
        .await;

    provider(&server).generate("Hello").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn empty_reply_is_returned_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("")))
        .mount(&server)
        .await;

    let text = provider(&server).generate("Hello").await.unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = provider(&server).generate("Hello").await.unwrap_err();

    assert_eq!(err, ProviderError::RateLimited("quota exceeded".to_string()));
}

#[tokio::test]
async fn api_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = provider(&server).generate("Hello").await.unwrap_err();

    assert_eq!(
        err,
        ProviderError::ApiError("Gemini API error 403 Forbidden: API key not valid".to_string())
    );
}

#[tokio::test]
async fn undecodable_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).generate("Hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let provider = GeminiTextProvider::new(GeminiConfig {
        api_key: Secret::new("test-api-key".to_string()),
        model: "gemini-2.5-flash".to_string(),
        api_base: format!("http://127.0.0.1:{}/v1beta", port),
    })
    .unwrap();

    let err = provider.generate("Hello").await.unwrap_err();

    match err {
        ProviderError::NetworkError(msg) => assert!(!msg.contains("test-api-key")),
        other => panic!("expected network error, got {:?}", other),
    }
}
