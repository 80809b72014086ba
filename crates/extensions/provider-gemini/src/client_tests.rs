use super::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(prompt)],
        }],
        generation_config: None,
    }
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = GeminiClient::new("http://localhost:1234/v1beta/", None).unwrap();
    assert_eq!(client.base_url(), "http://localhost:1234/v1beta");
}

#[tokio::test]
async fn test_generate_content_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"summary\":\"ok\"}" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(server.uri(), Some(5)).unwrap();
    let response = client
        .generate_content("test-key", "gemini-2.0-flash", &request("hello"))
        .await
        .unwrap();

    assert_eq!(response.text().as_deref(), Some("{\"summary\":\"ok\"}"));
}

#[tokio::test]
async fn test_generate_content_api_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(server.uri(), None).unwrap();
    let err = client
        .generate_content("bad-key", "gemini-2.0-flash", &request("hello"))
        .await
        .unwrap_err();

    match err {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("API key not valid"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_content_plain_text_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(server.uri(), None).unwrap();
    let err = client
        .generate_content("k", "gemini-2.0-flash", &request("hello"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("502"));
    assert!(err.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn test_generate_content_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(server.uri(), None).unwrap();
    let err = client
        .generate_content("k", "gemini-2.0-flash", &request("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn test_generate_content_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(server.uri(), None).unwrap();
    let err = client
        .generate_content("k", "gemini-2.0-flash", &request("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidResponse(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_network_error_hides_api_key() {
    // Nothing listens on port 9 (discard) on loopback in test environments.
    let client = GeminiClient::new("http://127.0.0.1:9", None).unwrap();
    let err = client
        .generate_content("super-secret-key", "gemini-2.0-flash", &request("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Network(_)));
    assert!(!err.to_string().contains("super-secret-key"));
}
