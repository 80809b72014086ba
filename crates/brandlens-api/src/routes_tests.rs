use super::*;
use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request as HttpRequest, StatusCode, header},
};
use brandlens_config::{Settings, SettingsStore};
use brandlens_core::Analyzer;
use brandlens_protocols::error::ProviderError;
use brandlens_protocols::model::{GenerationOptions, LanguageModel};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct FixedModel;

#[async_trait]
impl LanguageModel for FixedModel {
    fn id(&self) -> &str {
        "fixed"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        Ok(r#"{"summary": "Calm and exact."}"#.to_string())
    }
}

fn create_test_router(dir: &TempDir) -> Router {
    let settings = Settings {
        api_key: Some("test-key".to_string()),
        ..Default::default()
    };
    let analyzer = Arc::new(Analyzer::new(Arc::new(FixedModel), settings));
    let store = SettingsStore::new(dir.path().join("settings.toml"));
    create_router(Arc::new(MessageRouter::new(analyzer, store)))
}

async fn post_message(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            HttpRequest::builder()
                .method("POST")
                .uri("/message")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let response = create_test_router(&dir)
        .oneshot(HttpRequest::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.provider, "fixed");
    assert_eq!(health.cache_entries, 0);
}

#[tokio::test]
async fn test_message_analyze() {
    let dir = TempDir::new().unwrap();
    let body = json!({ "id": "m1", "action": "analyze", "payload": { "text": "Some copy" } });

    let (status, reply) = post_message(create_test_router(&dir), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["id"], "m1");
    assert_eq!(reply["success"], true);
    assert_eq!(reply["data"]["analysis"]["summary"], "Calm and exact.");
}

#[tokio::test]
async fn test_message_unknown_action_is_200() {
    let dir = TempDir::new().unwrap();
    let body = json!({ "action": "launchRockets" });

    let (status, reply) = post_message(create_test_router(&dir), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["success"], false);
    assert!(reply["error"].as_str().unwrap().contains("launchRockets"));
}

#[tokio::test]
async fn test_message_malformed_body_is_200() {
    let dir = TempDir::new().unwrap();

    let (status, reply) = post_message(create_test_router(&dir), "{not json".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["success"], false);
    assert!(reply["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_message_large_page_is_accepted() {
    let dir = TempDir::new().unwrap();
    let paragraph = "<p>Every pack ships with a lifetime repair promise.</p>";
    let html = format!(
        "<html><body>{}</body></html>",
        paragraph.repeat(3 * 1024 * 1024 / paragraph.len())
    );
    let body = json!({ "action": "extract", "payload": { "html": html } }).to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let (status, reply) = post_message(create_test_router(&dir), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["success"], true);
    assert!(
        reply["data"]["main_text"]
            .as_str()
            .unwrap()
            .starts_with("Every pack ships")
    );
}

#[tokio::test]
async fn test_message_oversized_body_is_200() {
    let dir = TempDir::new().unwrap();
    let body = "x".repeat(MAX_BODY_BYTES + 1);

    let (status, reply) = post_message(create_test_router(&dir), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["success"], false);
    assert!(reply["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let dir = TempDir::new().unwrap();
    let response = create_test_router(&dir)
        .oneshot(
            HttpRequest::builder()
                .method("OPTIONS")
                .uri("/message")
                .header(header::ORIGIN, "chrome-extension://abc")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let dir = TempDir::new().unwrap();
    let response = create_test_router(&dir)
        .oneshot(HttpRequest::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
