//! HTTP routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use brandlens_core::MessageRouter;
use brandlens_protocols::message::{Request, Response};

/// Largest `POST /message` body accepted. Saved pages routinely exceed
/// axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub cache_entries: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Build the application router.
///
/// CORS is permissive: the endpoint binds to loopback by default and is
/// called from extension and file origins.
pub fn create_router(router: Arc<MessageRouter>) -> Router {
    Router::new()
        .route("/message", post(handle_message))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(router)
}

/// Malformed or oversized bodies still get a 200 with an error [`Response`].
async fn handle_message(
    State(router): State<Arc<MessageRouter>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Response> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!("Rejected message body: {}", e);
            return Json(Response::err(None, format!("Invalid request: {}", e)));
        }
    };
    let request: Request = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected malformed message: {}", e);
            return Json(Response::err(None, format!("Invalid request: {}", e)));
        }
    };
    debug!("POST /message action={}", request.action);
    Json(router.dispatch(request).await)
}

async fn health(State(router): State<Arc<MessageRouter>>) -> Json<HealthResponse> {
    let analyzer = router.analyzer();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: analyzer.provider_id().to_string(),
        cache_entries: analyzer.cache_len(),
        timestamp: chrono::Utc::now(),
    })
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
