//! Server wiring.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use brandlens_core::MessageRouter;

use crate::error::ApiError;
use crate::routes::create_router;

/// Listen address.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

/// Serves a [`MessageRouter`] over HTTP.
pub struct ApiServer {
    config: ApiConfig,
    router: Arc<MessageRouter>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, router: Arc<MessageRouter>) -> Self {
        Self { config, router }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind and serve until the process stops.
    pub async fn run(&self) -> Result<(), ApiError> {
        let addr_str = self.addr();
        let addr: SocketAddr = addr_str.parse().map_err(|e: std::net::AddrParseError| {
            ApiError::InvalidAddress {
                addr: addr_str.clone(),
                reason: e.to_string(),
            }
        })?;
        let listener = TcpListener::bind(addr).await.map_err(|source| ApiError::Bind {
            addr: addr_str.clone(),
            source,
        })?;

        info!("BrandLens API listening on http://{}", addr);
        axum::serve(listener, create_router(self.router.clone())).await?;

        Ok(())
    }
}
