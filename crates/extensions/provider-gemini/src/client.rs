//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use brandlens_protocols::error::ProviderError;

use crate::types::*;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client. One POST per call, no retries.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    timeout_secs: Option<u64>,
}

impl GeminiClient {
    /// Create a client. `timeout_secs` of `None` leaves requests unbounded.
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => e.error.message,
                Err(_) if body.trim().is_empty() => status.to_string(),
                Err(_) => body,
            };
            return Err(ProviderError::from_api_response(status.as_u16(), message));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        match self.timeout_secs {
            Some(secs) if e.is_timeout() => ProviderError::Timeout(secs),
            // Strip the query string: it carries the API key.
            _ => ProviderError::Network(e.without_url().to_string()),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
