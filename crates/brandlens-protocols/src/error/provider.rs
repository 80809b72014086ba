//! Language model provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Context length exceeded: {0}")]
    ContextLengthExceeded(String),

    #[error("Model returned no content: {0}")]
    EmptyResponse(String),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

impl ProviderError {
    /// Classify a non-2xx API response by status code and message text.
    pub fn from_api_response(status: u16, message: String) -> Self {
        let lower = message.to_lowercase();
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            429 => Self::RateLimited(message),
            400 if (lower.contains("token")
                && (lower.contains("exceed") || lower.contains("too many")))
                || lower.contains("context length") =>
            {
                Self::ContextLengthExceeded(message)
            }
            _ => Self::ApiError { status, message },
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
