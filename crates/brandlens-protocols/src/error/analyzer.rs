//! Analysis pipeline errors.

use thiserror::Error;

use super::ProviderError;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("API key is not configured. Set it with `brandlens settings set api_key <KEY>` or GEMINI_API_KEY")]
    MissingApiKey,

    #[error("No content to analyze")]
    EmptyContent,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Could not parse analysis: {reason}")]
    Parse { reason: String, raw: String },
}

impl AnalyzerError {
    /// Raw model output attached to a parse failure.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_message() {
        let err = AnalyzerError::MissingApiKey;
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let err = AnalyzerError::from(ProviderError::Network("refused".to_string()));
        assert_eq!(err.to_string(), "Network error: refused");
    }

    #[test]
    fn test_parse_error_keeps_raw() {
        let err = AnalyzerError::Parse {
            reason: "no JSON object found".to_string(),
            raw: "I cannot help with that".to_string(),
        };
        assert!(err.to_string().contains("no JSON object found"));
        assert_eq!(err.raw_response(), Some("I cannot help with that"));
        assert!(AnalyzerError::EmptyContent.raw_response().is_none());
    }
}
