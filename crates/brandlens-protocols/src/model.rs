//! Generative-language model trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Per-request options: target model, credentials and sampling.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub model: String,
    #[serde(skip)]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

impl std::fmt::Debug for GenerationOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationOptions")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

/// A backend that turns a prompt into free text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Generate a completion for a single prompt.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_builder() {
        let opts = GenerationOptions::new("gemini-2.0-flash")
            .with_temperature(0.2)
            .with_max_output_tokens(512);
        assert_eq!(opts.model, "gemini-2.0-flash");
        assert_eq!(opts.temperature, Some(0.2));
        assert_eq!(opts.max_output_tokens, Some(512));
    }

    #[test]
    fn test_generation_options_skip_none() {
        let json = serde_json::to_string(&GenerationOptions::new("m")).unwrap();
        assert_eq!(json, r#"{"model":"m"}"#);
    }

    #[test]
    fn test_generation_options_hides_api_key() {
        let opts = GenerationOptions::new("m").with_api_key("secret-key");
        assert_eq!(opts.api_key.as_deref(), Some("secret-key"));
        assert!(!format!("{:?}", opts).contains("secret-key"));
        assert!(!serde_json::to_string(&opts).unwrap().contains("secret-key"));
    }
}
