//! Gemini language model implementation.

use async_trait::async_trait;
use tracing::debug;

use brandlens_protocols::error::ProviderError;
use brandlens_protocols::model::{GenerationOptions, LanguageModel};

use crate::client::GeminiClient;
use crate::types::*;

/// Gemini behind the [`LanguageModel`] trait.
pub struct GeminiModel {
    client: GeminiClient,
}

impl GeminiModel {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    fn build_request(&self, prompt: &str, options: &GenerationOptions) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
                response_mime_type: Some("application/json".to_string()),
            }),
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        let api_key = options
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::AuthenticationFailed("API key is not set".to_string()))?;

        debug!("Gemini generate: model={}, prompt_chars={}", options.model, prompt.len());

        let request = self.build_request(prompt, options);
        let response = self
            .client
            .generate_content(api_key, &options.model, &request)
            .await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini usage: prompt={}, completion={}, total={}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        response
            .text()
            .ok_or_else(|| ProviderError::EmptyResponse(response.empty_reason()))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
