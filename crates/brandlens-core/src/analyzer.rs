//! Analysis pipeline: prompt, model call, parse, cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use brandlens_config::Settings;
use brandlens_extractor_html::{ContentExtractor, ExtractionOptions};
use brandlens_protocols::error::AnalyzerError;
use brandlens_protocols::model::{GenerationOptions, LanguageModel};
use brandlens_protocols::types::{AnalysisResult, ExtractedContent};

use crate::parser::parse_analysis;
use crate::prompt::PromptBuilder;

/// Extraction limits derived from settings.
pub fn extraction_options(settings: &Settings) -> ExtractionOptions {
    ExtractionOptions {
        min_text_length: settings.min_text_length,
        max_chars: settings.max_content_chars,
        ..Default::default()
    }
}

/// Runs analyses against a [`LanguageModel`] and caches results by input text.
///
/// The cache lives as long as the analyzer and is cleared whenever the
/// settings change. A result computed under older settings is never cached.
pub struct Analyzer {
    model: Arc<dyn LanguageModel>,
    settings: RwLock<Settings>,
    /// Bumped on every settings change, under the settings write lock.
    generation: AtomicU64,
    cache: DashMap<String, AnalysisResult>,
}

impl Analyzer {
    pub fn new(model: Arc<dyn LanguageModel>, settings: Settings) -> Self {
        Self {
            model,
            settings: RwLock::new(settings),
            generation: AtomicU64::new(0),
            cache: DashMap::new(),
        }
    }

    /// Identifier of the backing model provider.
    pub fn provider_id(&self) -> &str {
        self.model.id()
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Replace the settings. Cached results were produced under the old
    /// prompt and model, so the cache is dropped.
    pub fn update_settings(&self, settings: Settings) {
        let mut current = self.settings.write();
        *current = settings;
        self.generation.fetch_add(1, Ordering::SeqCst);
        let dropped = self.clear_cache();
        drop(current);
        debug!("Settings updated, dropped {} cached analyses", dropped);
    }

    /// Extract page content with the current extraction limits.
    pub fn extract(&self, html: &str, url: Option<&str>) -> ExtractedContent {
        let options = extraction_options(&self.settings.read());
        ContentExtractor::new(options).extract(html, url)
    }

    /// Analyze free text.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzerError::EmptyContent);
        }

        let (settings, generation) = self.snapshot();
        let prompt = PromptBuilder::from_settings(&settings).build_for_text(text);
        self.run(text, &prompt, &settings, generation).await
    }

    /// Analyze extracted page content. Cached by the page's main text.
    pub async fn analyze_content(
        &self,
        content: &ExtractedContent,
    ) -> Result<AnalysisResult, AnalyzerError> {
        if content.is_empty() {
            return Err(AnalyzerError::EmptyContent);
        }

        let key = if content.main_text.trim().is_empty() {
            content.headlines.join("\n")
        } else {
            content.main_text.clone()
        };

        let (settings, generation) = self.snapshot();
        let prompt = PromptBuilder::from_settings(&settings).build(content);
        self.run(&key, &prompt, &settings, generation).await
    }

    fn snapshot(&self) -> (Settings, u64) {
        let settings = self.settings.read();
        (settings.clone(), self.generation.load(Ordering::SeqCst))
    }

    async fn run(
        &self,
        key: &str,
        prompt: &str,
        settings: &Settings,
        generation: u64,
    ) -> Result<AnalysisResult, AnalyzerError> {
        if settings.cache_enabled {
            if let Some(hit) = self.cache.get(key) {
                debug!("Analysis cache hit ({} chars)", key.chars().count());
                let mut result = hit.value().clone();
                result.cached = true;
                return Ok(result);
            }
        }

        let api_key = settings.api_key().ok_or(AnalyzerError::MissingApiKey)?;
        let options = GenerationOptions::new(settings.model.clone())
            .with_api_key(api_key)
            .with_temperature(settings.temperature as f32)
            .with_max_output_tokens(settings.max_output_tokens);

        debug!(
            "Requesting analysis: provider={}, model={}, prompt_chars={}",
            self.model.id(),
            settings.model,
            prompt.chars().count()
        );
        let reply = self.model.generate(prompt, &options).await?;

        let analysis = parse_analysis(&reply).map_err(|failure| AnalyzerError::Parse {
            reason: failure.reason,
            raw: failure.raw,
        })?;

        let result = AnalysisResult::new(analysis, settings.model.clone());
        info!(
            "Analysis complete: model={}, archetype={}",
            result.model,
            result
                .brand()
                .archetype
                .map(|a| a.primary)
                .unwrap_or_else(|| "-".to_string())
        );

        if settings.cache_enabled {
            // Held across the insert so a concurrent settings change cannot
            // clear the cache in between.
            let _settings = self.settings.read();
            if self.generation.load(Ordering::SeqCst) == generation {
                self.cache.insert(key.to_string(), result.clone());
            } else {
                debug!("Settings changed during analysis, result not cached");
            }
        }
        Ok(result)
    }

    /// Drop every cached analysis, returning how many there were.
    pub fn clear_cache(&self) -> usize {
        let count = self.cache.len();
        self.cache.clear();
        count
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
