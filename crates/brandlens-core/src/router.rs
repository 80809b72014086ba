//! Message dispatch for UI surfaces.
//!
//! Every request gets a [`Response`]. Failures are turned into readable
//! strings here and never propagate further.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use brandlens_config::{ConfigError, Settings, SettingsStore, SettingsValidator};
use brandlens_protocols::error::AnalyzerError;
use brandlens_protocols::message::{Action, Request, Response};

use crate::analyzer::Analyzer;

#[derive(Debug, Error)]
enum RouteError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error("Settings error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid settings: {0}")]
    Validation(String),

    #[error("Could not encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RouteError {
    /// Text shown to the user.
    fn describe(&self) -> String {
        match self {
            Self::Analyzer(err) => error_message(err),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PagePayload {
    html: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextPayload {
    text: String,
}

/// Answers [`Request`]s against an [`Analyzer`] and a [`SettingsStore`].
pub struct MessageRouter {
    analyzer: Arc<Analyzer>,
    store: SettingsStore,
    api_key_override: Option<String>,
}

impl MessageRouter {
    pub fn new(analyzer: Arc<Analyzer>, store: SettingsStore) -> Self {
        Self {
            analyzer,
            store,
            api_key_override: None,
        }
    }

    /// Key that replaces the stored one (e.g. from `GEMINI_API_KEY`).
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        self.api_key_override = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn analyzer(&self) -> &Arc<Analyzer> {
        &self.analyzer
    }

    /// Settings as the analyzer should see them.
    pub fn effective(&self, settings: Settings) -> Settings {
        apply_api_key_override(settings, self.api_key_override.as_deref())
    }

    pub async fn dispatch(&self, request: Request) -> Response {
        let id = request.id;
        let Some(action) = Action::parse(&request.action) else {
            warn!("Unknown action: {}", request.action);
            return Response::err(id, format!("Unknown action: {}", request.action));
        };

        debug!("Dispatching {}", action);
        match self.handle(action, request.payload).await {
            Ok(data) => Response::ok(id, data),
            Err(err) => {
                warn!("{} failed: {}", action, err);
                Response::err(id, err.describe())
            }
        }
    }

    async fn handle(&self, action: Action, payload: Value) -> Result<Value, RouteError> {
        match action {
            Action::Ping => Ok(json!({
                "pong": true,
                "version": env!("CARGO_PKG_VERSION"),
                "provider": self.analyzer.provider_id(),
            })),
            Action::Extract => {
                let page: PagePayload = parse_payload(payload)?;
                let content = self.analyzer.extract(&page.html, page.url.as_deref());
                Ok(serde_json::to_value(content)?)
            }
            Action::Analyze => {
                let input: TextPayload = parse_payload(payload)?;
                let result = self.analyzer.analyze(&input.text).await?;
                Ok(serde_json::to_value(result)?)
            }
            Action::AnalyzePage => {
                let page: PagePayload = parse_payload(payload)?;
                let content = self.analyzer.extract(&page.html, page.url.as_deref());
                let result = self.analyzer.analyze_content(&content).await?;
                Ok(json!({
                    "content": content,
                    "result": result,
                }))
            }
            Action::GetSettings => {
                let settings = self.store.load()?;
                self.settings_view(&settings)
            }
            Action::SaveSettings => self.save_settings(payload),
            Action::ClearCache => {
                let cleared = self.analyzer.clear_cache();
                info!("Cleared {} cached analyses", cleared);
                Ok(json!({ "cleared": cleared }))
            }
            Action::CacheStats => Ok(json!({
                "entries": self.analyzer.cache_len(),
                "enabled": self.analyzer.settings().cache_enabled,
            })),
        }
    }

    fn save_settings(&self, mut patch: Value) -> Result<Value, RouteError> {
        let mut settings = self.store.load()?;

        // A settings view echoed back holds the masked key; keep the real one.
        if let Some(map) = patch.as_object_mut() {
            let masked = settings.masked_api_key();
            if masked.is_some() && map.get("api_key").and_then(Value::as_str) == masked.as_deref()
            {
                map.remove("api_key");
            }
            map.remove("has_api_key");
        }

        settings.apply_patch(&patch)?;

        let validation = SettingsValidator::validate(&settings);
        if !validation.is_valid() {
            let messages: Vec<String> = validation
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect();
            return Err(RouteError::Validation(messages.join("; ")));
        }

        self.store.save(&settings)?;
        self.analyzer.update_settings(self.effective(settings.clone()));
        info!("Settings saved to {:?}", self.store.path());
        self.settings_view(&settings)
    }

    /// Settings as JSON with the key masked.
    fn settings_view(&self, settings: &Settings) -> Result<Value, RouteError> {
        let mut value = serde_json::to_value(settings)?;
        if let Some(map) = value.as_object_mut() {
            let has_key = settings.api_key().is_some() || self.api_key_override.is_some();
            match settings.masked_api_key() {
                Some(masked) => map.insert("api_key".to_string(), Value::String(masked)),
                None => map.remove("api_key"),
            };
            map.insert("has_api_key".to_string(), Value::Bool(has_key));
        }
        Ok(value)
    }
}

/// Readable text for an analysis failure. Parse failures carry the model reply.
pub fn error_message(err: &AnalyzerError) -> String {
    match err.raw_response() {
        Some(raw) => format!("{}\n\nModel reply:\n{}", err, raw),
        None => err.to_string(),
    }
}

/// Replace the stored API key with `api_key` when one is given.
pub fn apply_api_key_override(mut settings: Settings, api_key: Option<&str>) -> Settings {
    if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
        settings.api_key = Some(key.to_string());
    }
    settings
}

fn parse_payload<T: for<'de> Deserialize<'de>>(payload: Value) -> Result<T, RouteError> {
    serde_json::from_value(payload).map_err(|e| RouteError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
