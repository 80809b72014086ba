//! Shared wiring for CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use brandlens_config::{ConfigError, ConfigLoader, Settings, SettingsStore, SettingsValidator};
use brandlens_core::{Analyzer, apply_api_key_override};
use brandlens_protocols::error::ProviderError;
use brandlens_provider_gemini::{GeminiClient, GeminiModel};

/// Settings location plus the key given on the command line or in the environment.
pub(crate) struct AppContext {
    pub store: SettingsStore,
    pub api_key: Option<String>,
}

impl AppContext {
    pub fn new(settings_path: Option<PathBuf>, api_key: Option<String>) -> Self {
        let path = settings_path
            .map(|p| PathBuf::from(ConfigLoader::expand_path(&p.to_string_lossy())))
            .unwrap_or_else(SettingsStore::default_path);
        debug!("Using settings file {}", path.display());
        Self {
            store: SettingsStore::new(path),
            api_key,
        }
    }

    /// Stored settings with the key override applied. Validation problems are logged.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let settings = apply_api_key_override(self.store.load()?, self.api_key.as_deref());

        let validation = SettingsValidator::validate(&settings);
        for error in &validation.errors {
            warn!("Invalid setting {}: {}", error.path, error.message);
        }
        for warning in &validation.warnings {
            debug!("Setting {}: {}", warning.path, warning.message);
        }
        Ok(settings)
    }

    pub fn analyzer(&self, settings: Settings) -> Result<Arc<Analyzer>, ProviderError> {
        let timeout = (settings.request_timeout_secs > 0).then_some(settings.request_timeout_secs);
        let client = GeminiClient::new(settings.api_base_url.clone(), timeout)?;
        Ok(Arc::new(Analyzer::new(Arc::new(GeminiModel::new(client)), settings)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins_over_stored_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        let ctx = AppContext::new(Some(path.clone()), Some("env-key".to_string()));
        ctx.store.set("api_key", "stored-key").unwrap();

        assert_eq!(ctx.settings().unwrap().api_key.as_deref(), Some("env-key"));
        assert_eq!(ctx.store.path(), path.as_path());

        let plain = AppContext::new(Some(path), None);
        assert_eq!(plain.settings().unwrap().api_key.as_deref(), Some("stored-key"));
    }

    #[test]
    fn test_analyzer_uses_settings() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::new(Some(dir.path().join("settings.toml")), None);
        let analyzer = ctx.analyzer(ctx.settings().unwrap()).unwrap();
        assert_eq!(analyzer.provider_id(), "gemini");
        assert_eq!(analyzer.settings().model, "gemini-2.0-flash");
    }
}
