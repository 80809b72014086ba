//! File-backed settings store.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::schema::Settings;

const SETTINGS_FILE: &str = "settings.toml";

/// Flat key-value settings persisted as a single TOML file.
///
/// A missing file reads as default settings. Writes replace the whole file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.brandlens/settings.toml`, or `./.brandlens/settings.toml` without a home directory.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".brandlens"))
            .unwrap_or_else(|| PathBuf::from(".brandlens"))
            .join(SETTINGS_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            debug!("Settings file {:?} not found, using defaults", self.path);
            return Ok(Settings::default());
        }
        ConfigLoader::load(&self.path)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string(settings)?;
        fs::write(&self.path, content)?;
        debug!("Saved settings to {:?}", self.path);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.load()?.get_value(key)
    }

    /// Set one key and persist. Returns the updated settings.
    pub fn set(&self, key: &str, value: &str) -> Result<Settings, ConfigError> {
        let mut settings = self.load()?;
        settings.set_value(key, value)?;
        self.save(&settings)?;
        Ok(settings)
    }

    /// Merge a partial JSON object and persist. Returns the updated settings.
    pub fn update(&self, patch: &Value) -> Result<Settings, ConfigError> {
        let mut settings = self.load()?;
        settings.apply_patch(patch)?;
        self.save(&settings)?;
        Ok(settings)
    }

    /// Delete the settings file so every key reverts to its default.
    pub fn reset(&self) -> Result<(), ConfigError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("nested").join("settings.toml"))
    }

    #[test]
    fn test_default_path() {
        let path = SettingsStore::default_path();
        assert!(path.ends_with(".brandlens/settings.toml"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_set_persists_and_creates_parent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("api_key", "AIza-test").unwrap();
        store.set("overlay_x", "120").unwrap();

        assert!(store.path().exists());
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.api_key(), Some("AIza-test"));
        assert_eq!(reloaded.overlay_x, 120);
        assert_eq!(store.get("overlay_x").unwrap().as_deref(), Some("120"));
    }

    #[test]
    fn test_set_invalid_does_not_write() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.set("temperature", "hot").is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_update_patch() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let updated = store
            .update(&json!({ "auto_analyze": true, "model": "gemini-1.5-pro" }))
            .unwrap();
        assert!(updated.auto_analyze);
        assert_eq!(store.load().unwrap().model, "gemini-1.5-pro");
    }

    #[test]
    fn test_reset_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("cache_enabled", "false").unwrap();
        store.reset().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().cache_enabled);
        // Resetting twice is fine.
        store.reset().unwrap();
    }
}
