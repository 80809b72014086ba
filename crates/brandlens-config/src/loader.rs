//! Settings loader.

use std::fs;
use std::path::Path;

use regex::{Captures, Regex};

use crate::error::ConfigError;
use crate::schema::Settings;

/// Settings loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load settings from a string.
    pub fn load_str(content: &str) -> Result<Settings, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let settings: Settings = toml::from_str(&expanded)?;
        Ok(settings)
    }

    /// Replace each `${VAR}` with its value. Substituted values are not
    /// scanned again.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut missing = None;
        let expanded = re.replace_all(content, |caps: &Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| caps[1].to_string());
                String::new()
            })
        });

        match missing {
            Some(name) => Err(ConfigError::EnvVarNotSet(name)),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Expand shell-style paths (e.g., `~/.brandlens`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
