//! Settings schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// User preferences. Every field is optional on disk and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,

    pub show_overlay: bool,
    pub auto_analyze: bool,
    pub cache_enabled: bool,
    pub include_headlines: bool,
    pub include_elements: bool,

    pub min_text_length: usize,
    pub max_content_chars: usize,

    pub overlay_x: i32,
    pub overlay_y: i32,
    pub overlay_width: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            temperature: 0.4,
            max_output_tokens: 2048,
            request_timeout_secs: 60,
            show_overlay: true,
            auto_analyze: false,
            cache_enabled: true,
            include_headlines: true,
            include_elements: true,
            min_text_length: 20,
            max_content_chars: 5000,
            overlay_x: 20,
            overlay_y: 20,
            overlay_width: 360,
            prompt_template: None,
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Settings {
    /// Every key accepted by [`Settings::get_value`] and [`Settings::set_value`].
    pub const KEYS: [&'static str; 17] = [
        "api_key",
        "model",
        "api_base_url",
        "temperature",
        "max_output_tokens",
        "request_timeout_secs",
        "show_overlay",
        "auto_analyze",
        "cache_enabled",
        "include_headlines",
        "include_elements",
        "min_text_length",
        "max_content_chars",
        "overlay_x",
        "overlay_y",
        "overlay_width",
        "prompt_template",
    ];

    /// The API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// API key shortened for display.
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key().map(|key| {
            let prefix: String = key.chars().take(4).collect();
            format!("{}…", prefix)
        })
    }

    /// Read a setting as a display string. `Ok(None)` for unset optional values.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "api_key" => return Ok(self.api_key.clone()),
            "prompt_template" => return Ok(self.prompt_template.clone()),
            "model" => self.model.clone(),
            "api_base_url" => self.api_base_url.clone(),
            "temperature" => self.temperature.to_string(),
            "max_output_tokens" => self.max_output_tokens.to_string(),
            "request_timeout_secs" => self.request_timeout_secs.to_string(),
            "show_overlay" => self.show_overlay.to_string(),
            "auto_analyze" => self.auto_analyze.to_string(),
            "cache_enabled" => self.cache_enabled.to_string(),
            "include_headlines" => self.include_headlines.to_string(),
            "include_elements" => self.include_elements.to_string(),
            "min_text_length" => self.min_text_length.to_string(),
            "max_content_chars" => self.max_content_chars.to_string(),
            "overlay_x" => self.overlay_x.to_string(),
            "overlay_y" => self.overlay_y.to_string(),
            "overlay_width" => self.overlay_width.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(Some(value))
    }

    /// Parse `raw` and assign it to `key`. An empty string clears optional values.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let raw = raw.trim();
        match key {
            "api_key" => self.api_key = optional(raw),
            "prompt_template" => self.prompt_template = optional(raw),
            "model" => self.model = required(key, raw)?,
            "api_base_url" => self.api_base_url = required(key, raw)?,
            "temperature" => self.temperature = number(key, raw)?,
            "max_output_tokens" => self.max_output_tokens = number(key, raw)?,
            "request_timeout_secs" => self.request_timeout_secs = number(key, raw)?,
            "show_overlay" => self.show_overlay = boolean(key, raw)?,
            "auto_analyze" => self.auto_analyze = boolean(key, raw)?,
            "cache_enabled" => self.cache_enabled = boolean(key, raw)?,
            "include_headlines" => self.include_headlines = boolean(key, raw)?,
            "include_elements" => self.include_elements = boolean(key, raw)?,
            "min_text_length" => self.min_text_length = number(key, raw)?,
            "max_content_chars" => self.max_content_chars = number(key, raw)?,
            "overlay_x" => self.overlay_x = number(key, raw)?,
            "overlay_y" => self.overlay_y = number(key, raw)?,
            "overlay_width" => self.overlay_width = number(key, raw)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Merge a partial JSON object into these settings. `null` resets a key
    /// to its default.
    pub fn apply_patch(&mut self, patch: &Value) -> Result<(), ConfigError> {
        let Some(patch) = patch.as_object() else {
            return Err(ConfigError::InvalidFormat(
                "settings patch must be a JSON object".to_string(),
            ));
        };

        let mut merged = match serde_json::to_value(&*self) {
            Ok(Value::Object(map)) => map,
            _ => return Err(ConfigError::InvalidFormat("settings are not an object".to_string())),
        };

        for (key, value) in patch {
            if !Self::KEYS.contains(&key.as_str()) {
                return Err(ConfigError::UnknownKey(key.clone()));
            }
            if value.is_null() {
                merged.remove(key);
            } else {
                merged.insert(key.clone(), value.clone());
            }
        }

        *self = serde_json::from_value(Value::Object(merged))
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        Ok(())
    }
}

fn optional(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn required(key: &str, raw: &str) -> Result<String, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::invalid(key, "value cannot be empty"));
    }
    Ok(raw.to_string())
}

fn number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::invalid(key, format!("'{}': {}", raw, e)))
}

fn boolean(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::invalid(key, format!("'{}' is not a boolean", raw))),
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
