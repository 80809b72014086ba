//! Options view: settings as `key = value` lines.

use brandlens_config::{ConfigError, Settings, ValidationResult};

const NOT_SET: &str = "(not set)";

/// Value of one setting for display. The API key is masked and a custom
/// prompt template is summarized.
pub fn display_value(settings: &Settings, key: &str) -> Result<String, ConfigError> {
    let value = match key {
        "api_key" => settings.masked_api_key(),
        "prompt_template" => settings
            .prompt_template
            .as_ref()
            .map(|t| format!("(custom, {} chars)", t.chars().count())),
        _ => settings.get_value(key)?,
    };
    Ok(value.unwrap_or_else(|| NOT_SET.to_string()))
}

/// Every setting, one per line, in schema order.
pub fn render_settings(settings: &Settings) -> String {
    let width = Settings::KEYS.iter().map(|k| k.len()).max().unwrap_or(0);
    Settings::KEYS
        .iter()
        .map(|key| {
            let value = display_value(settings, key).unwrap_or_else(|e| e.to_string());
            format!("{:<width$} = {}\n", key, value)
        })
        .collect()
}

/// Validation errors and warnings, one per line. Empty when there are none.
pub fn render_validation(result: &ValidationResult) -> String {
    let errors = result
        .errors
        .iter()
        .map(|e| format!("error: {}: {}\n", e.path, e.message));
    let warnings = result
        .warnings
        .iter()
        .map(|w| format!("warning: {}: {}\n", w.path, w.message));
    errors.chain(warnings).collect()
}
