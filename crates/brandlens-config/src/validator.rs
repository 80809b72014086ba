//! Settings validation.

use crate::schema::Settings;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Settings validator.
pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_api(settings, &mut result);
        Self::validate_extraction(settings, &mut result);
        Self::validate_overlay(settings, &mut result);

        result
    }

    fn validate_api(settings: &Settings, result: &mut ValidationResult) {
        if settings.api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "api_key",
                "API key is not set, analysis requests will fail",
            ));
        }

        if settings.model.trim().is_empty() {
            result.add_error(ValidationError::new("model", "Model cannot be empty"));
        } else if settings.model.contains('/') || settings.model.contains(char::is_whitespace) {
            result.add_error(ValidationError::new(
                "model",
                "Model id must not contain '/' or whitespace",
            ));
        }

        if !settings.api_base_url.starts_with("http://")
            && !settings.api_base_url.starts_with("https://")
        {
            result.add_error(ValidationError::new(
                "api_base_url",
                "api_base_url must start with http:// or https://",
            ));
        }

        if !(0.0..=2.0).contains(&settings.temperature) {
            result.add_error(ValidationError::new(
                "temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if settings.max_output_tokens == 0 {
            result.add_error(ValidationError::new(
                "max_output_tokens",
                "max_output_tokens must be greater than 0",
            ));
        }
    }

    fn validate_extraction(settings: &Settings, result: &mut ValidationResult) {
        if settings.max_content_chars == 0 {
            result.add_error(ValidationError::new(
                "max_content_chars",
                "max_content_chars must be greater than 0",
            ));
        }

        if settings.max_content_chars > 100_000 {
            result.add_warning(ValidationWarning::new(
                "max_content_chars",
                "max_content_chars is very high (>100000), prompts may exceed the model context",
            ));
        }

        if settings.min_text_length >= settings.max_content_chars {
            result.add_warning(ValidationWarning::new(
                "min_text_length",
                "min_text_length is not below max_content_chars, only one truncated block will be sent",
            ));
        }

        if let Some(template) = &settings.prompt_template {
            if !has_placeholder(template, "content") {
                result.add_warning(ValidationWarning::new(
                    "prompt_template",
                    "prompt_template has no {{content}} placeholder, page text will not be sent",
                ));
            }
        }
    }

    fn validate_overlay(settings: &Settings, result: &mut ValidationResult) {
        if settings.overlay_width < 200 {
            result.add_warning(ValidationWarning::new(
                "overlay_width",
                "overlay_width below 200px makes the panel hard to read",
            ));
        }
    }
}

/// Whether `template` contains `{{name}}`. Whitespace inside the braces is
/// ignored, matching how templates are rendered.
fn has_placeholder(template: &str, name: &str) -> bool {
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return false;
        };
        if after[..end].trim() == name {
            return true;
        }
        rest = &after[end + 2..];
    }
    false
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
