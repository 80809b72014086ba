//! Prompt templating.

use brandlens_config::Settings;
use brandlens_protocols::types::{ARCHETYPES, ExtractedContent};

/// Built-in analysis prompt. Placeholders use `{{name}}`.
pub const DEFAULT_TEMPLATE: &str = r#"You are a brand strategist. Analyze the brand voice and tone of the web page below.

Page title: {{title}}
URL: {{url}}
Meta description: {{description}}

Headlines:
{{headlines}}

Calls to action:
{{elements}}

Page text:
"""
{{content}}
"""

Reply with a single JSON object and nothing else, using exactly these fields:
{
  "archetype": { "primary": string, "secondary": string, "confidence": integer 0-100 },
  "tone_scores": { "formality": 0-100, "warmth": 0-100, "authority": 0-100, "enthusiasm": 0-100, "clarity": 0-100 },
  "summary": string (2-3 sentences),
  "keywords": [string],
  "strengths": [string],
  "recommendations": [string]
}
Choose archetypes only from: {{archetypes}}."#;

/// Fills a template with page content.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
    include_headlines: bool,
    include_elements: bool,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            include_headlines: true,
            include_elements: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let template = settings
            .prompt_template
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TEMPLATE);
        Self {
            template: template.to_string(),
            include_headlines: settings.include_headlines,
            include_elements: settings.include_elements,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_headlines(mut self, include: bool) -> Self {
        self.include_headlines = include;
        self
    }

    pub fn with_elements(mut self, include: bool) -> Self {
        self.include_elements = include;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Prompt for a full page extraction.
    pub fn build(&self, content: &ExtractedContent) -> String {
        let headlines = if self.include_headlines {
            bullet_list(&content.headlines)
        } else {
            String::new()
        };
        let elements = if self.include_elements {
            bullet_list(
                content
                    .elements
                    .iter()
                    .map(|e| format!("[{}] {}", e.tag, e.text)),
            )
        } else {
            String::new()
        };
        let archetypes = ARCHETYPES.join(", ");

        render_template(
            &self.template,
            &[
                ("content", content.main_text.as_str()),
                ("headlines", headlines.as_str()),
                ("elements", elements.as_str()),
                ("title", content.title.as_str()),
                ("url", content.url.as_deref().unwrap_or_default()),
                ("description", content.description.as_str()),
                ("archetypes", archetypes.as_str()),
            ],
        )
    }

    /// Prompt for free text with no page around it.
    pub fn build_for_text(&self, text: &str) -> String {
        self.build(&ExtractedContent {
            main_text: text.to_string(),
            ..Default::default()
        })
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn bullet_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace `{{name}}` placeholders in one pass. Unknown names are left as-is,
/// and substituted values are never re-scanned.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
