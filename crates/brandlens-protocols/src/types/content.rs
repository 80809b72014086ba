//! Content gathered from a page.

use serde::{Deserialize, Serialize};

/// A call-to-action element found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageElement {
    pub tag: String,
    pub text: String,
}

impl PageElement {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
        }
    }
}

/// Text extracted from the current page. Recomputed for every analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub main_text: String,
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub elements: Vec<PageElement>,
}

impl ExtractedContent {
    /// Whether there is anything worth sending to the model.
    pub fn is_empty(&self) -> bool {
        self.main_text.trim().is_empty() && self.headlines.is_empty()
    }

    /// Number of characters in the main text.
    pub fn char_count(&self) -> usize {
        self.main_text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_content_empty() {
        let content = ExtractedContent::default();
        assert!(content.is_empty());
        assert_eq!(content.char_count(), 0);
    }

    #[test]
    fn test_extracted_content_headlines_only_is_not_empty() {
        let content = ExtractedContent {
            headlines: vec!["Built for makers".to_string()],
            ..Default::default()
        };
        assert!(!content.is_empty());
    }

    #[test]
    fn test_extracted_content_deserialize_partial() {
        let content: ExtractedContent =
            serde_json::from_value(serde_json::json!({ "main_text": "héllo" })).unwrap();
        assert_eq!(content.char_count(), 5);
        assert!(content.url.is_none());
        assert!(content.elements.is_empty());
    }
}
