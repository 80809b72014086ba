//! Content extraction over a parsed HTML document.

use std::collections::HashSet;
use std::ops::Deref;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use brandlens_protocols::types::{ExtractedContent, PageElement};

use crate::visibility::{collapse_whitespace, is_visible, visible_text};

/// Selectors whose text makes up the main body, matched in document order.
const MAIN_SELECTORS: &str = "h1, h2, h3, h4, p, li, blockquote, figcaption, dd, td";
const HEADLINE_SELECTORS: &str = "h1, h2, h3";
const ELEMENT_SELECTORS: &str = "button, a, input[type=submit]";
/// Main-text blocks inside these are page chrome, not copy.
const CHROME_TAGS: [&str; 2] = ["nav", "footer"];
const CTA_CLASS_HINTS: [&str; 3] = ["btn", "button", "cta"];
const MAX_ELEMENT_TEXT: usize = 80;

/// Limits applied while extracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Minimum characters for a text block to count.
    pub min_text_length: usize,
    /// Character budget for the main text.
    pub max_chars: usize,
    pub max_headlines: usize,
    pub max_elements: usize,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            min_text_length: 20,
            max_chars: 5000,
            max_headlines: 10,
            max_elements: 20,
        }
    }
}

/// Extracts visible page text with a fixed selector list.
pub struct ContentExtractor {
    options: ExtractionOptions,
    main: Option<Selector>,
    headlines: Option<Selector>,
    elements: Option<Selector>,
    title: Option<Selector>,
    meta: Option<Selector>,
}

impl ContentExtractor {
    pub fn new(options: ExtractionOptions) -> Self {
        Self {
            options,
            main: Selector::parse(MAIN_SELECTORS).ok(),
            headlines: Selector::parse(HEADLINE_SELECTORS).ok(),
            elements: Selector::parse(ELEMENT_SELECTORS).ok(),
            title: Selector::parse("title").ok(),
            meta: Selector::parse("meta").ok(),
        }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Extract everything the analysis needs from a page.
    pub fn extract(&self, html: &str, url: Option<&str>) -> ExtractedContent {
        let doc = Html::parse_document(html);
        let headlines = self.collect_headlines(&doc);
        let content = ExtractedContent {
            url: url.map(str::to_string),
            title: self.collect_title(&doc, &headlines),
            description: self.collect_description(&doc),
            main_text: self.collect_main_text(&doc),
            headlines,
            elements: self.collect_elements(&doc),
        };
        debug!(
            "Extracted {} chars, {} headlines, {} elements",
            content.char_count(),
            content.headlines.len(),
            content.elements.len()
        );
        content
    }

    /// Only the concatenated main text. Empty when nothing qualifies.
    pub fn extract_main_text(&self, html: &str) -> String {
        self.collect_main_text(&Html::parse_document(html))
    }

    fn collect_main_text(&self, doc: &Html) -> String {
        let Some(selector) = &self.main else {
            return String::new();
        };
        let budget = self.options.max_chars;
        let mut out = String::new();
        let mut used = 0usize;
        let mut seen = HashSet::new();
        let mut collected = HashSet::new();

        for element in doc.select(selector) {
            if element
                .ancestors()
                .any(|ancestor| collected.contains(&ancestor.id()))
            {
                continue;
            }
            if in_chrome(&element) || !is_visible(&element) {
                continue;
            }
            let text = visible_text(&element);
            let len = text.chars().count();
            if len < self.options.min_text_length || !seen.insert(text.clone()) {
                continue;
            }
            collected.insert(element.deref().id());

            let sep = usize::from(!out.is_empty());
            if used + sep + len > budget {
                let remaining = budget.saturating_sub(used + sep);
                if remaining > 0 {
                    if sep == 1 {
                        out.push('\n');
                    }
                    out.extend(text.chars().take(remaining));
                }
                break;
            }
            if sep == 1 {
                out.push('\n');
            }
            out.push_str(&text);
            used += sep + len;
        }

        out
    }

    fn collect_headlines(&self, doc: &Html) -> Vec<String> {
        let Some(selector) = &self.headlines else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        doc.select(selector)
            .filter(is_visible)
            .map(|el| visible_text(&el))
            .filter(|text| !text.is_empty() && seen.insert(text.clone()))
            .take(self.options.max_headlines)
            .collect()
    }

    fn collect_elements(&self, doc: &Html) -> Vec<PageElement> {
        let Some(selector) = &self.elements else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for element in doc.select(selector) {
            if found.len() >= self.options.max_elements {
                break;
            }
            if !is_call_to_action(&element) || !is_visible(&element) {
                continue;
            }
            let text = match element.value().name() {
                "input" => collapse_whitespace(element.value().attr("value").unwrap_or_default()),
                _ => visible_text(&element),
            };
            if text.is_empty() || !seen.insert(text.to_lowercase()) {
                continue;
            }
            let text: String = text.chars().take(MAX_ELEMENT_TEXT).collect();
            found.push(PageElement::new(element.value().name(), text));
        }

        found
    }

    fn collect_title(&self, doc: &Html, headlines: &[String]) -> String {
        self.title
            .as_ref()
            .and_then(|sel| doc.select(sel).next())
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .or_else(|| headlines.first().cloned())
            .unwrap_or_default()
    }

    fn collect_description(&self, doc: &Html) -> String {
        let Some(selector) = &self.meta else {
            return String::new();
        };
        let content_of = |key: &str, name: &str| {
            doc.select(selector)
                .find(|el| {
                    el.value()
                        .attr(key)
                        .is_some_and(|v| v.trim().eq_ignore_ascii_case(name))
                })
                .and_then(|el| el.value().attr("content"))
                .map(collapse_whitespace)
                .filter(|c| !c.is_empty())
        };
        content_of("name", "description")
            .or_else(|| content_of("property", "og:description"))
            .unwrap_or_default()
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(ExtractionOptions::default())
    }
}

fn in_chrome(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| CHROME_TAGS.contains(&ancestor.value().name()))
}

fn is_call_to_action(element: &ElementRef<'_>) -> bool {
    let el = element.value();
    match el.name() {
        "button" | "input" => true,
        "a" => {
            if el.attr("role").is_some_and(|r| r.eq_ignore_ascii_case("button")) {
                return true;
            }
            el.attr("class").is_some_and(|class| {
                let class = class.to_lowercase();
                CTA_CLASS_HINTS.iter().any(|hint| class.contains(hint))
            })
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
