//! # BrandLens Extension - HTML Extractor
//!
//! Gathers visible text, headlines and calls to action from an HTML page.

mod extractor;
mod visibility;

pub use extractor::{ContentExtractor, ExtractionOptions};
pub use visibility::{collapse_whitespace, is_visible, visible_text};
