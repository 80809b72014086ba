//! # BrandLens Core
//!
//! The analysis pipeline between extracted page content and the UI:
//!
//! - [`PromptBuilder`] - fills the analysis template
//! - [`parse_analysis`] - finds the JSON object in a model reply
//! - [`Analyzer`] - calls the model and caches results by input text
//! - [`MessageRouter`] - answers UI messages

pub mod analyzer;
pub mod parser;
pub mod prompt;
pub mod router;

pub use analyzer::{Analyzer, extraction_options};
pub use parser::{ParseFailure, parse_analysis, strip_code_fences};
pub use prompt::{DEFAULT_TEMPLATE, PromptBuilder, render_template};
pub use router::{MessageRouter, apply_api_key_override, error_message};
