//! # BrandLens Protocols
//!
//! Shared definitions for the BrandLens workspace.
//! Contains only data types, the message contract and interface traits.
//!
//! ## Core Items
//!
//! - [`LanguageModel`] - Trait for generative-language backends
//! - [`ExtractedContent`] - Text gathered from a page
//! - [`AnalysisResult`] - JSON analysis returned by the model
//! - [`Request`] / [`Response`] - Message contract between UI surfaces

pub mod error;
pub mod message;
pub mod model;
pub mod types;

pub use error::{AnalyzerError, ProviderError};
pub use message::{Action, Request, Response};
pub use model::{GenerationOptions, LanguageModel};
pub use types::*;
