//! # BrandLens Provider - Gemini
//!
//! Google Gemini `generateContent` client for BrandLens.

mod client;
mod provider;
mod types;

pub use client::{DEFAULT_BASE_URL, GeminiClient};
pub use provider::GeminiModel;
pub use types::*;
