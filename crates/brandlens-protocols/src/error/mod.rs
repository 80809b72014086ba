//! Error types for the BrandLens protocol layer.

mod analyzer;
mod provider;

pub use analyzer::*;
pub use provider::*;
