//! Data model shared across the BrandLens workspace.

mod analysis;
mod content;

pub use analysis::*;
pub use content::*;
