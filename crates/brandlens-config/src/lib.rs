//! # BrandLens Config
//!
//! Flat key-value settings for BrandLens, persisted as TOML.

mod error;
mod loader;
mod schema;
mod store;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use store::SettingsStore;
pub use validator::{SettingsValidator, ValidationError, ValidationResult, ValidationWarning};
