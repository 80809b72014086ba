//! # BrandLens API
//!
//! Local HTTP endpoint that lets browser-side UI surfaces talk to the
//! analysis backend.
//!
//! ```text
//! POST /message  - message contract (always 200, body is a Response)
//! GET  /health   - liveness and cache size
//! ```

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{HealthResponse, MAX_BODY_BYTES, create_router};
pub use server::{ApiConfig, ApiServer};
