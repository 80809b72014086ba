//! # BrandLens UI
//!
//! Presentation for analysis results:
//!
//! - [`popup`] - terminal report and status panels
//! - [`options`] - settings listing with the API key masked
//! - [`overlay`] - HTML panel injected into the analyzed page, plus drag math

pub mod options;
pub mod overlay;
pub mod popup;

pub use options::{display_value, render_settings, render_validation};
pub use overlay::{
    DragState, OVERLAY_ID, Point, Size, escape_html, inject_overlay, remove_overlay,
    render_panel, render_status_panel,
};
pub use popup::{BAR_WIDTH, PopupState, render, render_report, tone_bar};
