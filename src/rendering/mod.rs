//! Visual outputs of a pivoted grid
//!
//! - [`heatmap`]: spreadsheet whose cell fills are the grid colors
//! - [`preview`]: optional PNG with one solid block per grid cell

pub mod heatmap;
pub mod preview;

pub use heatmap::HeatmapRenderer;
pub use preview::render_preview_png;
