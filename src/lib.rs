//! Terragrid - dominant colors of terrameter images
//!
//! Cuts a raster image into a grid of cells, reduces every cell to its most
//! frequent color and exports the result as a long-form table, a pivoted
//! table and a spreadsheet heatmap.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
