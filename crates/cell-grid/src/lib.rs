//! cell-grid: grid sampling and dominant-color extraction
//!
//! This library partitions a raster image into a fixed number of rectangular
//! cells and determines, per cell, the most frequent pixel color. It is the
//! computational core of `terragrid`, which turns color-coded terrameter
//! (resistivity) cross-sections into tables of cell colors.
//!
//! # Quick Start
//!
//! ```
//! use cell_grid::{GridSampler, GridSpec, Raster, Rgb};
//!
//! // 4x4 image made of four solid 2x2 quadrants
//! let raster = Raster::from_fn(4, 4, |x, z| match (x < 2, z < 2) {
//!     (true, true) => Rgb::new(255, 0, 0),
//!     (false, true) => Rgb::new(0, 255, 0),
//!     (true, false) => Rgb::new(0, 0, 255),
//!     (false, false) => Rgb::new(255, 255, 255),
//! });
//!
//! let spec = GridSpec::new(2, 2)?;
//! let sampler = GridSampler::new(spec, raster.width(), raster.height())?;
//! let cells = sampler.sample(&raster)?;
//!
//! let hex: Vec<String> = cells.iter().map(|c| c.hex()).collect();
//! assert_eq!(hex, ["#ff0000", "#00ff00", "#0000ff", "#ffffff"]);
//! # Ok::<(), cell_grid::GridError>(())
//! ```
//!
//! # Data Flow
//!
//! ```text
//! Raster (row-major Rgb)
//!     |
//!     v
//! GridSampler::cells()       (CellRect per (x, z), row-major)
//!     |
//!     v
//! ColorHistogram             (stable frequency count per cell)
//!     |
//!     v
//! CellColor                  (mode, count, share, hex)
//! ```
//!
//! # Guarantees
//!
//! - [`GridSampler::sample`] returns exactly `columns * rows` cells, each
//!   (x, z) pair once, in row-major order, or fails.
//! - A cell that covers no pixels is an error ([`GridError::EmptyCell`]),
//!   never a silent default color.
//! - Mode ties go to the color encountered first when scanning the cell row
//!   by row, left to right. Results are deterministic.

pub mod color;
pub mod grid;
pub mod raster;
pub mod reduce;


pub use color::{ParseColorError, Rgb};
pub use grid::{
    CellColor, CellRect, EdgePolicy, GridError, GridSampler, GridSpec, ParseEdgePolicyError,
};
pub use raster::Raster;
pub use reduce::{dominant_color, ColorHistogram};
