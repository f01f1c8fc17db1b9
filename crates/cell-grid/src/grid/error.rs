//! Error type for grid configuration and sampling.

use std::fmt;

/// Error type for grid configuration and sampling.
///
/// Every variant is fatal for a run: a grid that cannot be laid out over the
/// image, or a cell that covers no pixels, signals a misconfigured column or
/// row count rather than a transient condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Column or row count is zero
    InvalidDimensions {
        /// Requested column count
        columns: u32,
        /// Requested row count
        rows: u32,
    },
    /// Image has zero width or height
    EmptyImage,
    /// Pixel buffer length does not match `width * height`
    BufferLength {
        /// `width * height`
        expected: usize,
        /// Actual number of pixels supplied
        actual: usize,
    },
    /// Packed RGB byte buffer length does not match `width * height * 3`
    ByteLength {
        /// `width * height * 3`
        expected: usize,
        /// Actual number of bytes supplied
        actual: usize,
    },
    /// Raster dimensions differ from the dimensions the sampler was built for
    DimensionMismatch {
        /// Dimensions the sampler was built for
        expected: (u32, u32),
        /// Dimensions of the raster passed in
        actual: (u32, u32),
    },
    /// A grid cell covers zero pixels (grid finer than the image)
    EmptyCell {
        /// Column index of the cell
        x: u32,
        /// Row index of the cell
        z: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimensions { columns, rows } => {
                write!(
                    f,
                    "grid must have at least one column and one row (got {}x{})",
                    columns, rows
                )
            }
            GridError::EmptyImage => write!(f, "image has no pixels"),
            GridError::BufferLength { expected, actual } => {
                write!(
                    f,
                    "pixel buffer length mismatch: expected {} pixels, got {}",
                    expected, actual
                )
            }
            GridError::ByteLength { expected, actual } => {
                write!(
                    f,
                    "RGB byte buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
            GridError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "raster is {}x{} but sampler was built for {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            GridError::EmptyCell { x, z } => {
                write!(
                    f,
                    "grid cell ({}, {}) contains no pixels; grid is finer than the image",
                    x, z
                )
            }
        }
    }
}

impl std::error::Error for GridError {}
