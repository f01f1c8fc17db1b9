//! Grid configuration: column/row counts and edge policy.

use std::fmt;
use std::str::FromStr;

use super::error::GridError;

/// How cell boundaries are placed when the image size is not a multiple of
/// the column or row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Every cell is `floor(size / count)` pixels wide, starting at
    /// `floor(index * size / count)`. Trailing pixels past the last cell are
    /// never sampled.
    #[default]
    Truncate,
    /// Cell `i` spans `floor(i * size / count)..floor((i + 1) * size / count)`,
    /// so cells tile the whole image and every pixel is sampled exactly once.
    Cover,
}

impl EdgePolicy {
    /// Lowercase name, as used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            EdgePolicy::Truncate => "truncate",
            EdgePolicy::Cover => "cover",
        }
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized edge policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEdgePolicyError(pub String);

impl fmt::Display for ParseEdgePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown edge policy '{}' (expected 'truncate' or 'cover')",
            self.0
        )
    }
}

impl std::error::Error for ParseEdgePolicyError {}

impl FromStr for EdgePolicy {
    type Err = ParseEdgePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(EdgePolicy::Truncate),
            "cover" => Ok(EdgePolicy::Cover),
            _ => Err(ParseEdgePolicyError(s.to_string())),
        }
    }
}

/// Number of columns and rows to partition an image into.
///
/// Construction validates that both counts are positive, so every
/// `GridSpec` in circulation describes at least one cell.
///
/// ```
/// use cell_grid::{EdgePolicy, GridSpec};
///
/// let spec = GridSpec::new(100, 30).unwrap().with_edge(EdgePolicy::Cover);
/// assert_eq!(spec.cell_count(), 3000);
/// assert!(GridSpec::new(0, 30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    columns: u32,
    rows: u32,
    edge: EdgePolicy,
}

impl GridSpec {
    /// Create a grid of `columns` x `rows` cells with the default
    /// [`EdgePolicy::Truncate`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either count is zero.
    pub fn new(columns: u32, rows: u32) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::InvalidDimensions { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            edge: EdgePolicy::default(),
        })
    }

    /// Set the edge policy.
    pub fn with_edge(mut self, edge: EdgePolicy) -> Self {
        self.edge = edge;
        self
    }

    /// Number of columns (Grid_X range).
    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows (Grid_Z range).
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn edge(&self) -> EdgePolicy {
        self.edge
    }

    /// Total number of cells, `columns * rows`.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}
