use std::path::PathBuf;

use cell_grid::{GridError, ParseColorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image {path} has no pixels")]
    Empty { path: PathBuf },

    #[error("Invalid pixel buffer: {0}")]
    Buffer(#[from] GridError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate grid cell ({x}, {z})")]
    DuplicateKey { x: u32, z: u32 },

    #[error("Missing grid cell ({x}, {z})")]
    MissingKey { x: u32, z: u32 },

    #[error("Grid cell ({x}, {z}) is out of range")]
    KeyOutOfRange { x: u32, z: u32 },

    #[error("Table has no records")]
    EmptyTable,

    #[error("Pivoted grid is {actual_columns}x{actual_rows}, expected {columns}x{rows}")]
    DimensionMismatch {
        columns: u32,
        rows: u32,
        actual_columns: u32,
        actual_rows: u32,
    },

    #[error("Invalid color in row {row}: {source}")]
    InvalidColor {
        row: usize,
        #[source]
        source: ParseColorError,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Grid of {columns}x{rows} cells exceeds the worksheet limits")]
    SheetTooLarge { columns: u32, rows: u32 },

    #[error("Preview too large: {width}x{height} pixels")]
    PreviewTooLarge { width: u64, height: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Error from the grid pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
