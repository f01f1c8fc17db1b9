//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;

use terragrid::models::{CellColorRecord, PivotedGrid};

/// Assert the long-form records form a complete `columns` x `rows` grid in
/// row-major order
pub fn assert_complete_grid(records: &[CellColorRecord], columns: u32, rows: u32) {
    let keys: Vec<(u32, u32)> = records.iter().map(CellColorRecord::key).collect();
    let expected: Vec<(u32, u32)> = (0..rows)
        .flat_map(|z| (0..columns).map(move |x| (x, z)))
        .collect();
    assert_eq!(keys, expected, "records are not a row-major {columns}x{rows} grid");
}

/// Assert the hex color at each listed (x, z) position of a pivoted grid
pub fn assert_cells(grid: &PivotedGrid, expected: &[(u32, u32, &str)]) {
    for &(x, z, hex) in expected {
        assert_eq!(
            grid.hex(x, z).as_deref(),
            Some(hex),
            "Unexpected color at cell ({x}, {z})"
        );
    }
}

/// Assert a file exists and starts with the given magic bytes
pub fn assert_file_magic(path: &Path, magic: &[u8]) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    assert!(
        bytes.starts_with(magic),
        "Expected {} to start with {:?}, got {:?}",
        path.display(),
        magic,
        &bytes[..magic.len().min(bytes.len())]
    );
}

/// Assert a file is an xlsx (zip) container
pub fn assert_xlsx(path: &Path) {
    assert_file_magic(path, b"PK\x03\x04");
}

/// Assert a file is a PNG image
pub fn assert_png(path: &Path) {
    assert_file_magic(path, b"\x89PNG\r\n\x1a\n");
}
