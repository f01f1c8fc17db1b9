use cell_grid::Rgb;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::models::{CellColorRecord, PivotedGrid};
use crate::services::create_parent_dir;

/// Column header of the first pivot column (row index)
pub const PIVOT_INDEX_HEADER: &str = "Grid_Z";

/// CSV row of the long-form table
#[derive(Debug, Serialize, Deserialize)]
struct LongFormRow {
    #[serde(rename = "Grid_X")]
    grid_x: u32,
    #[serde(rename = "Grid_Z")]
    grid_z: u32,
    #[serde(rename = "RGB_Color")]
    rgb: String,
    #[serde(rename = "Hex_Color")]
    hex: String,
}

impl From<&CellColorRecord> for LongFormRow {
    fn from(record: &CellColorRecord) -> Self {
        Self {
            grid_x: record.grid_x,
            grid_z: record.grid_z,
            rgb: record.color.to_tuple_string(),
            hex: record.hex(),
        }
    }
}

/// Write the long-form table (`Grid_X,Grid_Z,RGB_Color,Hex_Color`) to a file
pub fn write_long_form(path: &Path, records: &[CellColorRecord]) -> Result<(), ExportError> {
    create_parent_dir(path)?;
    write_long_form_to(File::create(path)?, records)?;
    tracing::info!(path = %path.display(), records = records.len(), "Wrote long-form table");
    Ok(())
}

/// Write the long-form table to any writer
pub fn write_long_form_to<W: Write>(
    writer: W,
    records: &[CellColorRecord],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        csv.serialize(LongFormRow::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// Read a long-form table written by [`write_long_form`]
pub fn read_long_form(path: &Path) -> Result<Vec<CellColorRecord>, ExportError> {
    let records = read_long_form_from(File::open(path)?)?;
    tracing::info!(path = %path.display(), records = records.len(), "Read long-form table");
    Ok(records)
}

/// Read a long-form table from any reader.
///
/// `Hex_Color` is authoritative; an `RGB_Color` that disagrees with it (for
/// example after a hand edit of one column) is logged and ignored.
pub fn read_long_form_from<R: Read>(reader: R) -> Result<Vec<CellColorRecord>, ExportError> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, row) in csv.deserialize::<LongFormRow>().enumerate() {
        let row = row?;
        // Header is line 1
        let line = i + 2;
        let color: Rgb = row
            .hex
            .parse()
            .map_err(|source| ExportError::InvalidColor { row: line, source })?;

        match Rgb::parse_tuple(&row.rgb) {
            Ok(rgb) if rgb == color => {}
            Ok(rgb) => tracing::warn!(
                line,
                rgb = %rgb,
                hex = %color,
                "RGB_Color disagrees with Hex_Color, using Hex_Color"
            ),
            Err(e) => tracing::warn!(line, %e, "Unreadable RGB_Color, using Hex_Color"),
        }

        records.push(CellColorRecord::new(row.grid_x, row.grid_z, color));
    }

    Ok(records)
}

/// Pivot long-form records into a Grid_Z x Grid_X table
pub fn pivot(records: &[CellColorRecord]) -> Result<PivotedGrid, ExportError> {
    PivotedGrid::from_records(records)
}

/// Write the pivoted table to a file
pub fn write_pivot(path: &Path, grid: &PivotedGrid) -> Result<(), ExportError> {
    create_parent_dir(path)?;
    write_pivot_to(File::create(path)?, grid)?;
    tracing::info!(
        path = %path.display(),
        columns = grid.columns(),
        rows = grid.rows(),
        "Wrote pivoted table"
    );
    Ok(())
}

/// Write the pivoted table to any writer.
///
/// Header is `Grid_Z,0,1,...`; each following row starts with its Grid_Z
/// and holds one `#rrggbb` per Grid_X.
pub fn write_pivot_to<W: Write>(writer: W, grid: &PivotedGrid) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(grid.columns() as usize + 1);
    header.push(PIVOT_INDEX_HEADER.to_string());
    header.extend((0..grid.columns()).map(|x| x.to_string()));
    csv.write_record(&header)?;

    for (z, row) in grid.iter_rows().enumerate() {
        let mut fields = Vec::with_capacity(row.len() + 1);
        fields.push(z.to_string());
        fields.extend(row.iter().map(|c| c.to_hex()));
        csv.write_record(&fields)?;
    }

    csv.flush()?;
    Ok(())
}
