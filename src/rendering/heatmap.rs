use cell_grid::Rgb;
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook};
use std::collections::HashMap;
use std::path::Path;

use crate::error::RenderError;
use crate::models::{HeatmapConfig, PivotedGrid};
use crate::services::create_parent_dir;

/// Worksheet limits of the xlsx format
pub const MAX_SHEET_COLUMNS: u32 = 16_384;
pub const MAX_SHEET_ROWS: u32 = 1_048_576;

/// Renders a pivoted grid as a spreadsheet whose cell fills are the grid colors
pub struct HeatmapRenderer {
    config: HeatmapConfig,
}

impl HeatmapRenderer {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    /// Build the workbook: sheet cell (row = Grid_Z, column = Grid_X) gets a
    /// solid fill of that grid cell's color, with no text and no border
    pub fn build_workbook(&self, grid: &PivotedGrid) -> Result<Workbook, RenderError> {
        if grid.columns() > MAX_SHEET_COLUMNS || grid.rows() > MAX_SHEET_ROWS {
            return Err(RenderError::SheetTooLarge {
                columns: grid.columns(),
                rows: grid.rows(),
            });
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.config.sheet_name)?;

        // Bounds checked above, so the narrowing casts are lossless
        for col in 0..grid.columns() {
            worksheet.set_column_width(col as u16, self.config.cell_width)?;
        }
        for row in 0..grid.rows() {
            worksheet.set_row_height(row, self.config.cell_height)?;
        }

        let mut formats: HashMap<Rgb, Format> = HashMap::new();
        for (x, z, color) in grid.iter_cells() {
            let format = formats.entry(color).or_insert_with(|| fill_format(color));
            worksheet.write_blank(z, x as u16, format)?;
        }

        tracing::debug!(
            columns = grid.columns(),
            rows = grid.rows(),
            fills = formats.len(),
            "Built heatmap workbook"
        );
        Ok(workbook)
    }

    /// Write the heatmap workbook to `path`
    pub fn render(&self, grid: &PivotedGrid, path: &Path) -> Result<(), RenderError> {
        create_parent_dir(path)?;
        let mut workbook = self.build_workbook(grid)?;
        workbook.save(path)?;
        tracing::info!(path = %path.display(), "Wrote heatmap workbook");
        Ok(())
    }

    /// Heatmap workbook as xlsx bytes
    pub fn render_to_buffer(&self, grid: &PivotedGrid) -> Result<Vec<u8>, RenderError> {
        let mut workbook = self.build_workbook(grid)?;
        Ok(workbook.save_to_buffer()?)
    }
}

fn fill_format(color: Rgb) -> Format {
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(color.to_u32()))
}
