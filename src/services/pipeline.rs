use cell_grid::{CellColor, GridSampler};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, RenderError};
use crate::models::{CellColorRecord, PivotedGrid, RunConfig};
use crate::rendering::{render_preview_png, HeatmapRenderer};
use crate::services::{create_parent_dir, exporter, image_loader};

/// Cells whose dominant color holds less than this share are reported as
/// ambiguous
pub const AMBIGUOUS_SHARE: f64 = 0.5;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Source image size in pixels, when the run started from an image
    pub image_size: Option<(u32, u32)>,
    /// Grid size as (columns, rows)
    pub grid_size: (u32, u32),
    /// Number of distinct dominant colors across the grid
    pub distinct_colors: usize,
    /// Mean fraction of pixels holding each cell's dominant color
    pub mean_share: Option<f64>,
    /// Cells below [`AMBIGUOUS_SHARE`]
    pub ambiguous_cells: usize,
    pub outputs: RunOutputs,
}

/// Files written by a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutputs {
    pub long_csv: Option<PathBuf>,
    pub pivot_csv: PathBuf,
    pub heatmap: PathBuf,
    pub preview: Option<PathBuf>,
}

impl RunOutputs {
    /// All written paths in the order they were produced
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = Vec::with_capacity(4);
        if let Some(p) = &self.long_csv {
            paths.push(p.as_path());
        }
        paths.push(self.pivot_csv.as_path());
        paths.push(self.heatmap.as_path());
        if let Some(p) = &self.preview {
            paths.push(p.as_path());
        }
        paths
    }
}

/// Image -> grid -> tables -> heatmap, run once per input
pub struct GridPipeline {
    config: RunConfig,
    preview: bool,
}

impl GridPipeline {
    pub fn new(config: RunConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            config,
            preview: false,
        })
    }

    /// Also write the PNG preview
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Full run starting from a raster image
    pub fn run(&self, image_path: &Path) -> Result<RunReport, PipelineError> {
        let raster = image_loader::load_raster(image_path)?;
        let spec = self.config.grid_spec()?;
        let sampler = GridSampler::new(spec, raster.width(), raster.height())?;

        tracing::info!(
            image = %image_path.display(),
            width = raster.width(),
            height = raster.height(),
            columns = spec.columns(),
            rows = spec.rows(),
            edge = %spec.edge(),
            "Sampling grid"
        );
        tracing::debug!(
            cell_width = sampler.cell_width(),
            cell_height = sampler.cell_height(),
            "Cell geometry"
        );

        let cells = sampler.sample(&raster)?;
        let (mean_share, ambiguous_cells) = dominance_stats(&cells);

        let records: Vec<CellColorRecord> = cells.iter().map(CellColorRecord::from).collect();
        let long_csv = self.config.long_csv_path();
        exporter::write_long_form(&long_csv, &records)?;

        let grid = exporter::pivot(&records)?;
        grid.expect_dimensions(spec.columns(), spec.rows())?;

        let mut outputs = self.write_views(&grid)?;
        outputs.long_csv = Some(long_csv);

        let report = RunReport {
            image_size: Some(raster.dimensions()),
            grid_size: (grid.columns(), grid.rows()),
            distinct_colors: grid.distinct_colors(),
            mean_share,
            ambiguous_cells,
            outputs,
        };
        tracing::info!(
            cells = cells.len(),
            distinct_colors = report.distinct_colors,
            ambiguous_cells,
            "Run complete"
        );
        Ok(report)
    }

    /// Rebuild the pivot table, heatmap and preview from a long-form table,
    /// for example after editing it by hand
    pub fn pivot_existing(&self, csv_path: &Path) -> Result<RunReport, PipelineError> {
        let records = exporter::read_long_form(csv_path)?;
        let grid = exporter::pivot(&records)?;

        let (columns, rows) = (self.config.grid.columns, self.config.grid.rows);
        if (grid.columns(), grid.rows()) != (columns, rows) {
            tracing::warn!(
                columns = grid.columns(),
                rows = grid.rows(),
                configured_columns = columns,
                configured_rows = rows,
                "Table grid differs from configured grid, using table"
            );
        }

        let outputs = self.write_views(&grid)?;
        Ok(RunReport {
            image_size: None,
            grid_size: (grid.columns(), grid.rows()),
            distinct_colors: grid.distinct_colors(),
            mean_share: None,
            ambiguous_cells: 0,
            outputs,
        })
    }

    /// Pivot table, heatmap and optional preview
    fn write_views(&self, grid: &PivotedGrid) -> Result<RunOutputs, PipelineError> {
        let pivot_csv = self.config.pivot_csv_path();
        exporter::write_pivot(&pivot_csv, grid)?;

        let heatmap = self.config.heatmap_path();
        HeatmapRenderer::new(self.config.heatmap.clone()).render(grid, &heatmap)?;

        let preview = if self.preview {
            let path = self.config.preview_path();
            let png = render_preview_png(grid, self.config.output.preview_cell_px)?;
            create_parent_dir(&path)
                .and_then(|()| std::fs::write(&path, &png))
                .map_err(RenderError::from)?;
            tracing::info!(path = %path.display(), bytes = png.len(), "Wrote preview");
            Some(path)
        } else {
            None
        };

        Ok(RunOutputs {
            long_csv: None,
            pivot_csv,
            heatmap,
            preview,
        })
    }
}

/// Mean dominance share and number of ambiguous cells
fn dominance_stats(cells: &[CellColor]) -> (Option<f64>, usize) {
    if cells.is_empty() {
        return (None, 0);
    }

    let mut total = 0.0;
    let mut ambiguous = 0;
    for cell in cells {
        let share = cell.share();
        total += share;
        if share < AMBIGUOUS_SHARE {
            ambiguous += 1;
            tracing::warn!(
                x = cell.x,
                z = cell.z,
                color = %cell.color,
                share,
                distinct = cell.distinct,
                "Ambiguous cell, dominant color below half of pixels"
            );
        }
    }

    let mean = total / cells.len() as f64;
    tracing::debug!(mean_share = mean, "Dominance share");
    (Some(mean), ambiguous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cell_grid::Rgb;

    fn cell(x: u32, count: u32, pixels: u32) -> CellColor {
        CellColor {
            x,
            z: 0,
            color: Rgb::new(1, 2, 3),
            count,
            pixels,
            distinct: 2,
        }
    }

    #[test]
    fn test_dominance_stats() {
        let cells = [cell(0, 4, 4), cell(1, 1, 4)];
        let (mean, ambiguous) = dominance_stats(&cells);

        assert_eq!(mean, Some(0.625));
        assert_eq!(ambiguous, 1);
    }

    #[test]
    fn test_dominance_stats_half_is_not_ambiguous() {
        let (_, ambiguous) = dominance_stats(&[cell(0, 2, 4)]);
        assert_eq!(ambiguous, 0);
    }

    #[test]
    fn test_dominance_stats_empty() {
        assert_eq!(dominance_stats(&[]), (None, 0));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = RunConfig::default();
        config.grid.rows = 0;
        assert!(matches!(
            GridPipeline::new(config),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_outputs_paths_order() {
        let outputs = RunOutputs {
            long_csv: Some(PathBuf::from("a.csv")),
            pivot_csv: PathBuf::from("b.csv"),
            heatmap: PathBuf::from("c.xlsx"),
            preview: None,
        };
        assert_eq!(
            outputs.paths(),
            vec![Path::new("a.csv"), Path::new("b.csv"), Path::new("c.xlsx")]
        );
    }
}
