use cell_grid::{EdgePolicy, GridError, GridSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Run configuration loaded from terragrid.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Grid layout
    #[serde(default)]
    pub grid: GridConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Spreadsheet heatmap appearance
    #[serde(default)]
    pub heatmap: HeatmapConfig,
}

/// Number of cells to cut the image into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns (Grid_X)
    #[serde(default = "default_columns")]
    pub columns: u32,

    /// Number of rows (Grid_Z)
    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Boundary rounding: "truncate" (default) or "cover"
    #[serde(default, with = "edge_policy")]
    pub edge: EdgePolicy,
}

fn default_columns() -> u32 {
    100
}

fn default_rows() -> u32 {
    30
}

/// Where outputs are written (file names are relative to `dir`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Long-form table: Grid_X,Grid_Z,RGB_Color,Hex_Color
    #[serde(default = "default_long_csv")]
    pub long_csv: String,

    /// Pivoted table: rows = Grid_Z, columns = Grid_X
    #[serde(default = "default_pivot_csv")]
    pub pivot_csv: String,

    /// Spreadsheet heatmap
    #[serde(default = "default_heatmap")]
    pub heatmap: String,

    /// PNG preview (only written when requested)
    #[serde(default = "default_preview")]
    pub preview: String,

    /// Edge length of one grid cell in the PNG preview
    #[serde(default = "default_preview_cell_px")]
    pub preview_cell_px: u32,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_long_csv() -> String {
    "grid_colors.csv".to_string()
}

fn default_pivot_csv() -> String {
    "grid_colors_pivot.csv".to_string()
}

fn default_heatmap() -> String {
    "grid_heatmap.xlsx".to_string()
}

fn default_preview() -> String {
    "grid_preview.png".to_string()
}

fn default_preview_cell_px() -> u32 {
    8
}

/// Worksheet layout for the heatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Column width in character units
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,

    /// Row height in points
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
}

fn default_sheet_name() -> String {
    "Heatmap".to_string()
}

fn default_cell_width() -> f64 {
    2.0
}

fn default_cell_height() -> f64 {
    12.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
            edge: EdgePolicy::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            long_csv: default_long_csv(),
            pivot_csv: default_pivot_csv(),
            heatmap: default_heatmap(),
            preview: default_preview(),
            preview_cell_px: default_preview_cell_px(),
        }
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            columns = config.grid.columns,
            rows = config.grid.rows,
            edge = %config.grid.edge,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `path` if given, otherwise fall back to built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                tracing::debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize to YAML (used by `terragrid init`)
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Reject settings that cannot produce a usable run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.columns == 0 {
            return Err(ConfigError::Invalid(
                "grid.columns must be positive".to_string(),
            ));
        }
        if self.grid.rows == 0 {
            return Err(ConfigError::Invalid("grid.rows must be positive".to_string()));
        }
        if self.output.preview_cell_px == 0 {
            return Err(ConfigError::Invalid(
                "output.preview_cell_px must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("output.long_csv", &self.output.long_csv),
            ("output.pivot_csv", &self.output.pivot_csv),
            ("output.heatmap", &self.output.heatmap),
            ("output.preview", &self.output.preview),
            ("heatmap.sheet_name", &self.heatmap.sheet_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }
        if !(self.heatmap.cell_width > 0.0 && self.heatmap.cell_height > 0.0) {
            return Err(ConfigError::Invalid(
                "heatmap cell_width and cell_height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Grid layout as a validated [`GridSpec`]
    pub fn grid_spec(&self) -> Result<GridSpec, GridError> {
        Ok(GridSpec::new(self.grid.columns, self.grid.rows)?.with_edge(self.grid.edge))
    }

    pub fn long_csv_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.long_csv)
    }

    pub fn pivot_csv_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.pivot_csv)
    }

    pub fn heatmap_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.heatmap)
    }

    pub fn preview_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.preview)
    }
}

/// Serde adapter for [`EdgePolicy`] (the core crate has no serde dependency)
mod edge_policy {
    use cell_grid::EdgePolicy;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(edge: &EdgePolicy, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(edge.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EdgePolicy, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
