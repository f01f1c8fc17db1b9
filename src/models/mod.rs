pub mod config;
pub mod pivot;
pub mod record;

pub use config::{GridConfig, HeatmapConfig, OutputConfig, RunConfig};
pub use pivot::PivotedGrid;
pub use record::CellColorRecord;
