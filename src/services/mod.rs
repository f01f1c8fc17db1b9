pub mod exporter;
pub mod image_loader;
pub mod pipeline;

pub use image_loader::load_raster;
pub use pipeline::{GridPipeline, RunOutputs, RunReport};

use std::path::Path;

/// Create the directory an output file will be written into
pub(crate) fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
