//! Temporary workspace for pipeline runs.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use terragrid::models::RunConfig;
use terragrid::services::GridPipeline;

/// Temporary directory with inputs and a run configuration pointing its
/// outputs into `out/`
pub struct TestWorkspace {
    dir: TempDir,
    pub config: RunConfig,
}

impl TestWorkspace {
    /// Workspace whose grid is `columns` x `rows`
    pub fn new(columns: u32, rows: u32) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = RunConfig::default();
        config.grid.columns = columns;
        config.grid.rows = rows;
        config.output.dir = dir.path().join("out");
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path for an input file inside the workspace
    pub fn input(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write an input file and return its path
    pub fn write_input(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.input(name);
        std::fs::write(&path, contents).expect("Failed to write input");
        path
    }

    pub fn pipeline(&self) -> GridPipeline {
        GridPipeline::new(self.config.clone()).expect("Invalid test config")
    }
}
