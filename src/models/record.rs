use cell_grid::{CellColor, Rgb};

/// One row of the long-form table: the dominant color of cell (Grid_X, Grid_Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellColorRecord {
    pub grid_x: u32,
    pub grid_z: u32,
    pub color: Rgb,
}

impl CellColorRecord {
    pub fn new(grid_x: u32, grid_z: u32, color: Rgb) -> Self {
        Self {
            grid_x,
            grid_z,
            color,
        }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn key(&self) -> (u32, u32) {
        (self.grid_x, self.grid_z)
    }
}

impl From<&CellColor> for CellColorRecord {
    fn from(cell: &CellColor) -> Self {
        Self::new(cell.x, cell.z, cell.color)
    }
}
