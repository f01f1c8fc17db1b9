use cell_grid::Rgb;
use std::collections::HashSet;

use crate::error::ExportError;
use crate::models::CellColorRecord;

/// Wide table of cell colors: rows are Grid_Z, columns are Grid_X
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotedGrid {
    columns: u32,
    rows: u32,
    /// Row-major, `rows * columns` entries
    cells: Vec<Rgb>,
}

impl PivotedGrid {
    /// Pivot long-form records into a grid.
    ///
    /// Dimensions are inferred from the largest Grid_X and Grid_Z present.
    /// Every position inside that rectangle must appear exactly once.
    pub fn from_records(records: &[CellColorRecord]) -> Result<Self, ExportError> {
        let (max_x, max_z) = records
            .iter()
            .fold(None, |acc: Option<(u32, u32)>, r| match acc {
                None => Some(r.key()),
                Some((mx, mz)) => Some((mx.max(r.grid_x), mz.max(r.grid_z))),
            })
            .ok_or(ExportError::EmptyTable)?;

        // A key of u32::MAX leaves no room for the count
        let (columns, rows) = match (max_x.checked_add(1), max_z.checked_add(1)) {
            (Some(columns), Some(rows)) => (columns, rows),
            _ => {
                let (x, z) = records
                    .iter()
                    .map(CellColorRecord::key)
                    .find(|&(x, z)| x == u32::MAX || z == u32::MAX)
                    .unwrap_or((max_x, max_z));
                return Err(ExportError::KeyOutOfRange { x, z });
            }
        };

        // More positions than records: report the first gap without
        // allocating a slot table sized by a possibly bogus key.
        if columns as u64 * rows as u64 > records.len() as u64 {
            let keys: HashSet<(u32, u32)> = records.iter().map(CellColorRecord::key).collect();
            let gap = (0..rows)
                .flat_map(|z| (0..columns).map(move |x| (x, z)))
                .find(|key| !keys.contains(key));
            if let Some((x, z)) = gap {
                return Err(ExportError::MissingKey { x, z });
            }
        }

        let mut slots: Vec<Option<Rgb>> = vec![None; columns as usize * rows as usize];

        for record in records {
            let slot = &mut slots[record.grid_z as usize * columns as usize + record.grid_x as usize];
            if slot.is_some() {
                return Err(ExportError::DuplicateKey {
                    x: record.grid_x,
                    z: record.grid_z,
                });
            }
            *slot = Some(record.color);
        }

        let mut cells = Vec::with_capacity(slots.len());
        for (i, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(color) => cells.push(color),
                None => {
                    return Err(ExportError::MissingKey {
                        x: (i % columns as usize) as u32,
                        z: (i / columns as usize) as u32,
                    })
                }
            }
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Fail unless the grid is exactly `columns` x `rows`
    pub fn expect_dimensions(&self, columns: u32, rows: u32) -> Result<(), ExportError> {
        if self.columns != columns || self.rows != rows {
            return Err(ExportError::DimensionMismatch {
                columns,
                rows,
                actual_columns: self.columns,
                actual_rows: self.rows,
            });
        }
        Ok(())
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Color at column `x`, row `z`
    pub fn get(&self, x: u32, z: u32) -> Option<Rgb> {
        if x >= self.columns || z >= self.rows {
            return None;
        }
        Some(self.cells[z as usize * self.columns as usize + x as usize])
    }

    /// `#rrggbb` at column `x`, row `z`
    pub fn hex(&self, x: u32, z: u32) -> Option<String> {
        self.get(x, z).map(Rgb::to_hex)
    }

    /// Rows in Grid_Z order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.cells.chunks(self.columns as usize)
    }

    /// Every cell as (x, z, color), row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &color)| (i as u32 % columns, i as u32 / columns, color))
    }

    /// Number of distinct colors in the grid
    pub fn distinct_colors(&self) -> usize {
        let mut seen: Vec<Rgb> = self.cells.clone();
        seen.sort_by_key(|c| c.to_u32());
        seen.dedup();
        seen.len()
    }
}
