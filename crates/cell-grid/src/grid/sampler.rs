//! Cell geometry and per-cell reduction.

use crate::color::Rgb;
use crate::raster::Raster;
use crate::reduce::ColorHistogram;

use super::error::GridError;
use super::spec::{EdgePolicy, GridSpec};

/// Pixel rectangle covered by one grid cell.
///
/// `x`/`z` are the cell's grid indices (Grid_X, Grid_Z); the pixel range is
/// half-open: `[x_start, x_end) x [z_start, z_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub z: u32,
    pub x_start: u32,
    pub x_end: u32,
    pub z_start: u32,
    pub z_end: u32,
}

impl CellRect {
    #[inline]
    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.z_end - self.z_start
    }

    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Dominant color of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellColor {
    /// Column index (Grid_X)
    pub x: u32,
    /// Row index (Grid_Z)
    pub z: u32,
    /// Most frequent color in the cell
    pub color: Rgb,
    /// Pixels with exactly `color`
    pub count: u32,
    /// Pixels sampled in the cell
    pub pixels: u32,
    /// Distinct colors in the cell
    pub distinct: u32,
}

impl CellColor {
    /// Fraction of the cell's pixels that have the dominant color.
    pub fn share(&self) -> f64 {
        if self.pixels == 0 {
            return 0.0;
        }
        self.count as f64 / self.pixels as f64
    }

    /// Lowercase `#rrggbb` of the dominant color.
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}

/// Lays a [`GridSpec`] over an image of known size and reduces each cell to
/// its dominant color.
///
/// Boundaries are computed in integer arithmetic: `floor(i * size / count)`
/// is exact, so layouts are identical across platforms and never drift by a
/// pixel due to float rounding.
///
/// # Example
///
/// ```
/// use cell_grid::{GridSampler, GridSpec, Raster, Rgb};
///
/// // Left half red, right half blue
/// let raster = Raster::from_fn(4, 2, |x, _| {
///     if x < 2 { Rgb::new(255, 0, 0) } else { Rgb::new(0, 0, 255) }
/// });
///
/// let sampler = GridSampler::new(GridSpec::new(2, 1)?, 4, 2)?;
/// let cells = sampler.sample(&raster)?;
///
/// assert_eq!(cells.len(), 2);
/// assert_eq!(cells[0].hex(), "#ff0000");
/// assert_eq!(cells[1].hex(), "#0000ff");
/// # Ok::<(), cell_grid::GridError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridSampler {
    spec: GridSpec,
    width: u32,
    height: u32,
}

impl GridSampler {
    /// Create a sampler for an image of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyImage`] if either dimension is zero.
    /// A grid finer than the image is not rejected here; it surfaces as
    /// [`GridError::EmptyCell`] from [`GridSampler::sample`], or can be
    /// checked upfront with [`GridSampler::first_empty_cell`].
    pub fn new(spec: GridSpec, width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyImage);
        }
        Ok(Self {
            spec,
            width,
            height,
        })
    }

    #[inline]
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Image `(width, height)` this sampler was built for.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Nominal cell width in pixels (`width / columns`).
    pub fn cell_width(&self) -> f64 {
        self.width as f64 / self.spec.columns() as f64
    }

    /// Nominal cell height in pixels (`height / rows`).
    pub fn cell_height(&self) -> f64 {
        self.height as f64 / self.spec.rows() as f64
    }

    /// Geometry of the cell at column `x`, row `z`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= columns` or `z >= rows`.
    pub fn cell(&self, x: u32, z: u32) -> CellRect {
        assert!(
            x < self.spec.columns() && z < self.spec.rows(),
            "cell ({x}, {z}) out of range for {}x{} grid",
            self.spec.columns(),
            self.spec.rows()
        );
        let edge = self.spec.edge();
        let (x_start, x_end) = span(x, self.spec.columns(), self.width, edge);
        let (z_start, z_end) = span(z, self.spec.rows(), self.height, edge);
        CellRect {
            x,
            z,
            x_start,
            x_end,
            z_start,
            z_end,
        }
    }

    /// All cells in row-major order (Grid_Z outer, Grid_X inner).
    pub fn cells(&self) -> impl Iterator<Item = CellRect> + '_ {
        let columns = self.spec.columns();
        (0..self.spec.rows()).flat_map(move |z| (0..columns).map(move |x| self.cell(x, z)))
    }

    /// First cell (in row-major order) that covers no pixels, if any.
    pub fn first_empty_cell(&self) -> Option<CellRect> {
        self.cells().find(CellRect::is_empty)
    }

    /// Frequency count of the pixels inside `rect`, scanned row by row.
    pub fn histogram(&self, raster: &Raster, rect: &CellRect) -> ColorHistogram {
        let mut histogram = ColorHistogram::new();
        for z in rect.z_start..rect.z_end {
            histogram.add_all(raster.row_span(z, rect.x_start, rect.x_end));
        }
        histogram
    }

    /// Reduce every cell of `raster` to its dominant color.
    ///
    /// Returns exactly `columns * rows` entries in row-major order.
    ///
    /// # Errors
    ///
    /// - [`GridError::DimensionMismatch`] if the raster size differs from the
    ///   size the sampler was built for.
    /// - [`GridError::EmptyCell`] for the first cell that covers no pixels.
    pub fn sample(&self, raster: &Raster) -> Result<Vec<CellColor>, GridError> {
        if raster.dimensions() != self.dimensions() {
            return Err(GridError::DimensionMismatch {
                expected: self.dimensions(),
                actual: raster.dimensions(),
            });
        }

        let mut out = Vec::with_capacity(self.spec.cell_count());
        for rect in self.cells() {
            let histogram = self.histogram(raster, &rect);
            let (color, count) = histogram
                .mode()
                .ok_or(GridError::EmptyCell { x: rect.x, z: rect.z })?;
            out.push(CellColor {
                x: rect.x,
                z: rect.z,
                color,
                count,
                pixels: histogram.total(),
                distinct: histogram.len() as u32,
            });
        }
        Ok(out)
    }
}

/// Pixel range `[start, end)` of cell `index` out of `count` along an axis of
/// `extent` pixels.
fn span(index: u32, count: u32, extent: u32, edge: EdgePolicy) -> (u32, u32) {
    let (index, count, extent) = (index as u64, count as u64, extent as u64);
    let start = index * extent / count;
    let end = match edge {
        // floor(start + extent / count) with an integral start
        EdgePolicy::Truncate => start + extent / count,
        EdgePolicy::Cover => (index + 1) * extent / count,
    };
    (start as u32, end.min(extent) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(columns: u32, rows: u32, width: u32, height: u32, edge: EdgePolicy) -> GridSampler {
        GridSampler::new(GridSpec::new(columns, rows).unwrap().with_edge(edge), width, height)
            .unwrap()
    }

    #[test]
    fn test_span_even_division() {
        assert_eq!(span(0, 4, 8, EdgePolicy::Truncate), (0, 2));
        assert_eq!(span(3, 4, 8, EdgePolicy::Truncate), (6, 8));
        assert_eq!(span(3, 4, 8, EdgePolicy::Cover), (6, 8));
    }

    #[test]
    fn test_span_truncate_drops_trailing_pixels() {
        // 10 px / 3 cells: nominal 3.33 px, every cell 3 px wide
        assert_eq!(span(0, 3, 10, EdgePolicy::Truncate), (0, 3));
        assert_eq!(span(1, 3, 10, EdgePolicy::Truncate), (3, 6));
        assert_eq!(span(2, 3, 10, EdgePolicy::Truncate), (6, 9));
    }

    #[test]
    fn test_span_cover_reaches_edge() {
        assert_eq!(span(0, 3, 10, EdgePolicy::Cover), (0, 3));
        assert_eq!(span(1, 3, 10, EdgePolicy::Cover), (3, 6));
        assert_eq!(span(2, 3, 10, EdgePolicy::Cover), (6, 10));
    }

    #[test]
    fn test_span_grid_finer_than_image() {
        // 3 px / 4 cells: truncate cells are all empty
        assert_eq!(span(0, 4, 3, EdgePolicy::Truncate), (0, 0));
        // cover leaves exactly one empty cell
        let empty = (0..4)
            .map(|i| span(i, 4, 3, EdgePolicy::Cover))
            .filter(|(s, e)| s == e)
            .count();
        assert_eq!(empty, 1);
    }

    #[test]
    fn test_new_rejects_empty_image() {
        let spec = GridSpec::new(2, 2).unwrap();
        assert_eq!(
            GridSampler::new(spec, 0, 10).unwrap_err(),
            GridError::EmptyImage
        );
        assert_eq!(
            GridSampler::new(spec, 10, 0).unwrap_err(),
            GridError::EmptyImage
        );
    }

    #[test]
    fn test_cells_row_major_order() {
        let s = sampler(3, 2, 6, 4, EdgePolicy::Truncate);
        let keys: Vec<(u32, u32)> = s.cells().map(|c| (c.x, c.z)).collect();
        assert_eq!(keys, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_cell_geometry() {
        let s = sampler(3, 2, 6, 4, EdgePolicy::Truncate);
        let cell = s.cell(2, 1);
        assert_eq!((cell.x_start, cell.x_end), (4, 6));
        assert_eq!((cell.z_start, cell.z_end), (2, 4));
        assert_eq!(cell.pixel_count(), 4);
        assert_eq!(s.cell_width(), 2.0);
        assert_eq!(s.cell_height(), 2.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_cell_out_of_range_panics() {
        let s = sampler(3, 2, 6, 4, EdgePolicy::Truncate);
        let _ = s.cell(3, 0);
    }

    #[test]
    fn test_sample_rejects_mismatched_raster() {
        let s = sampler(2, 2, 4, 4, EdgePolicy::Truncate);
        let raster = Raster::from_fn(4, 3, |_, _| Rgb::BLACK);
        assert_eq!(
            s.sample(&raster).unwrap_err(),
            GridError::DimensionMismatch {
                expected: (4, 4),
                actual: (4, 3)
            }
        );
    }

    #[test]
    fn test_sample_degenerate_grid_fails() {
        let s = sampler(5, 1, 3, 3, EdgePolicy::Truncate);
        let raster = Raster::from_fn(3, 3, |_, _| Rgb::WHITE);
        assert_eq!(
            s.sample(&raster).unwrap_err(),
            GridError::EmptyCell { x: 0, z: 0 }
        );
        assert!(s.first_empty_cell().is_some());
    }

    #[test]
    fn test_sample_records_counts() {
        let s = sampler(1, 1, 3, 1, EdgePolicy::Truncate);
        let raster = Raster::from_fn(3, 1, |x, _| if x == 1 { Rgb::BLACK } else { Rgb::WHITE });
        let cells = s.sample(&raster).unwrap();

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].color, Rgb::WHITE);
        assert_eq!(cells[0].count, 2);
        assert_eq!(cells[0].pixels, 3);
        assert_eq!(cells[0].distinct, 2);
        assert!((cells[0].share() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_truncate_ignores_trailing_column() {
        // 5 px wide, 2 columns: cells are [0,2) and [2,4); column 4 is never read
        let s = sampler(2, 1, 5, 1, EdgePolicy::Truncate);
        let raster = Raster::from_fn(5, 1, |x, _| if x == 4 { Rgb::BLACK } else { Rgb::WHITE });
        let cells = s.sample(&raster).unwrap();
        assert!(cells.iter().all(|c| c.color == Rgb::WHITE));
        assert_eq!(cells.iter().map(|c| c.pixels).sum::<u32>(), 4);
    }

    #[test]
    fn test_cover_reads_trailing_column() {
        let s = sampler(2, 1, 5, 1, EdgePolicy::Cover);
        let raster = Raster::from_fn(5, 1, |x, _| if x >= 3 { Rgb::BLACK } else { Rgb::WHITE });
        let cells = s.sample(&raster).unwrap();
        // second cell is [2,5): one white, two black
        assert_eq!(cells[1].color, Rgb::BLACK);
        assert_eq!(cells.iter().map(|c| c.pixels).sum::<u32>(), 5);
    }
}
