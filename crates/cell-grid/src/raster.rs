//! In-memory RGB raster.

use crate::color::Rgb;
use crate::grid::GridError;

/// An immutable RGB image.
///
/// Stores one [`Rgb`] per pixel in row-major order. `x` runs along the
/// width, `z` (depth in a resistivity cross-section) runs along the height.
///
/// # Example
///
/// ```
/// use cell_grid::{Raster, Rgb};
///
/// let raster = Raster::from_fn(3, 2, |x, _z| {
///     if x == 0 { Rgb::BLACK } else { Rgb::WHITE }
/// });
///
/// assert_eq!(raster.width(), 3);
/// assert_eq!(raster.height(), 2);
/// assert_eq!(raster.pixel(0, 1), Rgb::BLACK);
/// assert_eq!(raster.pixel(2, 1), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Vec<Rgb>,
    width: u32,
    height: u32,
}

impl Raster {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::BufferLength`] if `pixels.len() != width * height`.
    pub fn new(pixels: Vec<Rgb>, width: u32, height: u32) -> Result<Self, GridError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(GridError::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build a raster from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ByteLength`] if the byte count is not
    /// `width * height * 3`.
    pub fn from_rgb_bytes(bytes: &[u8], width: u32, height: u32) -> Result<Self, GridError> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(GridError::ByteLength {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
            .collect();
        Self::new(pixels, width, height)
    }

    /// Build a raster by evaluating `f(x, z)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for z in 0..height {
            for x in 0..width {
                pixels.push(f(x, z));
            }
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns `true` if the raster has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at column `x`, row `z`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, z)` is outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, z: u32) -> Rgb {
        assert!(
            x < self.width && z < self.height,
            "pixel ({x}, {z}) out of bounds for {}x{} raster",
            self.width,
            self.height
        );
        self.pixels[z as usize * self.width as usize + x as usize]
    }

    /// One row of pixels, `x` in `x_start..x_end`.
    #[inline]
    pub(crate) fn row_span(&self, z: u32, x_start: u32, x_end: u32) -> &[Rgb] {
        let row = z as usize * self.width as usize;
        &self.pixels[row + x_start as usize..row + x_end as usize]
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Raster::new(vec![Rgb::BLACK; 5], 2, 3).unwrap_err();
        assert_eq!(
            err,
            GridError::BufferLength {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_from_rgb_bytes_layout() {
        let bytes = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let raster = Raster::from_rgb_bytes(&bytes, 2, 2).unwrap();

        assert_eq!(raster.pixel(0, 0), Rgb::new(255, 0, 0));
        assert_eq!(raster.pixel(1, 0), Rgb::new(0, 255, 0));
        assert_eq!(raster.pixel(0, 1), Rgb::new(0, 0, 255));
        assert_eq!(raster.pixel(1, 1), Rgb::WHITE);
    }

    #[test]
    fn test_from_rgb_bytes_rejects_partial_pixel() {
        let err = Raster::from_rgb_bytes(&[0, 0, 0, 0], 1, 1).unwrap_err();
        assert_eq!(
            err,
            GridError::ByteLength {
                expected: 3,
                actual: 4
            }
        );
        assert_eq!(
            err.to_string(),
            "RGB byte buffer length mismatch: expected 3 bytes, got 4"
        );
    }

    #[test]
    fn test_from_rgb_bytes_short_buffer() {
        let err = Raster::from_rgb_bytes(&[0; 11], 2, 2).unwrap_err();
        assert_eq!(
            err,
            GridError::ByteLength {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let raster = Raster::from_fn(3, 2, |x, z| Rgb::new(x as u8, z as u8, 0));
        let coords: Vec<(u8, u8)> = raster.pixels().iter().map(|p| (p.r, p.g)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_row_span() {
        let raster = Raster::from_fn(4, 2, |x, z| Rgb::new(x as u8, z as u8, 0));
        let span = raster.row_span(1, 1, 3);
        assert_eq!(span, &[Rgb::new(1, 1, 0), Rgb::new(2, 1, 0)]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let raster = Raster::from_fn(2, 2, |_, _| Rgb::BLACK);
        let _ = raster.pixel(2, 0);
    }
}
