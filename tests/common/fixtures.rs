//! Test fixtures: synthetic terrameter images.

use image::{Rgb, RgbImage};
use std::path::Path;

/// Quadrant colors as (Grid_X, Grid_Z, hex) for a 2x2 grid
pub const QUADRANTS: [(u32, u32, &str); 4] = [
    (0, 0, "#ff0000"),
    (1, 0, "#00ff00"),
    (0, 1, "#0000ff"),
    (1, 1, "#ffffff"),
];

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Image split into four solid quadrants: red top-left, green top-right,
/// blue bottom-left, white bottom-right
pub fn quadrant_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let left = x < width / 2;
        let top = y < height / 2;
        Rgb(match (left, top) {
            (true, true) => RED,
            (false, true) => GREEN,
            (true, false) => BLUE,
            (false, false) => WHITE,
        })
    })
}

/// Vertical stripes, one color per `stripe` pixels, cycling through `colors`
pub fn striped_image(width: u32, height: u32, stripe: u32, colors: &[[u8; 3]]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        Rgb(colors[(x / stripe) as usize % colors.len()])
    })
}

/// Save an image as PNG, panicking on failure
pub fn save_png(img: &RgbImage, path: &Path) {
    img.save(path)
        .unwrap_or_else(|e| panic!("Failed to save {}: {e}", path.display()));
}
