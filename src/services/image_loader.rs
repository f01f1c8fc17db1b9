use cell_grid::Raster;
use image::DynamicImage;
use std::path::Path;

use crate::error::ImageError;

/// Open a raster image and normalize it to 8-bit RGB.
///
/// Any format the `image` crate can decode is accepted. Alpha is dropped,
/// grayscale is expanded to three channels, 16-bit channels are reduced to
/// 8 bits.
pub fn load_raster(path: &Path) -> Result<Raster, ImageError> {
    let img = image::open(path).map_err(|source| ImageError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(ImageError::Empty {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded image"
    );

    raster_from_image(&img)
}

/// Convert an already decoded image to an RGB raster
pub fn raster_from_image(img: &DynamicImage) -> Result<Raster, ImageError> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Raster::from_rgb_bytes(rgb.as_raw(), width, height)?)
}
