use cell_grid::Rgb;
use std::collections::HashMap;
use std::io::Cursor;

use crate::error::RenderError;
use crate::models::PivotedGrid;

/// Largest preview edge in pixels
pub const MAX_PREVIEW_SIDE: u64 = 32_768;

/// Render the pivoted grid as a PNG where every grid cell is a
/// `cell_px` x `cell_px` block of its dominant color.
///
/// Grids with at most 256 distinct colors are written as indexed PNG at the
/// smallest bit depth that fits the palette, others as 8-bit RGB.
pub fn render_preview_png(grid: &PivotedGrid, cell_px: u32) -> Result<Vec<u8>, RenderError> {
    let width = grid.columns() as u64 * cell_px as u64;
    let height = grid.rows() as u64 * cell_px as u64;
    if cell_px == 0 || width > MAX_PREVIEW_SIDE || height > MAX_PREVIEW_SIDE {
        return Err(RenderError::PreviewTooLarge { width, height });
    }
    let (width, height) = (width as u32, height as u32);

    let (palette, indices) = index_cells(grid);

    let png_bytes = if palette.len() <= 256 {
        let bits: u8 = match palette.len() {
            0..=2 => 1,
            3..=4 => 2,
            5..=16 => 4,
            _ => 8,
        };
        let pixels = scale_up(&indices, grid.columns(), cell_px);
        let packed = if bits == 8 {
            pixels
        } else {
            pack_nbits(&pixels, width, bits)
        };
        let plte: Vec<u8> = palette.iter().flat_map(|c| c.to_bytes()).collect();
        let bit_depth = match bits {
            1 => png::BitDepth::One,
            2 => png::BitDepth::Two,
            4 => png::BitDepth::Four,
            _ => png::BitDepth::Eight,
        };
        encode_png(
            width,
            height,
            png::ColorType::Indexed,
            bit_depth,
            Some(plte.as_slice()),
            &packed,
        )?
    } else {
        let colors: Vec<Rgb> = grid.iter_cells().map(|(_, _, c)| c).collect();
        let rgb: Vec<u8> = scale_up(&colors, grid.columns(), cell_px)
            .into_iter()
            .flat_map(|c| c.to_bytes())
            .collect();
        encode_png(
            width,
            height,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            &rgb,
        )?
    };

    tracing::debug!(
        width,
        height,
        colors = palette.len(),
        bytes = png_bytes.len(),
        "Encoded preview"
    );

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

/// Palette in first-seen order plus one palette index per cell (row-major).
/// Indices are only meaningful while the palette has at most 256 entries.
fn index_cells(grid: &PivotedGrid) -> (Vec<Rgb>, Vec<u8>) {
    let mut palette = Vec::new();
    let mut lookup: HashMap<Rgb, usize> = HashMap::new();
    let mut indices = Vec::with_capacity(grid.columns() as usize * grid.rows() as usize);

    for (_, _, color) in grid.iter_cells() {
        let idx = *lookup.entry(color).or_insert_with(|| {
            palette.push(color);
            palette.len() - 1
        });
        indices.push(idx as u8);
    }

    (palette, indices)
}

/// Expand a row-major cell table so every cell becomes a `cell_px` square
fn scale_up<T: Copy>(cells: &[T], columns: u32, cell_px: u32) -> Vec<T> {
    let px = cell_px as usize;
    let mut out = Vec::with_capacity(cells.len() * px * px);
    for row in cells.chunks(columns as usize) {
        for _ in 0..px {
            for &cell in row {
                out.extend(std::iter::repeat(cell).take(px));
            }
        }
    }
    out
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack palette indices into 1, 2 or 4 bit PNG rows. Each row starts on a
/// byte boundary.
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let per_byte = 8 / bits as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(indices.len().div_ceil(per_byte));

    for row in indices.chunks(width as usize) {
        for chunk in row.chunks(per_byte) {
            let mut byte = 0u8;
            for (i, &idx) in chunk.iter().enumerate() {
                byte |= (idx & mask) << (8 - bits - i as u8 * bits);
            }
            packed.push(byte);
        }
    }

    packed
}
