//! A canvas file loaded and measured

use std::path::{Path, PathBuf};

use benday_core::prelude::*;
use benday_core::{
    classify, dot_index, encode_cell, measure, CanvasMeasure, GlyphGrid, PaddingSpec, CELL_HEIGHT,
    CELL_WIDTH,
};
use image::RgbaImage;

use crate::raster::{decode_png, read_raster_bytes};

/// Raster, padding and geometry of one canvas file at one point in time.
///
/// Never cached: the file can change between calls.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub path: PathBuf,
    pub padding: PaddingSpec,
    pub image: RgbaImage,
    pub measure: CanvasMeasure,
}

impl Canvas {
    /// Parse the file name, decode the raster and measure it.
    pub fn open(path: &Path) -> Result<Self> {
        let padding = PaddingSpec::from_path(path)?;
        let bytes = read_raster_bytes(path)?;
        Self::from_png(path, padding, &bytes)
    }

    /// Decode and measure PNG `bytes` already read from `path`.
    pub fn from_png(path: &Path, padding: PaddingSpec, bytes: &[u8]) -> Result<Self> {
        let image = decode_png(bytes)?;
        let measure = measure(image.width(), image.height(), padding)?;

        debug!(
            "Opened {}: {}x{} cells, padding {}, unpadded={}",
            path.display(),
            measure.cells_x,
            measure.cells_y,
            padding,
            measure.unpadded
        );

        Ok(Self {
            path: path.to_path_buf(),
            padding,
            image,
            measure,
        })
    }

    pub fn decode(&self) -> GlyphGrid {
        decode_image(&self.image, &self.measure)
    }
}

/// Read the glyph grid stored in the canvas at `path`
pub fn decode_canvas(path: &Path) -> Result<GlyphGrid> {
    Ok(Canvas::open(path)?.decode())
}

/// Measure a rewritten raster and check it reads back as it was built.
///
/// Measuring prefers the padded layout, so some padding specs make a new
/// unpadded raster look padded, or change its cell counts. Such a raster
/// is rejected with [`Error::AmbiguousLayout`] before it reaches the file.
pub fn measure_rewritten(
    image: &RgbaImage,
    padding: PaddingSpec,
    unpadded: bool,
    (cells_x, cells_y): (u32, u32),
) -> Result<CanvasMeasure> {
    let after = measure(image.width(), image.height(), padding)?;

    if after.unpadded != unpadded || (after.cells_x, after.cells_y) != (cells_x, cells_y) {
        warn!(
            "{}x{} px raster reads as {}x{} cells (unpadded={}), expected {}x{} (unpadded={})",
            image.width(),
            image.height(),
            after.cells_x,
            after.cells_y,
            after.unpadded,
            cells_x,
            cells_y,
            unpadded
        );
        return Err(Error::AmbiguousLayout {
            unpadded,
            cells_x,
            cells_y,
        });
    }

    Ok(after)
}

/// Sample every cell's eight dots and pack them into glyphs
pub fn decode_image(image: &RgbaImage, measure: &CanvasMeasure) -> GlyphGrid {
    GlyphGrid::from_fn(
        measure.cells_x as usize,
        measure.cells_y as usize,
        |cell_x, cell_y| {
            let (origin_x, origin_y) = measure.cell_origin(cell_x as u32, cell_y as u32);
            let mut mask = 0u8;

            for dy in 0..CELL_HEIGHT {
                for dx in 0..CELL_WIDTH {
                    let sample = image.get_pixel(origin_x + dx, origin_y + dy).0;
                    if classify(sample).is_shaded() {
                        mask |= 1 << dot_index(dx, dy);
                    }
                }
            }

            encode_cell(mask)
        },
    )
}
