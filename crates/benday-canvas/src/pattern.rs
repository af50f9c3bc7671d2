//! Painting the default pattern onto RGBA rasters

use benday_core::{PaddingSpec, PatternLayout, TRANSPARENT};
use image::{Rgba, RgbaImage};

/// Fresh raster filled with the default checkerboard
pub fn default_canvas(width: u32, height: u32, padding: PaddingSpec, unpadded: bool) -> RgbaImage {
    let layout = PatternLayout::new(width, height, padding, unpadded);
    RgbaImage::from_fn(width, height, |x, y| Rgba(layout.color_at(x, y)))
}

/// Reset every gap pixel between dot blocks to the pattern's gap color
pub fn paint_gaps(image: &mut RgbaImage, layout: &PatternLayout) {
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if layout.is_gap(x, y) {
            *pixel = Rgba(layout.color_at(x, y));
        }
    }
}

/// Clear the trailing guard row and column of an unpadded raster
pub fn clear_guard(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    for y in 0..height {
        image.put_pixel(width - 1, y, Rgba(TRANSPARENT));
    }
    for x in 0..width {
        image.put_pixel(x, height - 1, Rgba(TRANSPARENT));
    }
}
