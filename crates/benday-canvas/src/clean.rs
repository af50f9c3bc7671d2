//! Normalizing stray marks on a canvas
//!
//! Every dot sample is re-classified. Shaded samples become [`INK`],
//! everything else goes back to the default pattern, except non-grayscale
//! comment pixels, which survive unless the caller asks for them to go.

use std::path::Path;

use benday_core::prelude::*;
use benday_core::{classify, CanvasMeasure, PatternLayout, Shade, CELL_HEIGHT, CELL_WIDTH, INK};
use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;
use crate::guard::{check_freshness, WritePolicy};
use crate::pattern::{clear_guard, paint_gaps};
use crate::raster::replace_raster;

/// Clean the canvas at `path` in place.
pub fn clean_canvas(path: &Path, remove_comments: bool, policy: &WritePolicy) -> Result<CanvasMeasure> {
    check_freshness(path, policy.min_interval)?;

    let mut canvas = Canvas::open(path)?;
    clean_image(&mut canvas.image, &canvas.measure, remove_comments);

    replace_raster(path, &canvas.image)?;

    info!(
        "Cleaned {} (comments {})",
        path.display(),
        if remove_comments { "removed" } else { "kept" }
    );
    Ok(canvas.measure)
}

/// Apply the cleaning rules to every dot sample of `image`.
pub fn clean_image(image: &mut RgbaImage, measure: &CanvasMeasure, remove_comments: bool) {
    let layout = PatternLayout::from_measure(measure);

    for cell_y in 0..measure.cells_y {
        for cell_x in 0..measure.cells_x {
            let (origin_x, origin_y) = measure.cell_origin(cell_x, cell_y);

            for dy in 0..CELL_HEIGHT {
                for dx in 0..CELL_WIDTH {
                    let (x, y) = (origin_x + dx, origin_y + dy);
                    let pixel = image.get_pixel_mut(x, y);

                    match classify(pixel.0) {
                        Shade::Shaded => *pixel = Rgba(INK),
                        Shade::NonGrayscale if !remove_comments => {}
                        _ => *pixel = Rgba(layout.color_at(x, y)),
                    }
                }
            }
        }
    }

    if measure.unpadded {
        clear_guard(image);
    } else {
        paint_gaps(image, &layout);
    }
}
