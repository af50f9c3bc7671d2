//! Switching a canvas between the padded and unpadded layouts

use std::path::Path;

use benday_core::prelude::*;
use benday_core::{raster_size, CanvasMeasure, PaddingSpec, PatternLayout};
use benday_core::{CELL_HEIGHT, CELL_WIDTH};
use image::RgbaImage;

use crate::canvas::{measure_rewritten, Canvas};
use crate::guard::{check_freshness, WritePolicy};
use crate::pattern::{clear_guard, paint_gaps};
use crate::raster::replace_raster;

/// Rewrite the canvas at `path` in the other layout.
///
/// Returns the geometry of the rewritten raster. The file is left alone
/// when the new raster would not read back in the other layout with the
/// same cell counts.
pub fn toggle_padding(path: &Path, policy: &WritePolicy) -> Result<CanvasMeasure> {
    check_freshness(path, policy.min_interval)?;

    let canvas = Canvas::open(path)?;
    let before = canvas.measure;
    let toggled = toggled_image(&canvas.image, &before, canvas.padding)?;
    let after = measure_rewritten(
        &toggled,
        canvas.padding,
        !before.unpadded,
        (before.cells_x, before.cells_y),
    )?;

    replace_raster(path, &toggled)?;

    info!(
        "Toggled {} to {} layout",
        path.display(),
        if after.unpadded { "unpadded" } else { "padded" }
    );
    Ok(after)
}

/// Copy every dot block of `image` into a raster laid out in the other mode.
///
/// Dot pixels are copied verbatim, comment colors included. Gaps and the
/// guard are regenerated.
pub fn toggled_image(
    image: &RgbaImage,
    before: &CanvasMeasure,
    padding: PaddingSpec,
) -> Result<RgbaImage> {
    let unpadded = !before.unpadded;
    let (width, height) = raster_size(before.cells_x, before.cells_y, padding, unpadded)?;
    let layout = PatternLayout::new(width, height, padding, unpadded);

    let mut out = RgbaImage::new(width, height);
    for cell_y in 0..before.cells_y {
        for cell_x in 0..before.cells_x {
            let (src_x, src_y) = before.cell_origin(cell_x, cell_y);
            let (dst_x, dst_y) = (cell_x * layout.cell_width, cell_y * layout.cell_height);

            for dy in 0..CELL_HEIGHT {
                for dx in 0..CELL_WIDTH {
                    let pixel = *image.get_pixel(src_x + dx, src_y + dy);
                    out.put_pixel(dst_x + dx, dst_y + dy, pixel);
                }
            }
        }
    }

    if unpadded {
        clear_guard(&mut out);
    } else {
        paint_gaps(&mut out, &layout);
    }

    Ok(out)
}
