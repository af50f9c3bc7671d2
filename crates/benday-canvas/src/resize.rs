//! Growing and shrinking a canvas by whole cells

use std::path::Path;

use benday_core::prelude::*;
use benday_core::{raster_size, CanvasMeasure, MAX_CELLS};
use image::{imageops, RgbaImage};

use crate::canvas::{measure_rewritten, Canvas};
use crate::guard::{check_freshness, WritePolicy};
use crate::pattern::default_canvas;
use crate::raster::replace_raster;

/// Result of a [`resize_canvas`] call that reached the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub before: CanvasMeasure,
    pub after: CanvasMeasure,
    /// Deltas actually applied after clamping
    pub applied: (i32, i32),
}

/// Limit a resize so the axis keeps between one and [`MAX_CELLS`] cells
pub fn clamp_resize_delta(cells: u32, delta: i32) -> i32 {
    let floor = 1 - i64::from(cells);
    let ceiling = (i64::from(MAX_CELLS) - i64::from(cells)).max(0);
    i64::from(delta)
        .min(ceiling)
        .max(floor)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Add `delta_x` columns and `delta_y` rows of cells to the canvas at `path`.
///
/// Content stays anchored at the top-left corner; growth appends default
/// cells on the right and bottom, shrinking drops them from there. A zero
/// resize returns `Ok(None)` without touching the file.
pub fn resize_canvas(
    path: &Path,
    delta_x: i32,
    delta_y: i32,
    policy: &WritePolicy,
) -> Result<Option<ResizeOutcome>> {
    if delta_x == 0 && delta_y == 0 {
        return Ok(None);
    }

    check_freshness(path, policy.min_interval)?;

    let canvas = Canvas::open(path)?;
    let before = canvas.measure;

    let applied = (
        clamp_resize_delta(before.cells_x, delta_x),
        clamp_resize_delta(before.cells_y, delta_y),
    );
    if applied != (delta_x, delta_y) {
        warn!(
            "Resize of {} by ({}, {}) clamped to ({}, {})",
            path.display(),
            delta_x,
            delta_y,
            applied.0,
            applied.1
        );
    }
    if applied == (0, 0) {
        return Ok(None);
    }

    let cells = (
        before.cells_x.saturating_add_signed(applied.0),
        before.cells_y.saturating_add_signed(applied.1),
    );
    let resized = resized_image(&canvas, cells, applied)?;
    let after = measure_rewritten(&resized, canvas.padding, before.unpadded, cells)?;

    replace_raster(path, &resized)?;

    info!(
        "Resized {} from {}x{} to {}x{} cells",
        path.display(),
        before.cells_x,
        before.cells_y,
        after.cells_x,
        after.cells_y
    );
    Ok(Some(ResizeOutcome {
        before,
        after,
        applied,
    }))
}

fn resized_image(
    canvas: &Canvas,
    (cells_x, cells_y): (u32, u32),
    (delta_x, delta_y): (i32, i32),
) -> Result<RgbaImage> {
    let before = &canvas.measure;
    let (width, height) = raster_size(cells_x, cells_y, canvas.padding, before.unpadded)?;

    let mut out = if delta_x > 0 || delta_y > 0 {
        default_canvas(width, height, canvas.padding, before.unpadded)
    } else {
        RgbaImage::new(width, height)
    };

    // Overlapping cells, gaps included; the guard is never copied
    let keep_w = cells_x.min(before.cells_x) * before.cell_width;
    let keep_h = cells_y.min(before.cells_y) * before.cell_height;
    let kept = imageops::crop_imm(&canvas.image, 0, 0, keep_w, keep_h).to_image();
    imageops::replace(&mut out, &kept, 0, 0);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::decode_canvas;
    use crate::test_utils::write_grid_canvas;
    use benday_core::{GlyphGrid, BLANK_GLYPH};
    use tempfile::TempDir;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_resize_delta(5, -10), -4);
        assert_eq!(clamp_resize_delta(5, -4), -4);
        assert_eq!(clamp_resize_delta(1, -1), 0);
        assert_eq!(clamp_resize_delta(3, 7), 7);
        assert_eq!(clamp_resize_delta(MAX_CELLS - 2, i32::MAX), 2);
        assert_eq!(clamp_resize_delta(MAX_CELLS + 5, 3), 0);
    }

    #[test]
    fn test_zero_resize_is_noop() {
        let temp = TempDir::new().unwrap();
        // Never opened, so even a missing file is fine
        let path = temp.path().join("missing.0x2.by.png");
        assert!(resize_canvas(&path, 0, 0, &WritePolicy::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_grow_appends_blank_cells() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("art.0x2.by.png");
        let grid = GlyphGrid::parse("⣿⠁\n⠂⢸").unwrap();
        write_grid_canvas(&path, &grid, false).unwrap();

        let outcome = resize_canvas(&path, 1, 2, &WritePolicy::immediate())
            .unwrap()
            .unwrap();
        assert_eq!((outcome.after.cells_x, outcome.after.cells_y), (3, 4));

        let decoded = decode_canvas(&path).unwrap();
        assert_eq!(decoded.get(0, 0), Some('⣿'));
        assert_eq!(decoded.get(1, 1), Some('⢸'));
        assert_eq!(decoded.get(2, 0), Some(BLANK_GLYPH));
        assert_eq!(decoded.get(0, 3), Some(BLANK_GLYPH));
    }

    #[test]
    fn test_grow_then_shrink_restores() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("art.1x1.by.png");
        let grid = GlyphGrid::parse("⠉⠒⠤\n⣀⣿⠀").unwrap();
        write_grid_canvas(&path, &grid, true).unwrap();

        resize_canvas(&path, 2, 3, &WritePolicy::immediate()).unwrap();
        let outcome = resize_canvas(&path, -2, -3, &WritePolicy::immediate())
            .unwrap()
            .unwrap();

        assert!(outcome.after.unpadded);
        assert_eq!(decode_canvas(&path).unwrap(), grid);
    }

    #[test]
    fn test_shrink_is_clamped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("art.0x2.by.png");
        write_grid_canvas(&path, &GlyphGrid::parse("⠁⠂⠄").unwrap(), false).unwrap();

        let outcome = resize_canvas(&path, -5, 0, &WritePolicy::immediate())
            .unwrap()
            .unwrap();

        assert_eq!(outcome.applied, (-2, 0));
        assert_eq!(decode_canvas(&path).unwrap().to_text(), "⠁");
    }

    #[test]
    fn test_resize_refuses_layout_that_reads_back_wrong() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("art.1x1.by.png");
        let grid = GlyphGrid::parse("⠁⠂⠄").unwrap();
        write_grid_canvas(&path, &grid, true).unwrap();

        // Packed, 4x1 cells are 9x5 px, which also reads as 3x1 padded cells
        let err = resize_canvas(&path, 1, 0, &WritePolicy::immediate()).unwrap_err();
        assert!(matches!(
            err,
            Error::AmbiguousLayout {
                unpadded: true,
                cells_x: 4,
                cells_y: 1
            }
        ));

        let canvas = Canvas::open(&path).unwrap();
        assert!(canvas.measure.unpadded);
        assert_eq!(canvas.decode(), grid);
    }

    #[test]
    fn test_fully_clamped_resize_skips_write() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("art.0x2.by.png");
        write_grid_canvas(&path, &GlyphGrid::blank(1, 1), false).unwrap();

        assert!(resize_canvas(&path, -1, -3, &WritePolicy::immediate())
            .unwrap()
            .is_none());
    }
}
