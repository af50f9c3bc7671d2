//! Canvas geometry recovered from raster dimensions
//!
//! A canvas is stored either *padded* (every cell is `2 + pX` by `4 + pY`
//! pixels, the dot block in the top-left corner and transparent gaps
//! around it) or *unpadded* (cells are packed at 2x4 and a single
//! transparent guard row and column follow the grid). The guard is what
//! tells an unpadded canvas apart from a canvas padded by zero.
//!
//! Nothing marks the mode on disk: [`measure`] tries the padded layout
//! first and falls back to the unpadded one. A raster that fits both is
//! read as padded.

use std::fmt;

use serde::Serialize;

use crate::braille::{CELL_HEIGHT, CELL_WIDTH};
use crate::error::Error;
use crate::padding::PaddingSpec;

/// Largest cell count accepted on either axis of a new or resized canvas
pub const MAX_CELLS: u32 = 4096;

/// Raster axis named in a [`GeometryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Raster dimensions fit neither the padded nor the unpadded layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryError {
    pub axis: Axis,
    /// Cell size the axis had to be a multiple of
    pub divisor: u32,
    /// Raw raster size on that axis, in pixels
    pub measure: u32,
    /// The unpadded layout (size minus one) was the one tested last
    pub unpadded: bool,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minus_one = if self.unpadded { " - 1" } else { "" };
        write!(
            f,
            "Invalid image dimension. Expected {}{} to be divisible by {}, but is instead {} px.",
            self.axis, minus_one, self.divisor, self.measure
        )
    }
}

impl std::error::Error for GeometryError {}

/// How a raster maps onto a glyph grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasMeasure {
    pub image_width: u32,
    pub image_height: u32,
    pub unpadded: bool,

    /// Cells per row
    pub cells_x: u32,
    /// Rows of cells
    pub cells_y: u32,

    /// Pixel stride between cell origins, horizontally
    pub cell_width: u32,
    /// Pixel stride between cell origins, vertically
    pub cell_height: u32,
}

impl CanvasMeasure {
    /// Pixel origin of the cell at `(cell_x, cell_y)`
    #[inline]
    pub fn cell_origin(&self, cell_x: u32, cell_y: u32) -> (u32, u32) {
        (cell_x * self.cell_width, cell_y * self.cell_height)
    }

    /// Width and height of the area covered by cells, guard excluded
    pub fn grid_extent(&self) -> (u32, u32) {
        (
            self.cells_x * self.cell_width,
            self.cells_y * self.cell_height,
        )
    }
}

/// Geometry of a raster of the given size under `padding`.
pub fn measure(
    image_width: u32,
    image_height: u32,
    padding: PaddingSpec,
) -> Result<CanvasMeasure, GeometryError> {
    let mut test_width = image_width;
    let mut test_height = image_height;

    // A padded cell too wide for u32 never fits, so such rasters read as unpadded
    let padded_cell = CELL_WIDTH
        .checked_add(padding.x)
        .zip(CELL_HEIGHT.checked_add(padding.y));
    let (mut cell_width, mut cell_height) = padded_cell.unwrap_or((CELL_WIDTH, CELL_HEIGHT));

    let padded = padded_cell.is_some()
        && test_width % cell_width == 0
        && test_height % cell_height == 0;
    if !padded {
        cell_width = CELL_WIDTH;
        cell_height = CELL_HEIGHT;
        test_width = test_width.saturating_sub(1);
        test_height = test_height.saturating_sub(1);
    }

    if test_width % cell_width != 0 {
        return Err(GeometryError {
            axis: Axis::Width,
            divisor: cell_width,
            measure: image_width,
            unpadded: !padded,
        });
    }

    if test_height % cell_height != 0 {
        return Err(GeometryError {
            axis: Axis::Height,
            divisor: cell_height,
            measure: image_height,
            unpadded: !padded,
        });
    }

    Ok(CanvasMeasure {
        image_width,
        image_height,
        unpadded: !padded,
        cells_x: test_width / cell_width,
        cells_y: test_height / cell_height,
        cell_width,
        cell_height,
    })
}

/// Raster size of a grid of `cells_x` by `cells_y` cells.
///
/// Fails with [`Error::InvalidInput`] when the size does not fit in `u32`.
pub fn raster_size(
    cells_x: u32,
    cells_y: u32,
    padding: PaddingSpec,
    unpadded: bool,
) -> crate::error::Result<(u32, u32)> {
    let axis = |cells: u32, cell: u32, pad: u32| {
        if unpadded {
            cells.checked_mul(cell)?.checked_add(1)
        } else {
            cells.checked_mul(cell.checked_add(pad)?)
        }
    };

    axis(cells_x, CELL_WIDTH, padding.x)
        .zip(axis(cells_y, CELL_HEIGHT, padding.y))
        .ok_or_else(|| Error::invalid_input("size", "Canvas is too large."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_canvas() {
        let m = measure(20, 24, PaddingSpec::new(0, 2)).unwrap();
        assert!(!m.unpadded);
        assert_eq!((m.cells_x, m.cells_y), (10, 4));
        assert_eq!((m.cell_width, m.cell_height), (2, 6));
    }

    #[test]
    fn test_zero_padding_prefers_padded() {
        // 24 is a multiple of 4, so the padded reading wins
        let m = measure(20, 24, PaddingSpec::new(0, 0)).unwrap();
        assert!(!m.unpadded);
        assert_eq!((m.cells_x, m.cells_y), (10, 6));
    }

    #[test]
    fn test_unpadded_canvas() {
        let m = measure(21, 25, PaddingSpec::new(0, 2)).unwrap();
        assert!(m.unpadded);
        assert_eq!((m.cells_x, m.cells_y), (10, 6));
        assert_eq!((m.cell_width, m.cell_height), (2, 4));
    }

    #[test]
    fn test_zero_padding_unpadded_guard() {
        let m = measure(5, 9, PaddingSpec::new(0, 0)).unwrap();
        assert!(m.unpadded);
        assert_eq!((m.cells_x, m.cells_y), (2, 2));
    }

    #[test]
    fn test_height_mismatch() {
        let err = measure(21, 26, PaddingSpec::new(0, 2)).unwrap_err();
        assert_eq!(err.axis, Axis::Height);
        assert_eq!(err.divisor, 4);
        assert_eq!(err.measure, 26);
        assert!(err.unpadded);
        assert_eq!(
            err.to_string(),
            "Invalid image dimension. Expected height - 1 to be divisible by 4, but is instead 26 px."
        );
    }

    #[test]
    fn test_width_checked_first() {
        let err = measure(20, 24, PaddingSpec::new(0, 3)).unwrap_err();
        assert_eq!(err.axis, Axis::Width);
        assert_eq!(err.divisor, 2);
        assert_eq!(
            err.to_string(),
            "Invalid image dimension. Expected width - 1 to be divisible by 2, but is instead 20 px."
        );
    }

    #[test]
    fn test_raster_size_measures_back() {
        for (px, py) in [(0, 0), (0, 2), (3, 1), (1, 5)] {
            let padding = PaddingSpec::new(px, py);
            for (cx, cy) in [(1, 1), (3, 2), (7, 5)] {
                for unpadded in [false, true] {
                    let (w, h) = raster_size(cx, cy, padding, unpadded).unwrap();
                    let m = measure(w, h, padding).unwrap();
                    assert_eq!((m.cells_x, m.cells_y), (cx, cy));
                    assert_eq!(m.unpadded, unpadded, "padding {px}x{py}, cells {cx}x{cy}");
                }
            }
        }
    }

    #[test]
    fn test_huge_padding_does_not_overflow() {
        let m = measure(11, 9, PaddingSpec::new(u32::MAX, 0)).unwrap();
        assert!(m.unpadded);
        assert_eq!((m.cells_x, m.cells_y), (5, 2));

        assert!(measure(10, 10, PaddingSpec::new(u32::MAX, 0)).is_err());
        assert!(measure(10, 10, PaddingSpec::new(0, u32::MAX - 1)).is_err());
    }

    #[test]
    fn test_raster_size_overflow() {
        let err = raster_size(3_000_000_000, 1, PaddingSpec::default(), false).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Input);

        assert!(raster_size(1, 1, PaddingSpec::new(u32::MAX, 0), false).is_err());
        assert!(raster_size(u32::MAX / 2 + 1, 1, PaddingSpec::default(), true).is_err());
        assert_eq!(
            raster_size(MAX_CELLS, MAX_CELLS, PaddingSpec::new(2, 2), false).unwrap(),
            (4 * MAX_CELLS, 6 * MAX_CELLS)
        );
    }
}
