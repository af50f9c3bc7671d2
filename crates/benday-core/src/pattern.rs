//! Default canvas pattern
//!
//! Fresh cells are painted as a checkerboard of white and light gray dot
//! blocks so the grid is visible in an image editor. Gaps between blocks
//! and the unpadded guard row/column stay transparent.

use crate::braille::{CELL_HEIGHT, CELL_WIDTH};
use crate::measure::CanvasMeasure;
use crate::padding::PaddingSpec;

pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
pub const PATTERN_WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
pub const PATTERN_GRAY: [u8; 4] = [0xcc, 0xcc, 0xcc, 0xff];

/// Color every shaded dot is normalized to
pub const INK: [u8; 4] = [0x33, 0x33, 0x33, 0xff];

/// Cell stride and painted extent of a default-pattern raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Pixels past this column are left transparent
    pub extent_width: u32,
    /// Pixels past this row are left transparent
    pub extent_height: u32,
}

impl PatternLayout {
    /// Layout for a raster of the given size.
    ///
    /// Unpadded rasters pack cells at 2x4 and reserve the last row and
    /// column as the transparent guard.
    pub fn new(image_width: u32, image_height: u32, padding: PaddingSpec, unpadded: bool) -> Self {
        if unpadded {
            Self {
                cell_width: CELL_WIDTH,
                cell_height: CELL_HEIGHT,
                extent_width: image_width.saturating_sub(1),
                extent_height: image_height.saturating_sub(1),
            }
        } else {
            Self {
                cell_width: CELL_WIDTH.saturating_add(padding.x),
                cell_height: CELL_HEIGHT.saturating_add(padding.y),
                extent_width: image_width,
                extent_height: image_height,
            }
        }
    }

    pub fn from_measure(measure: &CanvasMeasure) -> Self {
        let (extent_width, extent_height) = measure.grid_extent();
        Self {
            cell_width: measure.cell_width,
            cell_height: measure.cell_height,
            extent_width,
            extent_height,
        }
    }

    /// Default color of the pixel at `(x, y)`
    pub fn color_at(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.extent_width || y >= self.extent_height {
            return TRANSPARENT;
        }

        if x % self.cell_width >= CELL_WIDTH || y % self.cell_height >= CELL_HEIGHT {
            return TRANSPARENT;
        }

        let cell_x = x / self.cell_width;
        let cell_y = y / self.cell_height;
        if (cell_x + cell_y) % 2 == 0 {
            PATTERN_WHITE
        } else {
            PATTERN_GRAY
        }
    }

    /// Whether `(x, y)` is a gap or guard pixel rather than a dot
    pub fn is_gap(&self, x: u32, y: u32) -> bool {
        self.color_at(x, y) == TRANSPARENT
    }
}
