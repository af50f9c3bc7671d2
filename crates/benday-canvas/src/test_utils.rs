//! Test utilities for canvas files
//!
//! Fixture writers that produce canvases with known content.

use std::path::Path;
use std::time::{Duration, SystemTime};

use benday_core::{GlyphGrid, PaddingSpec, Result};
use image::Rgba;

use crate::create::render_grid;
use crate::raster::{create_raster, read_raster, replace_raster};

/// Opaque red, classified as a comment color
pub const COMMENT_COLOR: [u8; 4] = [0xe0, 0x20, 0x20, 0xff];

/// Writes a canvas showing `grid` at `path`.
///
/// The padding is read from the file name, so `path` must follow the
/// `<name>.<pX>x<pY>.by.png` convention.
pub fn write_grid_canvas(path: &Path, grid: &GlyphGrid, unpadded: bool) -> Result<()> {
    let padding = PaddingSpec::from_path(path)?;
    create_raster(path, &render_grid(grid, padding, unpadded)?)
}

/// Overwrites one pixel of an existing canvas.
pub fn set_pixel(path: &Path, x: u32, y: u32, color: [u8; 4]) -> Result<()> {
    let mut image = read_raster(path)?;
    image.put_pixel(x, y, Rgba(color));
    replace_raster(path, &image)
}

/// Marks one pixel with [`COMMENT_COLOR`].
pub fn set_comment_pixel(path: &Path, x: u32, y: u32) -> Result<()> {
    set_pixel(path, x, y, COMMENT_COLOR)
}

/// Moves the modification time of `path` into the past.
///
/// Lets tests exercise the default write debounce without sleeping.
pub fn backdate(path: &Path, age: Duration) -> Result<()> {
    let file = std::fs::OpenOptions::new().write(true).open(path)?;
    file.set_modified(SystemTime::now() - age)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::check_freshness;
    use benday_core::{classify, Shade};
    use tempfile::TempDir;

    #[test]
    fn test_comment_color_is_not_grayscale() {
        assert_eq!(classify(COMMENT_COLOR), Shade::NonGrayscale);
    }

    #[test]
    fn test_backdate_passes_debounce() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.0x2.by.png");
        write_grid_canvas(&path, &GlyphGrid::blank(1, 1), false).unwrap();

        assert!(check_freshness(&path, Duration::from_secs(1)).is_err());
        backdate(&path, Duration::from_secs(5)).unwrap();
        assert!(check_freshness(&path, Duration::from_secs(1)).is_ok());
    }
}
