//! New canvas files: blank ones and ones rendered from a glyph grid

use std::path::{Path, PathBuf};

use benday_core::prelude::*;
use benday_core::{
    raster_size, GlyphGrid, PaddingSpec, CELL_HEIGHT, CELL_WIDTH, INK, MAX_CELLS,
};
use image::{Rgba, RgbaImage};

use crate::pattern::default_canvas;
use crate::raster::create_raster;

/// Cell counts and padding for a new canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasRequest {
    /// File name prefix in front of `.<pX>x<pY>.by.png`
    pub prefix: String,
    pub cells_x: u32,
    pub cells_y: u32,
    pub padding: PaddingSpec,
}

impl CanvasRequest {
    pub fn new(prefix: impl Into<String>, cells_x: u32, cells_y: u32, padding: PaddingSpec) -> Self {
        Self {
            prefix: prefix.into(),
            cells_x,
            cells_y,
            padding,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_prefix(&self.prefix)?;
        validate_cells("width", self.cells_x)?;
        validate_cells("height", self.cells_y)?;
        self.padding.validate()
    }

    /// Destination inside `dir`
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        self.padding.canvas_path(dir, &self.prefix)
    }
}

fn validate_cells(field: &str, cells: u32) -> Result<()> {
    if cells == 0 {
        return Err(Error::invalid_input(field, "Number must be greater than zero."));
    }
    if cells > MAX_CELLS {
        return Err(Error::invalid_input(
            field,
            format!("Number must be at most {}.", MAX_CELLS),
        ));
    }
    Ok(())
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(Error::invalid_input("name", "Name must not be empty."));
    }
    if prefix.contains(['/', '\\']) {
        return Err(Error::invalid_input("name", "Name must not contain a path separator."));
    }
    Ok(())
}

/// Create a padded canvas filled with the default pattern.
///
/// Refuses to overwrite an existing file.
pub fn create_canvas(dir: &Path, request: &CanvasRequest) -> Result<PathBuf> {
    request.validate()?;

    let path = request.path_in(dir);
    let (width, height) = raster_size(request.cells_x, request.cells_y, request.padding, false)?;
    let image = default_canvas(width, height, request.padding, false);

    create_raster(&path, &image)?;

    info!(
        "Created {} ({}x{} cells, {}x{} px)",
        path.display(),
        request.cells_x,
        request.cells_y,
        width,
        height
    );
    Ok(path)
}

/// Create a padded canvas showing `grid`, named `<prefix>.<pX>x<pY>.by.png`.
pub fn import_canvas(
    dir: &Path,
    prefix: &str,
    grid: &GlyphGrid,
    padding: PaddingSpec,
) -> Result<PathBuf> {
    validate_prefix(prefix)?;
    padding.validate()?;

    let path = padding.canvas_path(dir, prefix);
    let image = render_grid(grid, padding, false)?;

    create_raster(&path, &image)?;

    info!(
        "Imported {}x{} glyphs into {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(path)
}

/// Default pattern with every set dot of `grid` painted in ink
pub fn render_grid(grid: &GlyphGrid, padding: PaddingSpec, unpadded: bool) -> Result<RgbaImage> {
    let cells_x = grid_cells("width", grid.width())?;
    let cells_y = grid_cells("height", grid.height())?;
    let (width, height) = raster_size(cells_x, cells_y, padding, unpadded)?;
    let mut image = default_canvas(width, height, padding, unpadded);

    let (stride_x, stride_y) = if unpadded {
        (CELL_WIDTH, CELL_HEIGHT)
    } else {
        (CELL_WIDTH + padding.x, CELL_HEIGHT + padding.y)
    };

    for (y, row) in grid.rows().iter().enumerate() {
        for x in 0..row.len() {
            let Some(mask) = grid.mask_at(x, y) else {
                continue;
            };

            for bit in 0..8u32 {
                if mask & (1 << bit) == 0 {
                    continue;
                }
                let px = x as u32 * stride_x + bit % CELL_WIDTH;
                let py = y as u32 * stride_y + bit / CELL_WIDTH;
                image.put_pixel(px, py, Rgba(INK));
            }
        }
    }

    Ok(image)
}

fn grid_cells(field: &str, glyphs: usize) -> Result<u32> {
    let cells = u32::try_from(glyphs).unwrap_or(u32::MAX);
    validate_cells(field, cells)?;
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{decode_canvas, Canvas};
    use benday_core::{ErrorKind, PATTERN_GRAY, PATTERN_WHITE, TRANSPARENT};
    use tempfile::TempDir;

    #[test]
    fn test_create_canvas() {
        let temp = TempDir::new().unwrap();
        let request = CanvasRequest::new("sprite", 4, 3, PaddingSpec::new(0, 2));

        let path = create_canvas(temp.path(), &request).unwrap();
        assert_eq!(path.file_name().unwrap(), "sprite.0x2.by.png");

        let canvas = Canvas::open(&path).unwrap();
        assert!(!canvas.measure.unpadded);
        assert_eq!((canvas.measure.cells_x, canvas.measure.cells_y), (4, 3));
        assert_eq!(canvas.image.get_pixel(0, 0).0, PATTERN_WHITE);
        assert_eq!(canvas.image.get_pixel(2, 0).0, PATTERN_GRAY);
        assert_eq!(canvas.image.get_pixel(0, 4).0, TRANSPARENT);
        assert_eq!(canvas.decode(), GlyphGrid::blank(4, 3));
    }

    #[test]
    fn test_create_refuses_existing() {
        let temp = TempDir::new().unwrap();
        let request = CanvasRequest::new("sprite", 1, 1, PaddingSpec::default());

        create_canvas(temp.path(), &request).unwrap();
        let err = create_canvas(temp.path(), &request).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.to_string(), "File already exists.");
    }

    #[test]
    fn test_create_validation() {
        let temp = TempDir::new().unwrap();

        let err = create_canvas(temp.path(), &CanvasRequest::new("a", 0, 2, PaddingSpec::default()))
            .unwrap_err();
        assert!(err.to_string().contains("Number must be greater than zero."));

        let err = create_canvas(temp.path(), &CanvasRequest::new("", 1, 1, PaddingSpec::default()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);

        assert!(CanvasRequest::new("a/b", 1, 1, PaddingSpec::default())
            .validate()
            .is_err());
    }

    #[test]
    fn test_create_rejects_oversized_requests() {
        let temp = TempDir::new().unwrap();

        let request = CanvasRequest::new("huge", 3_000_000_000, 1, PaddingSpec::default());
        let err = create_canvas(temp.path(), &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(
            err.to_string(),
            "Invalid input on width: Number must be at most 4096."
        );

        let request = CanvasRequest::new("wide", 1, 1, PaddingSpec::new(u32::MAX, 0));
        let err = create_canvas(temp.path(), &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);

        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_import_rejects_oversized_padding() {
        let temp = TempDir::new().unwrap();
        let grid = GlyphGrid::blank(1, 1);

        let err = import_canvas(temp.path(), "dots", &grid, PaddingSpec::new(0, u32::MAX))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_import_canvas_round_trip() {
        let temp = TempDir::new().unwrap();
        let grid = GlyphGrid::parse("⠁⠂⠄⡀\n⠈⠐⠠⢀\n⣿⠀⠛⣤").unwrap();

        let path = import_canvas(temp.path(), "dots", &grid, PaddingSpec::new(2, 1)).unwrap();

        assert_eq!(path.file_name().unwrap(), "dots.2x1.by.png");
        assert_eq!(decode_canvas(&path).unwrap(), grid);
    }

    #[test]
    fn test_import_refuses_existing() {
        let temp = TempDir::new().unwrap();
        let grid = GlyphGrid::blank(1, 1);

        import_canvas(temp.path(), "dots", &grid, PaddingSpec::default()).unwrap();
        let err = import_canvas(temp.path(), "dots", &grid, PaddingSpec::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_render_places_ink() {
        let grid = GlyphGrid::parse("⢀").unwrap();
        let image = render_grid(&grid, PaddingSpec::new(0, 0), true).unwrap();

        assert_eq!(image.dimensions(), (3, 5));
        assert_eq!(image.get_pixel(1, 3).0, INK);
        assert_eq!(image.get_pixel(0, 3).0, PATTERN_WHITE);
    }
}
