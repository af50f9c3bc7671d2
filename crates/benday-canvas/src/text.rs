//! Plain-text braille files

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use benday_core::prelude::*;
use benday_core::GlyphGrid;

use crate::raster::write_new;

/// Write `grid` to a new text file, one line per row.
///
/// Never overwrites: an existing `path` is an [`Error::AlreadyExists`].
pub fn export_text(grid: &GlyphGrid, path: &Path) -> Result<()> {
    write_new(path, grid.to_text().as_bytes())?;
    info!(
        "Exported {}x{} glyphs to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

/// Read and parse a braille text file
pub fn import_text_file(path: &Path) -> Result<GlyphGrid> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::Io(e),
    })?;

    GlyphGrid::parse(&text)
}
