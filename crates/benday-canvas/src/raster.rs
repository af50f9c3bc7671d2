//! PNG raster I/O
//!
//! Canvases are read whole and written whole. A replacement raster is
//! fully encoded in memory before the destination is truncated, and the
//! destination is held under an advisory exclusive lock while it is
//! rewritten. Readers take a non-blocking shared lock and report
//! [`Error::Busy`] instead of waiting.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Read, Write};
use std::path::Path;

use benday_core::prelude::*;
use fs2::FileExt;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};

/// Decode the canvas raster at `path` into RGBA samples.
pub fn read_raster(path: &Path) -> Result<RgbaImage> {
    decode_png(&read_raster_bytes(path)?)
}

/// Decode PNG bytes into RGBA samples.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| Error::decode(e.to_string()))?;

    Ok(image.into_rgba8())
}

/// Encode `image` as an RGBA PNG in memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| Error::encode(e.to_string()))?;

    Ok(bytes)
}

/// Overwrite an existing canvas with `image`.
pub fn replace_raster(path: &Path, image: &RgbaImage) -> Result<()> {
    // Encode before touching the destination
    let bytes = encode_png(image)?;

    overwrite_locked(path, &bytes)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn overwrite_locked(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    // Blocks while another process holds the lock
    FileExt::lock_exclusive(&file)?;

    file.set_len(0)?;
    file.write_all(bytes)?;
    file.flush()
}

/// Write `image` to a path that must not exist yet.
pub fn create_raster(path: &Path, image: &RgbaImage) -> Result<()> {
    let bytes = encode_png(image)?;
    write_new(path, &bytes)
}

/// Write `bytes` to a new file, refusing to overwrite.
pub fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            IoErrorKind::AlreadyExists => Error::already_exists(path),
            _ => Error::Io(e),
        })?;

    file.write_all(bytes)
        .and_then(|()| file.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Created {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Read the raw bytes of the canvas at `path` under a shared lock.
///
/// Returns [`Error::Busy`] instead of waiting when a writer holds the lock.
pub fn read_raster_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut file = open_for_read(path)?;

    match FileExt::try_lock_shared(&file) {
        Ok(()) => {}
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
            trace!("{} is locked for writing", path.display());
            return Err(Error::Busy);
        }
        // Locking is advisory; some filesystems do not support it
        Err(e) => debug!("Could not lock {} for reading: {}", path.display(), e),
    }

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::decode(e.to_string()))?;

    Ok(bytes)
}

fn open_for_read(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::decode(e.to_string()),
    })
}
