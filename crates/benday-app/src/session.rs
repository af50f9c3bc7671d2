//! One open canvas file and its write slot
//!
//! Raster work runs on the blocking pool. Writers hold the slot for the
//! whole blocking call, so dropping the returned future does not abandon a
//! half-written file. Reads hold it only while the file bytes are read;
//! PNG decoding happens after the slot is released.

use std::path::{Path, PathBuf};

use benday_canvas::{
    clean_canvas, decode_canvas, export_text, read_raster_bytes, resize_canvas, toggle_padding,
    Canvas, CanvasGuard, ResizeOutcome, SlotHandle, WritePolicy,
};
use benday_core::prelude::*;
use benday_core::{CanvasMeasure, GlyphGrid, PaddingSpec};

use crate::config::Settings;

/// A canvas file being viewed and edited
#[derive(Debug, Clone)]
pub struct CanvasSession {
    path: PathBuf,
    padding: PaddingSpec,
    guard: CanvasGuard,
    policy: WritePolicy,
}

impl CanvasSession {
    /// Session for the canvas at `path`; fails on a malformed file name
    pub fn new(path: impl Into<PathBuf>, policy: WritePolicy) -> Result<Self> {
        let path = path.into();
        let padding = PaddingSpec::from_path(&path)?;

        Ok(Self {
            path,
            padding,
            guard: CanvasGuard::new(),
            policy,
        })
    }

    pub fn from_settings(path: impl Into<PathBuf>, settings: &Settings) -> Result<Self> {
        Self::new(path, settings.write.policy())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn padding(&self) -> PaddingSpec {
        self.padding
    }

    pub fn guard(&self) -> &CanvasGuard {
        &self.guard
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Decode the canvas, or [`Error::Busy`] if a write holds the slot
    pub async fn decode(&self) -> Result<GlyphGrid> {
        let slot = self.guard.try_read().ok_or(Error::Busy)?;
        let path = self.path.clone();
        let padding = self.padding;

        run_blocking(move || {
            let bytes = read_under_slot(slot, &path)?;
            Ok(Canvas::from_png(&path, padding, &bytes)?.decode())
        })
        .await
    }

    pub async fn toggle_padding(&self) -> Result<CanvasMeasure> {
        let policy = self.policy;
        self.write(move |path| toggle_padding(path, &policy)).await
    }

    /// `Ok(None)` when nothing changed
    pub async fn resize(&self, delta_x: i32, delta_y: i32) -> Result<Option<ResizeOutcome>> {
        if delta_x == 0 && delta_y == 0 {
            return Ok(None);
        }

        let policy = self.policy;
        self.write(move |path| resize_canvas(path, delta_x, delta_y, &policy))
            .await
    }

    pub async fn clean(&self, remove_comments: bool) -> Result<CanvasMeasure> {
        let policy = self.policy;
        self.write(move |path| clean_canvas(path, remove_comments, &policy))
            .await
    }

    /// Decode the canvas and write it as braille text to a new file
    pub async fn export(&self, destination: &Path) -> Result<()> {
        let destination = destination.to_path_buf();
        let slot = self.guard.write().await;
        let path = self.path.clone();

        run_blocking(move || {
            let _slot = slot;
            let grid = decode_canvas(&path)?;
            export_text(&grid, &destination)
        })
        .await
    }

    async fn write<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T> + Send + 'static,
    {
        let slot = self.guard.write().await;
        let path = self.path.clone();

        run_blocking(move || {
            let _slot = slot;
            op(&path)
        })
        .await
    }
}

/// Read the canvas bytes, releasing `slot` as soon as they are in memory
fn read_under_slot(slot: SlotHandle, path: &Path) -> Result<Vec<u8>> {
    let _slot = slot;
    read_raster_bytes(path)
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
