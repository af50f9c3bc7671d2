//! Write coordination for a single canvas file
//!
//! Two independent checks sit in front of every raster write:
//!
//! - [`CanvasGuard`] is the single write slot. A writer waits for it; the
//!   read poll only tries it and skips the tick when it is taken.
//! - [`check_freshness`] refuses a write when the file was modified less
//!   than [`WritePolicy::min_interval`] ago.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use benday_core::prelude::*;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Default freshness window in milliseconds
pub const DEFAULT_MIN_WRITE_INTERVAL_MS: u64 = 1000;

/// Single-slot mutual exclusion between the read poll and writers.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct CanvasGuard {
    slot: Arc<Mutex<()>>,
}

/// Proof that the holder owns the write slot; released on drop
pub type SlotHandle = OwnedMutexGuard<()>;

impl CanvasGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the slot for a read, or `None` if a write is in progress
    pub fn try_read(&self) -> Option<SlotHandle> {
        self.slot.clone().try_lock_owned().ok()
    }

    /// Wait for the slot and hold it for the duration of a write
    pub async fn write(&self) -> SlotHandle {
        self.slot.clone().lock_owned().await
    }

    /// Whether someone currently holds the slot
    pub fn is_busy(&self) -> bool {
        self.slot.try_lock().is_err()
    }
}

/// Debounce settings applied to every raster write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePolicy {
    pub min_interval: Duration,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(DEFAULT_MIN_WRITE_INTERVAL_MS),
        }
    }
}

impl WritePolicy {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// No debounce at all
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }
}

/// Fail with [`Error::TooSoon`] if `path` was modified inside `window`.
///
/// A modification time in the future counts as too recent.
pub fn check_freshness(path: &Path, window: Duration) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::Io(e),
    })?;

    if window.is_zero() {
        return Ok(());
    }

    let modified = metadata.modified()?;
    let too_soon = match SystemTime::now().duration_since(modified) {
        Ok(age) => age < window,
        Err(_) => true,
    };

    if too_soon {
        trace!("Skipping write to {}: modified too recently", path.display());
        return Err(Error::TooSoon {
            window_ms: window.as_millis() as u64,
        });
    }

    Ok(())
}
