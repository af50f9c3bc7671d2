//! Messages sent from background canvas tasks

use benday_core::{ErrorKind, GlyphGrid};

/// Updates produced by the [`CanvasWatcher`](crate::watcher::CanvasWatcher)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The canvas decoded to a grid different from the last one sent
    GridUpdated { grid: GlyphGrid },

    /// The canvas could not be shown this tick; the last grid stays valid
    ViewError { kind: ErrorKind, message: String },

    /// The canvas can no longer be shown; the watcher has stopped
    DecodeFailed { message: String },
}

impl Message {
    /// Whether the receiver should close the view
    pub fn is_terminal(&self) -> bool {
        matches!(self, Message::DecodeFailed { .. })
    }
}
