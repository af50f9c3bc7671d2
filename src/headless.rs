//! Headless mode - JSON event output for scripted use
//!
//! `benday watch --headless` prints one JSON object per line instead of
//! redrawing the grid. Each event has an "event" field naming its type.
//!
//! # Example Output
//!
//! ```json
//! {"event":"canvas_opened","path":"art.0x2.by.png","padding_x":0,"padding_y":2,"timestamp":1704700001000}
//! {"event":"grid_updated","width":2,"height":1,"lines":["⠁⠂"],"timestamp":1704700001500}
//! ```

use std::io::{self, Write};
use std::path::Path;

use benday_app::Message;
use benday_core::{ErrorKind, GlyphGrid, PaddingSpec};
use chrono::Utc;
use serde::Serialize;
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Polling started
    CanvasOpened {
        path: String,
        padding_x: u32,
        padding_y: u32,
        timestamp: i64,
    },

    /// The canvas decoded to a new grid
    GridUpdated {
        width: usize,
        height: usize,
        lines: Vec<String>,
        timestamp: i64,
    },

    /// The canvas could not be shown this time
    ViewError {
        kind: ErrorKind,
        message: String,
        timestamp: i64,
    },

    /// The canvas can no longer be shown
    DecodeFailed { message: String, timestamp: i64 },

    /// Polling stopped
    Stopped { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn canvas_opened(path: &Path, padding: PaddingSpec) -> Self {
        Self::CanvasOpened {
            path: path.display().to_string(),
            padding_x: padding.x,
            padding_y: padding.y,
            timestamp: Self::now(),
        }
    }

    pub fn grid_updated(grid: &GlyphGrid) -> Self {
        Self::GridUpdated {
            width: grid.width(),
            height: grid.height(),
            lines: grid.lines().collect(),
            timestamp: Self::now(),
        }
    }

    pub fn stopped() -> Self {
        Self::Stopped {
            timestamp: Self::now(),
        }
    }
}

impl From<&Message> for HeadlessEvent {
    fn from(message: &Message) -> Self {
        match message {
            Message::GridUpdated { grid } => Self::grid_updated(grid),
            Message::ViewError { kind, message } => Self::ViewError {
                kind: *kind,
                message: message.clone(),
                timestamp: Self::now(),
            },
            Message::DecodeFailed { message } => Self::DecodeFailed {
                message: message.clone(),
                timestamp: Self::now(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_opened_serialization() {
        let event = HeadlessEvent::canvas_opened(Path::new("art.1x2.by.png"), PaddingSpec::new(1, 2));
        let json = serde_json::to_string(&event).expect("serialization failed");

        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "canvas_opened");
        assert_eq!(value["path"], "art.1x2.by.png");
        assert_eq!(value["padding_x"], 1);
        assert_eq!(value["padding_y"], 2);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_grid_updated_serialization() {
        let grid = GlyphGrid::parse("⠁⠂\n⠄⡀").unwrap();
        let event = HeadlessEvent::from(&Message::GridUpdated { grid });
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event"], "grid_updated");
        assert_eq!(value["width"], 2);
        assert_eq!(value["lines"][1], "⠄⡀");
    }

    #[test]
    fn test_view_error_serialization() {
        let event = HeadlessEvent::from(&Message::ViewError {
            kind: ErrorKind::Geometry,
            message: "Invalid image dimension.".to_string(),
        });
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event"], "view_error");
        assert_eq!(value["kind"], "geometry");
    }

    #[test]
    fn test_decode_failed_serialization() {
        let event = HeadlessEvent::from(&Message::DecodeFailed {
            message: "File does not exist: x".to_string(),
        });
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event"], "decode_failed");
        assert_eq!(value["message"], "File does not exist: x");
    }
}
