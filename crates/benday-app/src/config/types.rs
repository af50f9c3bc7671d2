//! Configuration types for Benday
//!
//! Defines `Settings` and one sub-type per `.benday/config.toml` section.

use std::time::Duration;

use benday_canvas::WritePolicy;
use benday_core::PaddingSpec;
use serde::{Deserialize, Serialize};

/// Global application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub watcher: WatcherSettings,

    #[serde(default)]
    pub write: WriteSettings,

    #[serde(default)]
    pub canvas: CanvasSettings,
}

/// Canvas polling settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WatcherSettings {
    /// How often the canvas is re-decoded, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WatcherSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval_ms() -> u64 {
    500
}

/// Write debounce settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WriteSettings {
    /// Writes within this many milliseconds of the last modification are skipped
    #[serde(default = "default_min_write_interval_ms")]
    pub min_write_interval_ms: u64,
}

impl Default for WriteSettings {
    fn default() -> Self {
        Self {
            min_write_interval_ms: default_min_write_interval_ms(),
        }
    }
}

impl WriteSettings {
    pub fn policy(&self) -> WritePolicy {
        WritePolicy::from_millis(self.min_write_interval_ms)
    }
}

fn default_min_write_interval_ms() -> u64 {
    benday_canvas::guard::DEFAULT_MIN_WRITE_INTERVAL_MS
}

/// Defaults for new canvases
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CanvasSettings {
    #[serde(default)]
    pub padding_x: u32,

    #[serde(default = "default_padding_y")]
    pub padding_y: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            padding_x: 0,
            padding_y: default_padding_y(),
        }
    }
}

impl CanvasSettings {
    pub fn padding(&self) -> PaddingSpec {
        PaddingSpec::new(self.padding_x, self.padding_y)
    }
}

fn default_padding_y() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();

        assert_eq!(settings.watcher.poll_interval(), Duration::from_millis(500));
        assert_eq!(settings.write.policy(), WritePolicy::default());
        assert_eq!(settings.canvas.padding(), PaddingSpec::new(0, 2));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[canvas]
padding_x = 3
"#,
        )
        .unwrap();

        assert_eq!(settings.canvas.padding(), PaddingSpec::new(3, 2));
        assert_eq!(settings.watcher.poll_interval_ms, 500);
    }
}
