//! Settings parser for .benday/config.toml

use std::path::Path;

use benday_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const BENDAY_DIR: &str = ".benday";

/// Load settings from .benday/config.toml under `base_path`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(base_path: &Path) -> Settings {
    let config_path = base_path.join(BENDAY_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a commented default config file in .benday/
///
/// An existing config file is left alone.
pub fn init_config_dir(base_path: &Path) -> Result<()> {
    let benday_dir = base_path.join(BENDAY_DIR);

    if !benday_dir.exists() {
        std::fs::create_dir_all(&benday_dir)
            .map_err(|e| Error::config(format!("Failed to create .benday dir: {}", e)))?;
    }

    let config_path = benday_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Benday Configuration

[watcher]
poll_interval_ms = 500          # How often the canvas is re-read

[write]
min_write_interval_ms = 1000    # Skip edits this soon after the last write

[canvas]
# Padding used by `create` and `import` when none is given
padding_x = 0
padding_y = 2
"#;
        std::fs::write(&config_path, default_content)
            .context("Failed to write config.toml")?;
        info!("Wrote default settings to {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use benday_core::PaddingSpec;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(BENDAY_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILENAME),
            r#"
[watcher]
poll_interval_ms = 250

[write]
min_write_interval_ms = 0
"#,
        )
        .unwrap();

        let settings = load_settings(temp.path());

        assert_eq!(settings.watcher.poll_interval_ms, 250);
        assert!(settings.write.policy().min_interval.is_zero());
        assert_eq!(settings.canvas.padding(), PaddingSpec::new(0, 2));
    }

    #[test]
    fn test_load_settings_invalid_falls_back() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(BENDAY_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILENAME), "[watcher\npoll = ").unwrap();

        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_round_trip() {
        let temp = tempdir().unwrap();

        init_config_dir(temp.path()).unwrap();
        assert!(temp.path().join(BENDAY_DIR).join(CONFIG_FILENAME).exists());
        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_keeps_existing() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(BENDAY_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILENAME), "[canvas]\npadding_x = 4\n").unwrap();

        init_config_dir(temp.path()).unwrap();

        assert_eq!(load_settings(temp.path()).canvas.padding_x, 4);
    }
}
