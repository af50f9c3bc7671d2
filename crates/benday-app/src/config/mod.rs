//! Configuration file parsing for Benday
//!
//! Supports `.benday/config.toml` in the working directory.

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings};
pub use types::*;
