//! benday-app - Canvas sessions and orchestration for Benday
//!
//! Loads settings, owns the per-canvas write slot through [`CanvasSession`],
//! polls canvases with [`CanvasWatcher`], and turns operation results into
//! [`UpdateAction`]s the front end can act on.

pub mod action;
pub mod config;
pub mod message;
pub mod session;
pub mod watcher;

pub use action::UpdateAction;
pub use config::{init_config_dir, load_settings, Settings};
pub use message::Message;
pub use session::CanvasSession;
pub use watcher::{CanvasWatcher, WatcherConfig};

