//! Benday Library
//!
//! Command line front end for braille pixel art canvases.

pub mod cli;
pub mod headless;

pub use cli::{run, Args, Command};
pub use headless::HeadlessEvent;
