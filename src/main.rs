//! Benday - braille pixel art stored as PNG canvases
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use benday::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging (to file, stdout carries the grid)
    benday_core::logging::init()?;

    let base_path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    info!("Working directory: {}", base_path.display());

    let result = benday::run(args, &base_path).await;
    if let Err(ref e) = result {
        error!("Command failed: {:?}", e);
    }

    info!("Benday exiting");
    Ok(result?)
}
