//! Command line front end
//!
//! Each subcommand opens the canvas through the library crates and reports
//! the result on the terminal. Logs go to the log file, never to stdout.

use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use tokio::sync::mpsc;

use benday_app::{
    init_config_dir, load_settings, CanvasSession, CanvasWatcher, Message, Settings, UpdateAction,
    WatcherConfig,
};
use benday_canvas::{create_canvas, import_canvas, import_text_file, CanvasRequest};
use benday_core::prelude::*;
use benday_core::{GlyphGrid, PaddingSpec};

use crate::headless::HeadlessEvent;

/// Benday - braille pixel art stored as PNG canvases
#[derive(Parser, Debug)]
#[command(name = "benday")]
#[command(about = "Braille pixel art stored as PNG canvases", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a blank canvas filled with the default pattern
    Create {
        /// File name prefix; the canvas is written as <NAME>.<pX>x<pY>.by.png
        name: String,
        /// Cells per row
        #[arg(long)]
        width: u32,
        /// Rows of cells
        #[arg(long)]
        height: u32,
        #[command(flatten)]
        padding: PaddingArgs,
        /// Directory to create the canvas in
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Print the braille grid stored in a canvas
    View { path: PathBuf },

    /// Re-print the grid whenever the canvas changes
    Watch {
        path: PathBuf,
        /// Emit JSON events instead of the grid
        #[arg(long)]
        headless: bool,
    },

    /// Switch a canvas between the padded and unpadded layouts
    Toggle { path: PathBuf },

    /// Add or remove whole cells on the right and bottom edges
    Resize {
        path: PathBuf,
        /// Columns of cells to add (negative to remove)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        dx: i32,
        /// Rows of cells to add (negative to remove)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        dy: i32,
    },

    /// Snap dark marks to ink and everything else back to the pattern
    Clean {
        path: PathBuf,
        /// Also erase non-grayscale comment pixels
        #[arg(long)]
        remove_comments: bool,
    },

    /// Build a canvas from a braille text file
    Import {
        text: PathBuf,
        /// File name prefix for the new canvas
        #[arg(long)]
        name: String,
        #[command(flatten)]
        padding: PaddingArgs,
        /// Directory to create the canvas in
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Write the canvas grid to a new braille text file
    Export { path: PathBuf, output: PathBuf },

    /// Write a default .benday/config.toml in the current directory
    Init,
}

/// Padding overrides; unset values come from the config file
#[derive(ClapArgs, Debug, Default, Clone, Copy)]
pub struct PaddingArgs {
    /// Transparent columns between cells
    #[arg(long)]
    pub padding_x: Option<u32>,
    /// Transparent rows between cells
    #[arg(long)]
    pub padding_y: Option<u32>,
}

impl PaddingArgs {
    pub fn resolve(&self, settings: &Settings) -> PaddingSpec {
        let defaults = settings.canvas.padding();
        PaddingSpec::new(
            self.padding_x.unwrap_or(defaults.x),
            self.padding_y.unwrap_or(defaults.y),
        )
    }
}

/// Run one command with settings from `base_path`
pub async fn run(args: Args, base_path: &Path) -> Result<()> {
    let settings = load_settings(base_path);

    match args.command {
        Command::Create {
            name,
            width,
            height,
            padding,
            dir,
        } => {
            let request = CanvasRequest::new(name, width, height, padding.resolve(&settings));
            let path = create_canvas(&dir, &request)?;
            println!("Created {}", path.display());
        }

        Command::View { path } => {
            let session = CanvasSession::from_settings(path, &settings)?;
            print_grid(&session.decode().await?);
        }

        Command::Watch { path, headless } => {
            let session = CanvasSession::from_settings(path, &settings)?;
            watch(session, WatcherConfig::from_settings(&settings), headless).await?;
        }

        Command::Toggle { path } => {
            let session = CanvasSession::from_settings(path, &settings)?;
            report_write(session.toggle_padding().await, |_| true, "Toggled padding")?;
        }

        Command::Resize { path, dx, dy } => {
            let session = CanvasSession::from_settings(path, &settings)?;
            let result = session.resize(dx, dy).await;
            if let Some(Some(outcome)) = report_write(result, Option::is_some, "Resized")? {
                println!("Now {}x{} cells", outcome.after.cells_x, outcome.after.cells_y);
            }
        }

        Command::Clean {
            path,
            remove_comments,
        } => {
            let session = CanvasSession::from_settings(path, &settings)?;
            report_write(session.clean(remove_comments).await, |_| true, "Cleaned")?;
        }

        Command::Import {
            text,
            name,
            padding,
            dir,
        } => {
            let grid = import_text_file(&text)?;
            let path = import_canvas(&dir, &name, &grid, padding.resolve(&settings))?;
            println!("Created {}", path.display());
        }

        Command::Export { path, output } => {
            let session = CanvasSession::from_settings(path, &settings)?;
            session.export(&output).await?;
            println!("Exported {}", output.display());
        }

        Command::Init => {
            init_config_dir(base_path)?;
            println!("Wrote {}", base_path.join(".benday").join("config.toml").display());
        }
    }

    Ok(())
}

/// Print the outcome of a write command; `Ok(None)` when it was skipped
fn report_write<T>(
    result: Result<T>,
    changed: impl FnOnce(&T) -> bool,
    done: &str,
) -> Result<Option<T>> {
    match UpdateAction::from_write(&result, changed) {
        UpdateAction::Redraw => {
            println!("{}", done);
            result.map(Some)
        }
        UpdateAction::Ignore => {
            match &result {
                Err(e) => eprintln!("Skipped: {}", e),
                Ok(_) => eprintln!("Nothing to do"),
            }
            Ok(None)
        }
        UpdateAction::Show { .. } | UpdateAction::Close { .. } => result.map(Some),
    }
}

fn print_grid(grid: &GlyphGrid) {
    println!("{}", grid);
}

async fn watch(session: CanvasSession, config: WatcherConfig, headless: bool) -> Result<()> {
    info!("Watching {}", session.path().display());
    if headless {
        HeadlessEvent::canvas_opened(session.path(), session.padding()).emit();
    }

    let (tx, mut rx) = mpsc::channel::<Message>(16);
    let mut watcher = CanvasWatcher::new(session, config);
    watcher.start(tx).map_err(Error::config)?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut failure = None;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
            message = rx.recv() => {
                let Some(message) = message else { break };

                if headless {
                    HeadlessEvent::from(&message).emit();
                } else {
                    show_message(&message);
                }

                if let Message::DecodeFailed { message } = message {
                    failure = Some(message);
                    break;
                }
            }
        }
    }

    watcher.stop();
    if headless {
        HeadlessEvent::stopped().emit();
    }

    match failure {
        Some(message) => Err(Error::decode(message)),
        None => Ok(()),
    }
}

fn show_message(message: &Message) {
    match message {
        Message::GridUpdated { grid } => {
            println!();
            print_grid(grid);
        }
        Message::ViewError { message, .. } => eprintln!("{}", message),
        Message::DecodeFailed { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_resize() {
        let args = Args::parse_from(["benday", "resize", "a.0x2.by.png", "--dx", "-2", "--dy", "3"]);
        match args.command {
            Command::Resize { dx, dy, .. } => assert_eq!((dx, dy), (-2, 3)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_padding_falls_back_to_settings() {
        let settings = Settings::default();
        let padding = PaddingArgs {
            padding_x: Some(3),
            padding_y: None,
        };

        assert_eq!(padding.resolve(&settings), PaddingSpec::new(3, 2));
        assert_eq!(PaddingArgs::default().resolve(&settings), PaddingSpec::new(0, 2));
    }
}
