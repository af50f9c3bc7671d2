//! Application error types with rich context

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::measure::GeometryError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Raster Errors
    // ─────────────────────────────────────────────────────────────
    #[error("File does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Error reading the image: {message}")]
    Decode { message: String },

    #[error("Error writing the image: {message}")]
    Encode { message: String },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Rewritten canvas would not read back as {cells_x}x{cells_y} cells in the requested layout. Change the padding and try again.")]
    AmbiguousLayout {
        /// Layout the rewritten raster was built in
        unpadded: bool,
        cells_x: u32,
        cells_y: u32,
    },

    // ─────────────────────────────────────────────────────────────
    // File Naming Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid file name. File must end in the form \"*.<pX>x<pY>.by.png\".")]
    InvalidFileName { path: PathBuf },

    #[error("Padding is an invalid value: Number must be a positive number.")]
    InvalidPadding { value: String },

    // ─────────────────────────────────────────────────────────────
    // Write Coordination
    // ─────────────────────────────────────────────────────────────
    #[error("Canvas was written less than {window_ms}ms ago")]
    TooSoon { window_ms: u64 },

    #[error("Canvas is being written by another task")]
    Busy,

    #[error("File already exists.")]
    AlreadyExists { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No data received.")]
    NoData,

    #[error("Invalid input on {field}: {message}")]
    InvalidInput { field: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Classification of an [`Error`], decided once where the error is built.
///
/// Collaborators branch on this instead of inspecting the error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Path does not follow the `<name>.<pX>x<pY>.by.png` convention
    FileName,
    /// File missing or not a valid raster; will not heal on retry
    Decode,
    /// Raster dimensions do not fit the padding spec
    Geometry,
    /// Write attempted inside the freshness window
    TooSoon,
    /// Another task holds the write slot
    Busy,
    /// Create/export target already exists
    AlreadyExists,
    /// Caller-supplied values were rejected
    Input,
    /// I/O, encoding and configuration failures
    Internal,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn invalid_file_name(path: impl Into<PathBuf>) -> Self {
        Self::InvalidFileName { path: path.into() }
    }

    pub fn invalid_padding(value: impl Into<String>) -> Self {
        Self::InvalidPadding {
            value: value.into(),
        }
    }

    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The classification callers use to pick a reaction
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidFileName { .. } | Error::InvalidPadding { .. } => ErrorKind::FileName,
            Error::FileNotFound { .. } | Error::Decode { .. } => ErrorKind::Decode,
            Error::Geometry(_) | Error::AmbiguousLayout { .. } => ErrorKind::Geometry,
            Error::TooSoon { .. } => ErrorKind::TooSoon,
            Error::Busy => ErrorKind::Busy,
            Error::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Error::NoData | Error::InvalidInput { .. } => ErrorKind::Input,
            Error::Io(_) | Error::Encode { .. } | Error::Config { .. } => {
                ErrorKind::Internal
            }
        }
    }

    /// Transient conditions that are dropped without telling the user
    pub fn is_silent(&self) -> bool {
        matches!(self.kind(), ErrorKind::TooSoon | ErrorKind::Busy)
    }

    /// Check if this error should end the current canvas view.
    ///
    /// A missing/corrupt file or a malformed name will not heal on the
    /// next poll; geometry errors can, once the user fixes the image.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Decode | ErrorKind::FileName)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
