//! Padding spec and the `<name>.<pX>x<pY>.by.png` file naming convention

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Suffix every canvas file ends with
pub const CANVAS_SUFFIX: &str = ".by.png";

/// Largest padding accepted on either axis
pub const MAX_PADDING: u32 = 1024;

/// Transparent gap between cells, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaddingSpec {
    pub x: u32,
    pub y: u32,
}

impl PaddingSpec {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Reject padding beyond [`MAX_PADDING`] on either axis
    pub fn validate(&self) -> Result<()> {
        for value in [self.x, self.y] {
            if value > MAX_PADDING {
                return Err(Error::invalid_input(
                    "padding",
                    format!("Number must be at most {}.", MAX_PADDING),
                ));
            }
        }
        Ok(())
    }

    /// Parse the padding embedded in a canvas path.
    ///
    /// Only the final path component is inspected. Splitting from the right
    /// on `.`, the segments must read `png`, `by`, then `<pX>x<pY>`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::invalid_file_name(path))?;

        // Need a name segment in front of the padding segment
        if file_name.matches('.').count() < 3 {
            return Err(Error::invalid_file_name(path));
        }

        let mut segments = file_name.rsplit('.');
        if segments.next() != Some("png") || segments.next() != Some("by") {
            return Err(Error::invalid_file_name(path));
        }

        let spec = segments
            .next()
            .ok_or_else(|| Error::invalid_file_name(path))?;
        if spec.matches('x').count() != 1 {
            return Err(Error::invalid_file_name(path));
        }

        let (x, y) = spec
            .split_once('x')
            .ok_or_else(|| Error::invalid_file_name(path))?;

        Ok(Self {
            x: parse_padding(x)?,
            y: parse_padding(y)?,
        })
    }

    /// Canvas file name for `prefix` carrying this padding
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}.{}x{}{}", prefix, self.x, self.y, CANVAS_SUFFIX)
    }

    /// Canvas path for `prefix` inside `dir`
    pub fn canvas_path(&self, dir: &Path, prefix: &str) -> PathBuf {
        dir.join(self.file_name(prefix))
    }
}

impl fmt::Display for PaddingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Non-empty, unsigned base-10 integer
fn parse_padding(value: &str) -> Result<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_padding(value));
    }

    match value.parse() {
        Ok(padding) if padding <= MAX_PADDING => Ok(padding),
        _ => Err(Error::invalid_padding(value)),
    }
}
