//! # benday-core - Core Domain Types
//!
//! Foundation crate for Benday. Provides the braille cell codec, shade
//! classification, canvas geometry, the default pattern, glyph grids and
//! error handling. Nothing in here touches the filesystem except logging
//! setup.
//!
//! ## Public API
//!
//! ### Codec (`braille`)
//! - [`encode_cell()`] / [`decode_cell()`] - Row-major dot mask <-> braille glyph
//!
//! ### Classification (`shade`)
//! - [`classify()`] - Sort one RGBA sample into a [`Shade`]
//!
//! ### Geometry (`measure`, `padding`)
//! - [`measure()`] - Recover cell counts and layout mode from raster size
//! - [`PaddingSpec`] - Padding parsed from `<name>.<pX>x<pY>.by.png`
//!
//! ### Pattern (`pattern`)
//! - [`PatternLayout`] - Default checkerboard color of any pixel
//!
//! ### Grids (`grid`)
//! - [`GlyphGrid`] - Rectangular glyph grid, text import and export
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with an explicit [`ErrorKind`] classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! ```rust
//! use benday_core::prelude::*;
//! ```

pub mod braille;
pub mod error;
pub mod grid;
pub mod logging;
pub mod measure;
pub mod padding;
pub mod pattern;
pub mod prelude;
pub mod shade;

pub use braille::{
    decode_cell, dot_index, encode_cell, is_braille, BLANK_GLYPH, CELL_HEIGHT, CELL_WIDTH,
};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use grid::GlyphGrid;
pub use measure::{measure, raster_size, Axis, CanvasMeasure, GeometryError, MAX_CELLS};
pub use padding::{PaddingSpec, CANVAS_SUFFIX, MAX_PADDING};
pub use pattern::{PatternLayout, INK, PATTERN_GRAY, PATTERN_WHITE, TRANSPARENT};
pub use shade::{classify, Shade};
