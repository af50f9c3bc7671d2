//! # benday-canvas - Canvas Files
//!
//! Reads, writes and transforms `<name>.<pX>x<pY>.by.png` canvas rasters.
//! Every operation opens the file, measures it, and either returns a
//! [`GlyphGrid`](benday_core::GlyphGrid) or writes a fully built
//! replacement back in one go.
//!
//! ## Public API
//!
//! - [`decode_canvas()`] / [`Canvas`] - Raster to glyph grid
//! - [`toggle_padding()`] - Switch between padded and unpadded layouts
//! - [`resize_canvas()`] - Add or remove whole cells
//! - [`clean_canvas()`] - Snap marks to ink or the default pattern
//! - [`create_canvas()`] / [`import_canvas()`] - New canvas files
//! - [`export_text()`] / [`import_text_file()`] - Braille text files
//! - [`CanvasGuard`] / [`WritePolicy`] - Write slot and debounce
//!
//! ## Feature Flags
//!
//! - `test-helpers`: exposes [`test_utils`] fixture writers for other crates

pub mod canvas;
pub mod clean;
pub mod create;
pub mod guard;
pub mod pattern;
pub mod raster;
pub mod resize;
pub mod text;
pub mod toggle;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use canvas::{decode_canvas, decode_image, Canvas};
pub use clean::{clean_canvas, clean_image};
pub use create::{create_canvas, import_canvas, render_grid, CanvasRequest};
pub use guard::{check_freshness, CanvasGuard, SlotHandle, WritePolicy};
pub use pattern::default_canvas;
pub use raster::{decode_png, encode_png, read_raster, read_raster_bytes, replace_raster};
pub use resize::{clamp_resize_delta, resize_canvas, ResizeOutcome};
pub use text::{export_text, import_text_file};
pub use toggle::{toggle_padding, toggled_image};
