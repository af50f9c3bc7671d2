//! Rectangular grids of braille glyphs and their plain-text form

use std::fmt;

use crate::braille::{decode_cell, is_braille, BLANK_GLYPH};
use crate::error::{Error, Result};

/// Row-major grid of braille glyphs, every row the same length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    rows: Vec<Vec<char>>,
}

impl GlyphGrid {
    /// Build a grid from rows, checking that it is rectangular and holds
    /// only braille glyphs.
    pub fn new(rows: Vec<Vec<char>>) -> Result<Self> {
        let width = match rows.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(Error::NoData),
        };

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::invalid_input(
                    "grid",
                    format!("row {} has {} glyphs, expected {}", y, row.len(), width),
                ));
            }

            if let Some(c) = row.iter().find(|c| !is_braille(**c)) {
                return Err(Error::invalid_input(
                    "grid",
                    format!("row {} holds non-braille character {:?}", y, c),
                ));
            }
        }

        Ok(Self { rows })
    }

    /// Grid of `width` by `height` blank glyphs
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![BLANK_GLYPH; width]; height],
        }
    }

    /// Parse a braille text block.
    ///
    /// Spaces read as blank glyphs and any other non-braille character is
    /// dropped. Short lines are padded on the right with blank glyphs.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .filter_map(|c| match c {
                        ' ' => Some(BLANK_GLYPH),
                        c if is_braille(c) => Some(c),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err(Error::NoData);
        }

        for row in &mut rows {
            row.resize(width, BLANK_GLYPH);
        }

        Ok(Self { rows })
    }

    /// Plain-text form: one line per row, joined with `\n`, no trailing newline
    pub fn to_text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    /// Each row rendered as a string
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.iter().collect())
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Row-major dot mask of the glyph at `(x, y)`
    pub fn mask_at(&self, x: usize, y: usize) -> Option<u8> {
        self.get(x, y).and_then(decode_cell)
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, glyph: char) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = glyph;
        }
    }

    /// Grid of the given size filled from a per-cell glyph function
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> char) -> Self {
        let mut grid = Self::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.set(x, y, f(x, y));
            }
        }
        grid
    }
}

impl fmt::Display for GlyphGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
