//! Braille cell codec
//!
//! A cell is 2 dots wide and 4 dots tall. Dot masks are ordered row-major:
//! bit `i` is the dot at `x = i % 2`, `y = i / 2`.
//!
//! ```text
//!   x0  x1
//!   [0] [1]   y0
//!   [2] [3]   y1
//!   [4] [5]   y2
//!   [6] [7]   y3
//! ```
//!
//! Unicode numbers the same dots column-major (dots 1,2,3,7 down the left
//! column, 4,5,6,8 down the right), so packing goes through [`UNICODE_BIT`].

/// Dots per cell, horizontally
pub const CELL_WIDTH: u32 = 2;

/// Dots per cell, vertically
pub const CELL_HEIGHT: u32 = 4;

/// First codepoint of the Unicode braille block
pub const BRAILLE_BASE: u32 = 0x2800;

/// The glyph with no dots raised
pub const BLANK_GLYPH: char = '\u{2800}';

/// Unicode braille bit for each row-major dot position
const UNICODE_BIT: [u8; 8] = [0, 3, 1, 4, 2, 5, 6, 7];

/// Row-major bit index of the dot at `(x, y)` inside a cell
#[inline]
pub const fn dot_index(x: u32, y: u32) -> u32 {
    y * CELL_WIDTH + x
}

/// Pack a row-major dot mask into its braille glyph.
pub fn encode_cell(mask: u8) -> char {
    let mut bits = 0u32;
    for (i, unicode_bit) in UNICODE_BIT.iter().enumerate() {
        if mask & (1 << i) != 0 {
            bits |= 1 << unicode_bit;
        }
    }

    // Every value in 0x2800..=0x28FF is a valid scalar
    char::from_u32(BRAILLE_BASE + bits).unwrap_or(BLANK_GLYPH)
}

/// Unpack a braille glyph into its row-major dot mask.
///
/// Returns `None` for characters outside the braille block.
pub fn decode_cell(glyph: char) -> Option<u8> {
    if !is_braille(glyph) {
        return None;
    }

    let bits = u32::from(glyph) - BRAILLE_BASE;
    let mut mask = 0u8;
    for (i, unicode_bit) in UNICODE_BIT.iter().enumerate() {
        if bits & (1 << unicode_bit) != 0 {
            mask |= 1 << i;
        }
    }

    Some(mask)
}

/// Whether `c` lies in U+2800..=U+28FF
#[inline]
pub fn is_braille(c: char) -> bool {
    (BRAILLE_BASE..=BRAILLE_BASE + 0xFF).contains(&u32::from(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_masks() {
        for mask in 0..=u8::MAX {
            assert_eq!(decode_cell(encode_cell(mask)), Some(mask));
        }
    }

    #[test]
    fn test_every_glyph_decodes() {
        for offset in 0..=0xFFu32 {
            let glyph = char::from_u32(BRAILLE_BASE + offset).unwrap();
            let mask = decode_cell(glyph).unwrap();
            assert_eq!(encode_cell(mask), glyph);
        }
    }

    #[test]
    fn test_unicode_dot_numbering() {
        // Left column top to bottom: dots 1, 2, 3, 7
        assert_eq!(encode_cell(1 << dot_index(0, 0)), '⠁');
        assert_eq!(encode_cell(1 << dot_index(0, 1)), '⠂');
        assert_eq!(encode_cell(1 << dot_index(0, 2)), '⠄');
        assert_eq!(encode_cell(1 << dot_index(0, 3)), '⡀');

        // Right column top to bottom: dots 4, 5, 6, 8
        assert_eq!(encode_cell(1 << dot_index(1, 0)), '⠈');
        assert_eq!(encode_cell(1 << dot_index(1, 1)), '⠐');
        assert_eq!(encode_cell(1 << dot_index(1, 2)), '⠠');
        assert_eq!(encode_cell(1 << dot_index(1, 3)), '⢀');
    }

    #[test]
    fn test_blank_and_full() {
        assert_eq!(encode_cell(0), BLANK_GLYPH);
        assert_eq!(encode_cell(0xFF), '⣿');
        assert_eq!(decode_cell('⣿'), Some(0xFF));
    }

    #[test]
    fn test_non_braille_rejected() {
        assert_eq!(decode_cell('a'), None);
        assert_eq!(decode_cell(' '), None);
        assert_eq!(decode_cell('\u{2900}'), None);
        assert!(!is_braille('\u{27FF}'));
        assert!(is_braille('\u{28FF}'));
    }
}
