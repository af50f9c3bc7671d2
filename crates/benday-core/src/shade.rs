//! Per-sample shade classification
//!
//! Thresholds are relative to the sample's own alpha so that anti-aliased
//! and semi-transparent strokes classify the same way as opaque ones.

/// Classification of one RGBA sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    /// Alpha coverage below one third
    Transparent,
    /// Colored "comment" pixel; never rendered as a dot
    NonGrayscale,
    /// Light gray/white; an "off" dot
    Unshaded,
    /// Dark gray/black; an "on" dot
    Shaded,
}

/// Classify a non-premultiplied RGBA sample.
pub fn classify([r, g, b, a]: [u8; 4]) -> Shade {
    let (r, g, b, a) = (u32::from(r), u32::from(g), u32::from(b), u32::from(a));

    if 3 * a < 0xff {
        return Shade::Transparent;
    }

    // Mean absolute pairwise channel difference, scaled by 3:
    // (|r-g| + |g-b| + |r-b|) == 2 * (max - min)
    let deviation = 2 * (r.max(g).max(b) - r.min(g).min(b));
    if 16 * deviation > 3 * 0xff {
        return Shade::NonGrayscale;
    }

    // Darker than 2/3 brightness across three channels
    if r + g + b < 2 * a {
        Shade::Shaded
    } else {
        Shade::Unshaded
    }
}

impl Shade {
    pub fn is_shaded(self) -> bool {
        self == Shade::Shaded
    }
}
