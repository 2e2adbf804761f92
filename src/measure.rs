//! The measurement contract between the fit engine and rendering backends.

use crate::units::Pt;

/// The ink extents of a piece of text at a specific font size.
///
/// Coordinates are in page space (y grows upwards). The bearings locate the
/// ink box relative to the nominal text origin — the point a backend would
/// place the baseline start at: `x_bearing` is the offset to the left edge
/// of the ink, `y_bearing` the offset to its bottom edge (negative for
/// glyphs with descenders).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TextExtents {
    pub width: Pt,
    pub height: Pt,
    pub x_bearing: Pt,
    pub y_bearing: Pt,
}

impl TextExtents {
    /// True when the text produced no measurable ink (e.g. only whitespace).
    pub fn is_empty(&self) -> bool {
        *self.width <= 0.0 || *self.height <= 0.0
    }
}

/// Measures the ink extents of text at a given font size.
///
/// Implementations must behave as pure functions of their inputs: the fit
/// engine re-queries extents while it searches and never caches a
/// measurement across font-size changes.
pub trait MeasureText {
    fn extents(&self, text: &str, size: Pt) -> TextExtents;
}

impl<M: MeasureText + ?Sized> MeasureText for &M {
    fn extents(&self, text: &str, size: Pt) -> TextExtents {
        (**self).extents(text, size)
    }
}
