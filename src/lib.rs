//! Centers and auto-scales text into rectangles on a fixed-size PDF page.
//!
//! The crate is built around two small pieces:
//!
//! * [`segment`] — splits UTF-8 text into per-codepoint units or into
//!   normalized lines, without touching layout or rendering.
//! * [`fit`] — given one text unit, a target [`Rect`] and something that can
//!   measure text ([`MeasureText`]), finds a font size and/or per-axis scale
//!   factors so the rendered ink box lands within ±10% of the rectangle, and
//!   computes the draw origin that centers the ink box (not the baseline
//!   origin) on the rectangle center.
//!
//! Drawing goes through the [`RenderContext`] trait; [`Surface`] implements
//! it on top of a [`pdf_writer`] content stream and writes a complete
//! single-page PDF with embedded fonts.
//!
//! # Example
//!
//! ```
//! use text_autofit::{fit, FitOptions, MeasureText, Pt, Rect, TextExtents};
//!
//! // a toy measurer: every codepoint is 0.6 em wide, ink is 0.7 em tall
//! struct FixedGlyphs;
//! impl MeasureText for FixedGlyphs {
//!     fn extents(&self, text: &str, size: Pt) -> TextExtents {
//!         let count = text_autofit::segment::codepoints(text).count() as f32;
//!         TextExtents {
//!             width: size * (0.6 * count),
//!             height: size * 0.7,
//!             x_bearing: Pt(0.0),
//!             y_bearing: Pt(0.0),
//!         }
//!     }
//! }
//!
//! let rect = Rect::new(Pt(0.0), Pt(0.0), Pt(100.0), Pt(50.0));
//! let result = fit(&FixedGlyphs, "あ", rect, Pt(40.0), &FitOptions::default()).unwrap();
//! assert!(result.scale_x > 0.0 && result.scale_y > 0.0);
//! ```

mod draw;
pub use draw::*;

mod error;
pub use error::*;

mod fit;
pub use fit::*;

mod font;
pub use font::*;

mod measure;
pub use measure::*;

/// Pre-defined page sizes for common paper formats
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// UTF-8 segmentation into codepoint units and normalized lines
pub mod segment;

mod surface;
pub use surface::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
