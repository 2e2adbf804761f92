//! The autofit engine: finds a font size and/or per-axis scale factors so a
//! text unit's ink box occupies a target fraction of a rectangle, then
//! computes the draw origin that centers the ink box on the rectangle.

use crate::error::FitError;
use crate::measure::MeasureText;
use crate::rect::Rect;
use crate::units::Pt;

/// Lower edge of the fit band, as a fraction of the target dimension.
pub const FIT_BAND_LOWER: f32 = 0.9;
/// Upper edge of the fit band, as a fraction of the target dimension.
pub const FIT_BAND_UPPER: f32 = 1.1;

// per-iteration adjustment factors; growing by 1.1 and shrinking by 0.9
// overshoots by at most one step, which always lands inside the ±10% band
const GROW: f32 = 1.1;
const SHRINK: f32 = 0.9;

/// How the engine is allowed to adjust the text to reach the fit band.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FitPolicy {
    /// Measure once at the given font size and adjust only the two scale
    /// factors, growing or shrinking each axis independently until both
    /// land in the band. The font size is never altered.
    #[default]
    ScaleOnly,
    /// Re-measure on every iteration. While both axes are under target,
    /// grow the font size itself; once one axis is in reach, top up the
    /// other with its scale factor. Overshoots shrink the scale factors,
    /// mirroring [FitPolicy::ScaleOnly].
    FontSizePlusScale,
}

/// Tuning for [fit].
#[derive(Debug, Clone)]
pub struct FitOptions {
    pub policy: FitPolicy,
    /// Hard cap on adjustment iterations. Each axis needs on the order of
    /// `log₁.₁(ratio)` steps, so the default of 500 comfortably covers
    /// ratios of a million per axis while still bounding degenerate input.
    pub max_iterations: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            policy: FitPolicy::ScaleOnly,
            max_iterations: 500,
        }
    }
}

impl FitOptions {
    pub fn with_policy(policy: FitPolicy) -> Self {
        FitOptions {
            policy,
            ..Default::default()
        }
    }
}

/// The parameters needed to reproduce a centered, fitted placement.
///
/// A result is valid only for the exact (text unit, rectangle, font) triple
/// that produced it; recompute rather than reuse if any of them changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// The font size to draw at. Equal to the input size under
    /// [FitPolicy::ScaleOnly].
    pub font_size: Pt,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Draw origin in the text's own (pre-scale) coordinate space, relative
    /// to the rectangle center: `-width/2 - x_bearing`. Subtracting the
    /// bearing cancels the font's intrinsic ink-box offset so the visible
    /// glyph box is what ends up centered, not the baseline origin.
    pub draw_x: Pt,
    /// See [FitResult::draw_x]; the vertical analogue, `-height/2 - y_bearing`.
    pub draw_y: Pt,
}

/// Fit one text unit into `rect`.
///
/// Measures `text` through `measure` starting at `font_size` and adjusts
/// according to `options.policy` until the scaled ink box's width and height
/// each lie within `[0.9, 1.1]` of the rectangle's. Exact fill is not
/// required, only "close enough"; the multiplicative steps make the search
/// geometrically convergent.
///
/// # Errors
///
/// * [FitError::EmptyText] if `text` is empty or measures with no ink.
/// * [FitError::DegenerateRectangle] if `rect` has a zero, negative, or
///   non-finite dimension.
/// * [FitError::NonConvergence] if the iteration cap is hit first; the
///   error carries the best parameters found so far, so a caller can draw
///   an approximate fit for this unit and continue with its siblings.
pub fn fit<M: MeasureText + ?Sized>(
    measure: &M,
    text: &str,
    rect: Rect,
    font_size: Pt,
    options: &FitOptions,
) -> Result<FitResult, FitError> {
    if text.is_empty() {
        return Err(FitError::EmptyText);
    }

    let rect_width = *rect.width();
    let rect_height = *rect.height();
    if !(rect_width > 0.0) || !(rect_height > 0.0) || !rect_width.is_finite() || !rect_height.is_finite() {
        return Err(FitError::DegenerateRectangle {
            width: rect_width,
            height: rect_height,
        });
    }

    let mut font_size = font_size;
    let mut scale_x = 1.0f32;
    let mut scale_y = 1.0f32;

    let mut extents = measure.extents(text, font_size);
    if extents.is_empty() {
        return Err(FitError::EmptyText);
    }

    let mut converged = false;
    for iteration in 0..options.max_iterations {
        // ScaleOnly works from the single initial measurement; the other
        // policy re-measures at the live font size every time around
        if options.policy == FitPolicy::FontSizePlusScale {
            extents = measure.extents(text, font_size);
        }

        let width = *extents.width * scale_x;
        let height = *extents.height * scale_y;

        // exactly one condition fires per iteration, first match wins; the
        // order decides which axis is corrected first and thereby the final
        // aspect ratio
        let adjusted = match options.policy {
            FitPolicy::ScaleOnly => {
                if width < rect_width * FIT_BAND_LOWER {
                    scale_x *= GROW;
                    true
                } else if width > rect_width * FIT_BAND_UPPER {
                    scale_x *= SHRINK;
                    true
                } else if height < rect_height * FIT_BAND_LOWER {
                    scale_y *= GROW;
                    true
                } else if height > rect_height * FIT_BAND_UPPER {
                    scale_y *= SHRINK;
                    true
                } else {
                    false
                }
            }
            FitPolicy::FontSizePlusScale => {
                let narrow = width < rect_width * FIT_BAND_LOWER;
                let short = height < rect_height * FIT_BAND_LOWER;
                if narrow && short {
                    font_size = font_size * GROW;
                    true
                } else if narrow {
                    scale_x *= GROW;
                    true
                } else if short {
                    scale_y *= GROW;
                    true
                } else if width > rect_width * FIT_BAND_UPPER {
                    scale_x *= SHRINK;
                    true
                } else if height > rect_height * FIT_BAND_UPPER {
                    scale_y *= SHRINK;
                    true
                } else {
                    false
                }
            }
        };

        if !adjusted {
            log::trace!(
                "fit converged after {iteration} iterations: size={font_size} scale=({scale_x}, {scale_y})"
            );
            converged = true;
            break;
        }
    }

    // center the ink box, not the baseline origin: the bearings are the
    // offset between the two
    let draw_x = Pt(0.0) - extents.width / 2.0 - extents.x_bearing;
    let draw_y = Pt(0.0) - extents.height / 2.0 - extents.y_bearing;

    let best = FitResult {
        font_size,
        scale_x,
        scale_y,
        draw_x,
        draw_y,
    };

    if converged {
        Ok(best)
    } else {
        log::debug!(
            "fit did not converge within {} iterations: size={font_size} scale=({scale_x}, {scale_y})",
            options.max_iterations
        );
        Err(FitError::NonConvergence {
            iterations: options.max_iterations,
            best,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::TextExtents;
    use std::cell::Cell;

    /// Extents that never change, no matter the requested size. What
    /// [FitPolicy::ScaleOnly] effectively sees.
    struct FixedExtents(TextExtents);

    impl MeasureText for FixedExtents {
        fn extents(&self, _text: &str, _size: Pt) -> TextExtents {
            self.0
        }
    }

    /// Extents proportional to the font size, like a real face.
    struct LinearMetrics {
        width_per_pt: f32,
        height_per_pt: f32,
    }

    impl MeasureText for LinearMetrics {
        fn extents(&self, _text: &str, size: Pt) -> TextExtents {
            TextExtents {
                width: size * self.width_per_pt,
                height: size * self.height_per_pt,
                x_bearing: Pt(0.0),
                y_bearing: Pt(0.0),
            }
        }
    }

    struct CountingMeasure<M> {
        inner: M,
        calls: Cell<usize>,
    }

    impl<M: MeasureText> MeasureText for CountingMeasure<M> {
        fn extents(&self, text: &str, size: Pt) -> TextExtents {
            self.calls.set(self.calls.get() + 1);
            self.inner.extents(text, size)
        }
    }

    fn rect(w: f32, h: f32) -> Rect {
        Rect::new(Pt(0.0), Pt(0.0), Pt(w), Pt(h))
    }

    fn fixed(w: f32, h: f32) -> FixedExtents {
        FixedExtents(TextExtents {
            width: Pt(w),
            height: Pt(h),
            x_bearing: Pt(0.0),
            y_bearing: Pt(0.0),
        })
    }

    fn assert_in_band(value: f32, target: f32) {
        assert!(
            value >= target * FIT_BAND_LOWER && value <= target * FIT_BAND_UPPER,
            "{value} outside [{}, {}]",
            target * FIT_BAND_LOWER,
            target * FIT_BAND_UPPER
        );
    }

    #[test]
    fn scale_only_lands_both_axes_in_band() {
        let cases = [
            (100.0, 50.0, 7.0, 9.0),
            (10.0, 400.0, 300.0, 2.0),
            (50.0, 50.0, 50.0, 50.0),
            (595.0 / 3.0, 842.0 / 2.0, 38.0, 41.0),
            (1000.0, 1.0, 0.5, 800.0),
        ];
        for (rw, rh, w, h) in cases {
            let result = fit(&fixed(w, h), "x", rect(rw, rh), Pt(40.0), &FitOptions::default())
                .expect("scale-only fit converges");
            assert_in_band(w * result.scale_x, rw);
            assert_in_band(h * result.scale_y, rh);
            assert_eq!(result.font_size, Pt(40.0), "scale-only never touches the size");
        }
    }

    #[test]
    fn scale_only_measures_exactly_once() {
        let measure = CountingMeasure {
            inner: fixed(7.0, 9.0),
            calls: Cell::new(0),
        };
        fit(&measure, "x", rect(100.0, 50.0), Pt(40.0), &FitOptions::default()).unwrap();
        assert_eq!(measure.calls.get(), 1);
    }

    #[test]
    fn in_band_input_converges_without_adjustment() {
        let result = fit(&fixed(100.0, 50.0), "x", rect(100.0, 50.0), Pt(12.0), &FitOptions::default())
            .unwrap();
        assert_eq!(result.scale_x, 1.0);
        assert_eq!(result.scale_y, 1.0);
    }

    #[test]
    fn centering_with_zero_bearings_is_half_the_ink_box() {
        let result = fit(&fixed(100.0, 50.0), "x", rect(100.0, 50.0), Pt(12.0), &FitOptions::default())
            .unwrap();
        assert_eq!(result.draw_x, Pt(-50.0));
        assert_eq!(result.draw_y, Pt(-25.0));
    }

    #[test]
    fn bearings_are_cancelled_out_of_the_origin() {
        let measure = FixedExtents(TextExtents {
            width: Pt(100.0),
            height: Pt(50.0),
            x_bearing: Pt(5.0),
            y_bearing: Pt(-10.0),
        });
        let result = fit(&measure, "x", rect(100.0, 50.0), Pt(12.0), &FitOptions::default()).unwrap();
        assert_eq!(result.draw_x, Pt(-55.0));
        assert_eq!(result.draw_y, Pt(-15.0));
    }

    #[test]
    fn empty_text_is_rejected_immediately() {
        let err = fit(&fixed(7.0, 9.0), "", rect(100.0, 50.0), Pt(40.0), &FitOptions::default())
            .unwrap_err();
        assert!(matches!(err, FitError::EmptyText));
    }

    #[test]
    fn inkless_text_is_rejected_immediately() {
        let err = fit(&fixed(0.0, 0.0), "   ", rect(100.0, 50.0), Pt(40.0), &FitOptions::default())
            .unwrap_err();
        assert!(matches!(err, FitError::EmptyText));
    }

    #[test]
    fn degenerate_rectangles_are_rejected() {
        for (w, h) in [(0.0, 50.0), (100.0, 0.0), (-10.0, 50.0), (f32::NAN, 50.0)] {
            let err = fit(&fixed(7.0, 9.0), "x", rect(w, h), Pt(40.0), &FitOptions::default())
                .unwrap_err();
            assert!(matches!(err, FitError::DegenerateRectangle { .. }), "{w}x{h}");
        }
    }

    #[test]
    fn iteration_cap_surfaces_best_found_so_far() {
        let options = FitOptions {
            max_iterations: 3,
            ..Default::default()
        };
        let err = fit(&fixed(1.0, 50.0), "x", rect(1000.0, 50.0), Pt(40.0), &options).unwrap_err();
        match err {
            FitError::NonConvergence { iterations, best } => {
                assert_eq!(iterations, 3);
                // three growth steps were applied before the cap hit
                assert!((best.scale_x - 1.1f32.powi(3)).abs() < 1e-5);
                assert_eq!(best.scale_y, 1.0);
            }
            other => panic!("expected NonConvergence, got {other:?}"),
        }
    }

    #[test]
    fn grow_policy_grows_font_size_while_both_axes_are_under() {
        let measure = LinearMetrics {
            width_per_pt: 0.5,
            height_per_pt: 0.5,
        };
        let options = FitOptions::with_policy(FitPolicy::FontSizePlusScale);
        let result = fit(&measure, "x", rect(100.0, 100.0), Pt(10.0), &options).unwrap();
        assert!(result.font_size > Pt(10.0));
        assert_in_band(*result.font_size * 0.5 * result.scale_x, 100.0);
        assert_in_band(*result.font_size * 0.5 * result.scale_y, 100.0);
    }

    #[test]
    fn grow_policy_tops_up_single_axis_with_scale() {
        // wide and flat: width reaches the band first, height needs scale
        let measure = LinearMetrics {
            width_per_pt: 1.0,
            height_per_pt: 0.1,
        };
        let options = FitOptions::with_policy(FitPolicy::FontSizePlusScale);
        let result = fit(&measure, "x", rect(100.0, 100.0), Pt(10.0), &options).unwrap();
        assert!(result.scale_y > 1.0);
        assert_in_band(*result.font_size * 1.0 * result.scale_x, 100.0);
        assert_in_band(*result.font_size * 0.1 * result.scale_y, 100.0);
    }

    #[test]
    fn grow_policy_shrinks_an_initial_overshoot() {
        let measure = LinearMetrics {
            width_per_pt: 2.0,
            height_per_pt: 0.2,
        };
        let options = FitOptions::with_policy(FitPolicy::FontSizePlusScale);
        let result = fit(&measure, "x", rect(100.0, 100.0), Pt(100.0), &options).unwrap();
        assert!(result.scale_x < 1.0, "width starts at 200, must shrink");
        assert_in_band(*result.font_size * 2.0 * result.scale_x, 100.0);
        assert_in_band(*result.font_size * 0.2 * result.scale_y, 100.0);
    }

    #[test]
    fn grow_policy_remeasures_every_iteration() {
        let measure = CountingMeasure {
            inner: LinearMetrics {
                width_per_pt: 0.5,
                height_per_pt: 0.5,
            },
            calls: Cell::new(0),
        };
        let options = FitOptions::with_policy(FitPolicy::FontSizePlusScale);
        fit(&measure, "x", rect(100.0, 100.0), Pt(10.0), &options).unwrap();
        assert!(measure.calls.get() > 2);
    }

    #[test]
    fn extreme_ratios_converge_within_the_default_cap() {
        // one million to one on both axes
        let result = fit(
            &fixed(0.001, 1000.0),
            "x",
            rect(1000.0, 0.001),
            Pt(40.0),
            &FitOptions::default(),
        )
        .expect("still converges");
        assert_in_band(0.001 * result.scale_x, 1000.0);
        assert_in_band(1000.0 * result.scale_y, 0.001);
    }
}
