//! The drawing contract between the fit engine and rendering backends, and
//! the centered-draw sequence itself.

use crate::error::FitError;
use crate::fit::{fit, FitOptions, FitResult};
use crate::measure::MeasureText;
use crate::rect::Rect;
use crate::units::Pt;

/// The primitives the engine needs from a rendering backend to place text.
///
/// `save`/`restore` bracket a transform scope and must nest correctly,
/// restoring exactly the prior state. Within a scope the engine applies, in
/// order: translate, scale, font size, move-to, show-text.
pub trait RenderContext {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: Pt, dy: Pt);
    fn scale(&mut self, sx: f32, sy: f32);
    fn set_font_size(&mut self, size: Pt);
    fn move_to(&mut self, x: Pt, y: Pt);
    fn show_text(&mut self, text: &str) -> Result<(), FitError>;
}

/// A transform scope that restores the context when dropped, so the
/// save/restore pairing holds on every exit path — including when glyph
/// emission fails partway through a draw.
pub struct TransformScope<'a, C: RenderContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: RenderContext + ?Sized> TransformScope<'a, C> {
    pub fn enter(ctx: &'a mut C) -> Self {
        ctx.save();
        TransformScope { ctx }
    }
}

impl<C: RenderContext + ?Sized> Drop for TransformScope<'_, C> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}

impl<C: RenderContext + ?Sized> std::ops::Deref for TransformScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: RenderContext + ?Sized> std::ops::DerefMut for TransformScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

/// Draw `text` into `rect` using a previously computed [FitResult].
///
/// The whole placement is one atomic visual operation inside a transform
/// scope: translate to the rectangle center, apply the fitted scale and font
/// size, move to the centered origin, and emit the glyphs.
///
/// The result must have been produced by [fit] for this exact text and
/// rectangle (and the same font the context will draw with).
pub fn draw_fitted<C: RenderContext + ?Sized>(
    ctx: &mut C,
    text: &str,
    rect: Rect,
    result: &FitResult,
) -> Result<(), FitError> {
    let (cx, cy) = rect.center();

    let mut scope = TransformScope::enter(ctx);
    scope.translate(cx, cy);
    scope.scale(result.scale_x, result.scale_y);
    scope.set_font_size(result.font_size);
    scope.move_to(result.draw_x, result.draw_y);
    scope.show_text(text)?;
    Ok(())
}

/// Fit and draw in one call, for callers whose measurer is separate from
/// their drawing context. Returns the [FitResult] actually drawn with.
pub fn draw_centered<C, M>(
    ctx: &mut C,
    measure: &M,
    text: &str,
    rect: Rect,
    font_size: Pt,
    options: &FitOptions,
) -> Result<FitResult, FitError>
where
    C: RenderContext + ?Sized,
    M: MeasureText + ?Sized,
{
    let result = fit(measure, text, rect, font_size, options)?;
    draw_fitted(ctx, text, rect, &result)?;
    Ok(result)
}
