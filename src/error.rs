use crate::fit::FitResult;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum FitError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    /// The target rectangle has a zero, negative, or non-finite dimension;
    /// fitting into it would produce a non-finite scale
    #[error("rectangle has a degenerate dimension ({width} x {height})")]
    DegenerateRectangle { width: f32, height: f32 },

    /// The text unit is empty, or measures with no ink at all (e.g. only
    /// whitespace); there is nothing to fit
    #[error("text is empty or has no measurable ink")]
    EmptyText,

    /// The fit loop hit its iteration cap before both axes landed in the
    /// fit band. `best` holds the last parameters found, so callers can
    /// still draw something reasonable instead of aborting the whole page
    #[error("fit did not converge within {iterations} iterations")]
    NonConvergence { iterations: usize, best: FitResult },

    /// Text was drawn on a surface before any font was selected
    #[error("no font has been selected on the surface")]
    FontNotSet,
}
