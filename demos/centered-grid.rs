//! Splits a string into codepoints and autofits one codepoint per cell of a
//! 2×3 grid on an A4 page, with the grid lines drawn for reference.
//!
//! Usage: `cargo run --example centered-grid -- <font.ttf-or-otf> [text]`

use text_autofit::pagesize;
use text_autofit::segment;
use text_autofit::{draw_fitted, fit, FitError, FitOptions, Font, Pt, Surface};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font_path = args
        .next()
        .expect("usage: centered-grid <font.ttf-or-otf> [text]");
    let text = args.next().unwrap_or_else(|| "テスト森鷗外".to_string());

    let mut surface = Surface::new(pagesize::A4);
    let font_id = surface
        .add_font(Font::load(std::fs::read(font_path).expect("can read font file")).unwrap());

    let (rows, cols) = (2usize, 3usize);
    let page = surface.bounds();

    // grid lines
    {
        let content = surface.content();
        content.set_line_width(3.0);
        for row in 1..rows {
            let y = *page.height() * row as f32 / rows as f32;
            content.move_to(0.0, y);
            content.line_to(*page.width(), y);
        }
        for col in 1..cols {
            let x = *page.width() * col as f32 / cols as f32;
            content.move_to(x, 0.0);
            content.line_to(x, *page.height());
        }
        content.stroke();
    }

    surface.set_font(font_id, Pt(40.0));

    let options = FitOptions::default();
    for (unit, cell) in segment::codepoints(&text).zip(page.cells(rows, cols)) {
        let result = match fit(surface.font(font_id), unit, cell, Pt(40.0), &options) {
            Ok(result) => result,
            // draw the best approximation rather than dropping the cell
            Err(FitError::NonConvergence { best, .. }) => best,
            Err(err) => {
                eprintln!("skipping {unit:?}: {err}");
                continue;
            }
        };
        draw_fitted(&mut surface, unit, cell, &result).unwrap();
    }

    let out = std::fs::File::create("centered-grid.pdf").unwrap();
    surface.write(out).unwrap();
}
