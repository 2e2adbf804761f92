//! Splits multi-line text into normalized lines and autofits each line into
//! a horizontal band of the page, growing the font size before falling back
//! to per-axis scaling.
//!
//! Usage: `cargo run --example fit-lines -- <font.ttf-or-otf> [text]`

use text_autofit::pagesize::{self, PageOrientation};
use text_autofit::segment;
use text_autofit::{draw_fitted, fit, FitError, FitOptions, FitPolicy, Font, In, Pt, Surface};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font_path = args
        .next()
        .expect("usage: fit-lines <font.ttf-or-otf> [text]");
    let text = args
        .next()
        .unwrap_or_else(|| "第一行\r\nSecond line\n三行目".to_string());

    let mut surface = Surface::new(pagesize::A4.landscape());
    let font_id = surface
        .add_font(Font::load(std::fs::read(font_path).expect("can read font file")).unwrap());
    surface.set_font(font_id, Pt(12.0));

    let lines: Vec<&str> = segment::lines(&text).collect();
    let bands = surface.bounds().inset(In(0.5)).cells(lines.len(), 1);

    let options = FitOptions::with_policy(FitPolicy::FontSizePlusScale);
    for (line, band) in lines.iter().copied().zip(bands) {
        let result = match fit(surface.font(font_id), line, band, Pt(12.0), &options) {
            Ok(result) => result,
            Err(FitError::NonConvergence { best, .. }) => best,
            Err(err) => {
                // empty lines have nothing to fit; keep going with the rest
                eprintln!("skipping {line:?}: {err}");
                continue;
            }
        };
        draw_fitted(&mut surface, line, band, &result).unwrap();
    }

    let out = std::fs::File::create("fit-lines.pdf").unwrap();
    surface.write(out).unwrap();
}
