//! A single fixed-size PDF page that text can be fitted onto.

use crate::{
    draw::RenderContext,
    font::Font,
    pagesize::PageSize,
    rect::Rect,
    refs::{ObjectReferences, RefType},
    transform::Transform,
    FitError, Pt,
};
use id_arena::{Arena, Id};
use pdf_writer::{Content, Finish, Name, Pdf, Ref, Str};
use std::io::Write;

/// A fixed-size page with a content stream and a set of embedded fonts.
///
/// The surface is the crate's concrete [RenderContext]: transform scopes map
/// to `q`/`Q`, translate/scale to `cm`, and `show_text` to a
/// `BT … Tf Td Tj … ET` block with Identity-H glyph encoding. Raw access to
/// the underlying [Content] stream stays open via [Surface::content] for
/// driver-level drawing (rules, borders, and other non-text marks).
///
/// Once everything is placed, [Surface::write] emits the complete
/// single-page PDF.
pub struct Surface {
    media_box: Rect,
    fonts: Arena<Font>,
    content: Content,
    cursor: (Pt, Pt),
    font: Option<(Id<Font>, Pt)>,
}

impl Surface {
    /// Create a surface of the given page size, with its origin at the
    /// bottom-left
    pub fn new(size: PageSize) -> Surface {
        Surface {
            media_box: Rect::from_page_size(size),
            fonts: Arena::new(),
            content: Content::new(),
            cursor: (Pt(0.0), Pt(0.0)),
            font: None,
        }
    }

    /// The full page area
    pub fn bounds(&self) -> Rect {
        self.media_box
    }

    /// Add a font to the surface so text can be measured against it and
    /// drawn with it. The font is embedded in the written PDF.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Borrow a previously added font, typically to use it as the
    /// measurement side of a [crate::fit] call
    pub fn font(&self, id: Id<Font>) -> &Font {
        &self.fonts[id]
    }

    /// Select the font (and its size) that subsequent [RenderContext::show_text]
    /// calls draw with
    pub fn set_font(&mut self, id: Id<Font>, size: Pt) {
        self.font = Some((id, size));
    }

    /// Raw access to the page's content stream for drawing that the fit
    /// engine does not cover
    pub fn content(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Write the surface out as a complete single-page PDF
    pub fn write<W: Write>(self, mut w: W) -> Result<(), FitError> {
        let Surface {
            media_box,
            fonts,
            content,
            ..
        } = self;

        log::debug!(
            "writing pdf: {} x {} pt, {} font(s)",
            media_box.width(),
            media_box.height(),
            fonts.len()
        );

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);
        let page_id = refs.gen(RefType::Page);

        let mut writer = Pdf::new();

        let font_refs: Vec<(usize, Ref)> = fonts
            .iter()
            .map(|(id, font)| (id.index(), font.write(&mut refs, id.index(), &mut writer)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(1)
            .kids([page_id]);

        let mut page = writer.page(page_id);
        page.media_box(media_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs.iter() {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), *font_ref);
        }
        resource_fonts.finish();
        resources.finish();

        let content_id = refs.gen(RefType::PageContent);
        page.contents(content_id);
        page.finish();

        writer.stream(content_id, &content.finish());

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

impl RenderContext for Surface {
    fn save(&mut self) {
        self.content.save_state();
    }

    fn restore(&mut self) {
        self.content.restore_state();
    }

    fn translate(&mut self, dx: Pt, dy: Pt) {
        Transform::translate(dx, dy).write_to_content(&mut self.content);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        Transform::scale(sx, sy).write_to_content(&mut self.content);
    }

    fn set_font_size(&mut self, size: Pt) {
        if let Some((_, current)) = &mut self.font {
            *current = size;
        }
    }

    fn move_to(&mut self, x: Pt, y: Pt) {
        self.cursor = (x, y);
    }

    fn show_text(&mut self, text: &str) -> Result<(), FitError> {
        let (id, size) = self.font.ok_or(FitError::FontNotSet)?;
        let font = &self.fonts[id];

        // Identity-H: two big-endian bytes per glyph id
        let mut glyphs: Vec<u8> = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            glyphs.extend_from_slice(&font.fallback_glyph_id(ch).to_be_bytes());
        }

        self.content.begin_text();
        self.content
            .set_font(Name(format!("F{}", id.index()).as_bytes()), *size);
        self.content.next_line(*self.cursor.0, *self.cursor.1);
        self.content.show(Str(&glyphs));
        self.content.end_text();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn writes_a_wellformed_empty_pdf() {
        let surface = Surface::new(pagesize::A4);
        let mut out: Vec<u8> = Vec::new();
        surface.write(&mut out).unwrap();
        assert!(out.starts_with(b"%PDF-"));
        assert!(out.ends_with(b"%%EOF\n") || out.ends_with(b"%%EOF"));
    }

    #[test]
    fn bounds_cover_the_page() {
        let surface = Surface::new(pagesize::LETTER);
        let bounds = surface.bounds();
        assert_eq!(bounds.x1, Pt(0.0));
        assert_eq!(bounds.y1, Pt(0.0));
        assert_eq!(bounds.width(), pagesize::LETTER.0);
        assert_eq!(bounds.height(), pagesize::LETTER.1);
    }

    #[test]
    fn showing_text_without_a_font_fails() {
        let mut surface = Surface::new(pagesize::A4);
        let err = surface.show_text("x").unwrap_err();
        assert!(matches!(err, FitError::FontNotSet));
    }

    #[test]
    fn transform_scopes_emit_paired_operators() {
        let mut surface = Surface::new(pagesize::A4);
        surface.save();
        surface.translate(Pt(10.0), Pt(20.0));
        surface.scale(2.0, 0.5);
        surface.restore();
        let mut out: Vec<u8> = Vec::new();
        surface.write(&mut out).unwrap();
        let pdf = String::from_utf8_lossy(&out);
        assert!(pdf.contains("q"), "missing save operator");
        assert!(pdf.contains("Q"), "missing restore operator");
        assert!(pdf.contains("cm"), "missing transform operator");
    }
}
