use crate::{
    measure::{MeasureText, TextExtents},
    refs::{ObjectReferences, RefType},
    FitError, Pt,
};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};

/// A parsed font. Fonts can be TTF or OTF and are embedded in their entirety
/// in any PDF written through a [crate::Surface], so large fonts will grow
/// the output accordingly.
///
/// Besides embedding, a font is the concrete measurement collaborator: it
/// implements [MeasureText] from its glyph advances and bounding boxes, which
/// is what the fit engine queries while searching for a scale.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the face could not
    /// be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, FitError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// The scale factor from font units to points at the given size
    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the
    /// font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of
    /// the font) for the given font size. Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Look up the glyph for a character, if the face has one
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph a character falls back to when the face has no glyph for
    /// it: U+FFFD if present, otherwise '?', otherwise .notdef
    pub fn fallback_glyph_id(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// The gid → char mapping of every mapped glyph, sorted by glyph id.
    fn glyph_table(&self) -> Vec<(u16, char)> {
        let face = self.face.as_face_ref();
        let mut table: Vec<(u16, char)> = Vec::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|codepoint: u32| {
                    if let Ok(ch) = char::try_from(codepoint) {
                        if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                            table.push((gid.0, ch));
                        }
                    }
                });
            }
        }
        table.sort_unstable_by_key(|&(gid, _)| gid);
        table.dedup_by_key(|&mut (gid, _)| gid);
        table
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_id = self.write_font_data(refs, font_index, writer);
        let id = refs.gen(RefType::FontDescriptor(font_index));

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(format!("F{font_index}").as_bytes()));

        let mut flags: FontFlags = FontFlags::empty();
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height().unwrap_or_else(|| face.ascender()) as f32 * scaling,
        );
        // TODO: derive a real stem width from the glyph outlines
        descriptor.stem_v(80.0);
        descriptor.font_file2(font_data_id);

        id
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        let mut widths = cid_font.widths();
        // .notdef
        widths.consecutive(0, [1000.0]);

        // emit runs of consecutive glyph ids
        let mut run_start: u16 = 0;
        let mut run: Vec<f32> = Vec::new();
        for (gid, _) in self.glyph_table() {
            let advance =
                face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
            if !run.is_empty() && gid != run_start + run.len() as u16 {
                widths.consecutive(run_start, run.drain(..));
            }
            if run.is_empty() {
                run_start = gid;
            }
            run.push(advance);
        }
        if !run.is_empty() {
            widths.consecutive(run_start, run);
        }
        widths.finish();

        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks are limited to 100 entries each
        let table = self.glyph_table();
        for block in table.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let ch: u32 = ch.into();
                map.push_str(&format!("<{gid:04x}> <{ch:04x}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        id
    }

    /// Write the font as a Type0/Identity-H font with the face data embedded,
    /// returning the reference a page's resources should point at.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
        font.finish();

        font_id
    }
}

impl MeasureText for Font {
    /// Measure the ink extents of `text` at `size` from the glyph bounding
    /// boxes laid out along their horizontal advances. Characters without a
    /// glyph fall back the same way drawing does, so measurement and output
    /// agree.
    fn extents(&self, text: &str, size: Pt) -> TextExtents {
        let face = self.face.as_face_ref();
        let scaling = self.scaling(size);

        let mut cursor: f32 = 0.0;
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for ch in text.chars() {
            let gid = GlyphId(self.fallback_glyph_id(ch));
            if let Some(bbox) = face.glyph_bounding_box(gid) {
                min_x = min_x.min(cursor + bbox.x_min as f32);
                max_x = max_x.max(cursor + bbox.x_max as f32);
                min_y = min_y.min(bbox.y_min as f32);
                max_y = max_y.max(bbox.y_max as f32);
            }
            cursor += face.glyph_hor_advance(gid).unwrap_or_default() as f32;
        }

        // whitespace-only text has advances but no ink
        if !min_x.is_finite() {
            return TextExtents::default();
        }

        TextExtents {
            width: scaling * (max_x - min_x),
            height: scaling * (max_y - min_y),
            x_bearing: scaling * min_x,
            y_bearing: scaling * min_y,
        }
    }
}
