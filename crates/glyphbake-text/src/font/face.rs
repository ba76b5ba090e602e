//! Parsed font face with metrics

use ttf_parser::{Face, GlyphId};

use super::LineMetrics;
use crate::{Result, TextError};

/// Integer pixel box of a scaled glyph, y growing downward from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl GlyphBox {
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Parsed font face borrowing a [`super::FontFace`] blob
pub struct ParsedFace<'a> {
    /// The underlying ttf-parser face
    face: Face<'a>,
}

impl<'a> ParsedFace<'a> {
    /// Parse a font face from data
    pub fn parse(data: &'a [u8], index: u32) -> Result<Self> {
        Face::parse(data, index)
            .map(|face| Self { face })
            .map_err(|e| TextError::FontParsing(e.to_string()))
    }

    /// Units per em
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// Ascender (above baseline)
    pub fn ascender(&self) -> i16 {
        self.face.ascender()
    }

    /// Descender (below baseline, usually negative)
    pub fn descender(&self) -> i16 {
        self.face.descender()
    }

    /// Line gap
    pub fn line_gap(&self) -> i16 {
        self.face.line_gap()
    }

    /// Scale mapping the ascender-to-descender extent onto `pixel_height`
    pub fn scale_for_pixel_height(&self, pixel_height: f32) -> Result<f32> {
        let extent = i32::from(self.ascender()) - i32::from(self.descender());
        if extent <= 0 {
            return Err(TextError::FontParsing(format!(
                "font has no vertical extent (ascender {}, descender {})",
                self.ascender(),
                self.descender()
            )));
        }
        Ok(pixel_height / extent as f32)
    }

    /// Vertical metrics in pixels for a given scale
    pub fn line_metrics(&self, scale: f32) -> LineMetrics {
        LineMetrics {
            ascent: f32::from(self.ascender()) * scale,
            descent: f32::from(self.descender()) * scale,
            line_gap: f32::from(self.line_gap()) * scale,
        }
    }

    /// Glyph for a codepoint, `.notdef` when the font lacks it
    pub fn glyph_for_codepoint(&self, codepoint: u32) -> GlyphId {
        char::from_u32(codepoint)
            .and_then(|c| self.face.glyph_index(c))
            .unwrap_or(GlyphId(0))
    }

    /// Get glyph horizontal advance in font units
    pub fn glyph_hor_advance(&self, glyph_id: GlyphId) -> u16 {
        self.face.glyph_hor_advance(glyph_id).unwrap_or(0)
    }

    /// Scaled pixel box of a glyph; empty for glyphs without an outline
    pub fn glyph_box(&self, glyph_id: GlyphId, scale: f32) -> GlyphBox {
        match self.face.glyph_bounding_box(glyph_id) {
            Some(bbox) => GlyphBox {
                x0: (f32::from(bbox.x_min) * scale).floor() as i32,
                y0: (-f32::from(bbox.y_max) * scale).floor() as i32,
                x1: (f32::from(bbox.x_max) * scale).ceil() as i32,
                y1: (-f32::from(bbox.y_min) * scale).ceil() as i32,
            },
            None => GlyphBox::default(),
        }
    }

    /// Get underlying ttf-parser face
    pub fn ttf_face(&self) -> &Face<'a> {
        &self.face
    }
}
