//! Glyph rasterization

use ttf_parser::{GlyphId, OutlineBuilder};

use crate::font::{GlyphBox, ParsedFace};
use crate::{Result, TextError};

/// A rasterized glyph
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// Glyph ID
    pub glyph_id: u16,
    /// Pixel box relative to the pen origin on the baseline
    pub bbox: GlyphBox,
    /// Grayscale coverage bitmap (1 byte per pixel, row-major)
    pub bitmap: Vec<u8>,
}

impl RasterizedGlyph {
    /// Create an empty glyph
    pub fn empty(glyph_id: u16) -> Self {
        Self {
            glyph_id,
            bbox: GlyphBox::default(),
            bitmap: Vec::new(),
        }
    }

    /// Bitmap width
    pub fn width(&self) -> u32 {
        self.bbox.width()
    }

    /// Bitmap height
    pub fn height(&self) -> u32 {
        self.bbox.height()
    }
}

/// Glyph rasterizer using tiny-skia
pub struct GlyphRasterizer {
    /// Fill with anti-aliasing
    pub anti_alias: bool,
}

impl GlyphRasterizer {
    /// Create a new rasterizer
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    /// Rasterize a glyph at `scale` (pixels per font unit)
    pub fn rasterize(&self, face: &ParsedFace<'_>, glyph: GlyphId, scale: f32) -> Result<RasterizedGlyph> {
        let bbox = face.glyph_box(glyph, scale);
        if bbox.is_empty() {
            return Ok(RasterizedGlyph::empty(glyph.0));
        }

        let mut builder = PathBuilder::new(scale, bbox.x0 as f32, bbox.y0 as f32);
        if face.ttf_face().outline_glyph(glyph, &mut builder).is_none() {
            return Ok(RasterizedGlyph::empty(glyph.0));
        }
        let Some(path) = builder.finish() else {
            return Ok(RasterizedGlyph::empty(glyph.0));
        };

        let mut pixmap = tiny_skia::Pixmap::new(bbox.width(), bbox.height()).ok_or_else(|| {
            TextError::Rasterization(format!(
                "cannot allocate {}x{} pixmap for glyph {}",
                bbox.width(),
                bbox.height(),
                glyph.0
            ))
        })?;

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(tiny_skia::Color::WHITE);
        paint.anti_alias = self.anti_alias;

        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );

        // White fill: coverage is the alpha channel
        let bitmap: Vec<u8> = pixmap.pixels().iter().map(|p| p.alpha()).collect();

        Ok(RasterizedGlyph {
            glyph_id: glyph.0,
            bbox,
            bitmap,
        })
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Path builder that converts ttf-parser outlines to tiny-skia paths
///
/// Font units are scaled, flipped to y-down and shifted so the glyph box's
/// top-left corner lands on the pixmap origin.
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl PathBuilder {
    fn new(scale: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            scale,
            offset_x,
            offset_y,
        }
    }

    fn transform_x(&self, x: f32) -> f32 {
        x * self.scale - self.offset_x
    }

    fn transform_y(&self, y: f32) -> f32 {
        -y * self.scale - self.offset_y
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.transform_x(x), self.transform_y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.transform_x(x), self.transform_y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x2), self.transform_y(y2),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
