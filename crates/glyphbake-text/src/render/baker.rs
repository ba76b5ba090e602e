//! Font atlas baking
//!
//! Rasterizes every codepoint of the configured range once and packs the
//! bitmaps into a single [`GlyphAtlas`], recording per-glyph placement and
//! metrics. Baking is deterministic: the same font and [`BakeConfig`]
//! always produce the same atlas.

use tracing::{debug, trace, warn};

use super::atlas::{GlyphAtlas, ShelfPacker};
use super::rasterizer::GlyphRasterizer;
use crate::config::BakeConfig;
use crate::font::{FontFace, LineMetrics};
use crate::geometry::PixelRect;
use crate::{Result, TextError};

/// Placement and metrics of one baked glyph
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BakedGlyphMetric {
    /// Texel rectangle in atlas pixels (x1/y1 exclusive)
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    /// Quad corners relative to the pen on the baseline, y down
    pub xoff0: f32,
    pub yoff0: f32,
    pub xoff1: f32,
    pub yoff1: f32,
    /// Horizontal advance in pixels
    pub xadvance: f32,
}

impl BakedGlyphMetric {
    pub fn width(&self) -> u32 {
        u32::from(self.x1 - self.x0)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.y1 - self.y0)
    }

    /// Texel rectangle as a pixel rect
    pub fn texel_rect(&self) -> PixelRect {
        PixelRect::new(i32::from(self.x0), i32::from(self.y0), self.width(), self.height())
    }

    /// Normalized texture coordinates `(s0, t0, s1, t1)`
    pub fn uv(&self, atlas_width: u32, atlas_height: u32) -> (f32, f32, f32, f32) {
        let ipw = 1.0 / atlas_width as f32;
        let iph = 1.0 / atlas_height as f32;
        (
            f32::from(self.x0) * ipw,
            f32::from(self.y0) * iph,
            f32::from(self.x1) * ipw,
            f32::from(self.y1) * iph,
        )
    }
}

/// Result of a bake: the atlas plus one metric per codepoint
#[derive(Debug, Clone, PartialEq)]
pub struct BakedFont {
    atlas: GlyphAtlas,
    metrics: Vec<BakedGlyphMetric>,
    first_codepoint: u32,
    pixel_height: u32,
    line_metrics: LineMetrics,
}

impl BakedFont {
    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    /// Metrics indexed by `codepoint - first_codepoint`
    pub fn metrics(&self) -> &[BakedGlyphMetric] {
        &self.metrics
    }

    pub fn first_codepoint(&self) -> u32 {
        self.first_codepoint
    }

    pub fn glyph_count(&self) -> u32 {
        self.metrics.len() as u32
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn line_metrics(&self) -> LineMetrics {
        self.line_metrics
    }

    /// Check whether a codepoint was baked
    pub fn contains(&self, codepoint: u32) -> bool {
        codepoint
            .checked_sub(self.first_codepoint)
            .is_some_and(|index| (index as usize) < self.metrics.len())
    }

    /// Metric for a codepoint, `GlyphRange` when it was not baked
    pub fn glyph(&self, codepoint: u32) -> Result<&BakedGlyphMetric> {
        codepoint
            .checked_sub(self.first_codepoint)
            .and_then(|index| self.metrics.get(index as usize))
            .ok_or(TextError::GlyphRange {
                codepoint,
                first: self.first_codepoint,
                count: self.glyph_count(),
            })
    }
}

/// Bakes one font at one pixel height into an atlas
pub struct FontAtlasBaker {
    config: BakeConfig,
    rasterizer: GlyphRasterizer,
}

impl FontAtlasBaker {
    pub fn new(config: BakeConfig) -> Self {
        Self {
            config,
            rasterizer: GlyphRasterizer::new(),
        }
    }

    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    /// Rasterize and pack the configured range
    ///
    /// Takes the font by value: the blob is dropped when this returns,
    /// including on `AtlasOverflow`.
    pub fn bake(&self, font: FontFace) -> Result<BakedFont> {
        let config = &self.config;
        config.validate()?;

        let face = font.parse(config.face_index)?;
        let scale = face.scale_for_pixel_height(config.pixel_height as f32)?;

        let mut atlas = GlyphAtlas::new(config.atlas_width, config.atlas_height);
        let mut packer = ShelfPacker::new(config.atlas_width, config.atlas_height);
        let mut metrics = Vec::with_capacity(config.glyph_count as usize);

        for codepoint in config.first_codepoint..config.end_codepoint() {
            let glyph = face.glyph_for_codepoint(codepoint);
            let raster = self.rasterizer.rasterize(&face, glyph, scale)?;
            let (gw, gh) = (raster.width(), raster.height());

            let Some((x, y)) = packer.place(gw, gh) else {
                warn!(
                    codepoint,
                    glyph_width = gw,
                    glyph_height = gh,
                    baked = metrics.len(),
                    "atlas overflow"
                );
                return Err(TextError::AtlasOverflow {
                    codepoint,
                    atlas_width: config.atlas_width,
                    atlas_height: config.atlas_height,
                });
            };

            atlas.write_glyph(x, y, &raster.bitmap, gw, gh);

            // Atlas sides are validated to fit u16
            let metric = BakedGlyphMetric {
                x0: x as u16,
                y0: y as u16,
                x1: (x + gw) as u16,
                y1: (y + gh) as u16,
                xoff0: raster.bbox.x0 as f32,
                yoff0: raster.bbox.y0 as f32,
                xoff1: (raster.bbox.x0 + gw as i32) as f32,
                yoff1: (raster.bbox.y0 + gh as i32) as f32,
                xadvance: f32::from(face.glyph_hor_advance(glyph)) * scale,
            };
            trace!(codepoint, glyph = glyph.0, x, y, w = gw, h = gh, "placed glyph");
            metrics.push(metric);
        }

        atlas.set_used_height(packer.bottom());
        let line_metrics = face.line_metrics(scale);

        debug!(
            glyphs = metrics.len(),
            shelves = packer.shelves(),
            used_height = atlas.used_height(),
            atlas_width = config.atlas_width,
            atlas_height = config.atlas_height,
            "baked font atlas"
        );

        Ok(BakedFont {
            atlas,
            metrics,
            first_codepoint: config.first_codepoint,
            pixel_height: config.pixel_height,
            line_metrics,
        })
    }
}
