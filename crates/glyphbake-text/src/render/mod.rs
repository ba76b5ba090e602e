//! Glyph rendering module

mod atlas;
mod baker;
mod compositor;
mod rasterizer;

pub use atlas::GlyphAtlas;
pub use baker::{BakedFont, BakedGlyphMetric, FontAtlasBaker};
pub use compositor::Compositor;
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
