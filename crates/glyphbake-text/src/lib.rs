//! glyphbake Text - Baked Font Atlas Rendering
//!
//! This crate renders short strings from a font that is rasterized once:
//! - Font face ownership and metrics (ttf-parser)
//! - Glyph rasterization (tiny-skia) and shelf packing into a greyscale atlas
//! - Glyph layout into source/destination rectangle pairs
//! - Compositing of atlas regions onto a destination surface
//!
//! Data flows baker → layout → compositor:
//!
//! ```text
//! FontFace ──► FontAtlasBaker::bake ──► BakedFont { GlyphAtlas, metrics }
//!                                           │
//!       text, Cursor ──► GlyphLayoutEngine ─┴─► Vec<DrawCommand>, Cursor
//!                                                   │
//!                               Compositor::composite ──► Surface
//! ```

pub mod config;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod surface;

pub use config::BakeConfig;
pub use font::{FontFace, LineMetrics};
pub use geometry::PixelRect;
pub use layout::{Cursor, DrawCommand, GlyphLayoutEngine};
pub use pipeline::{MissingGlyph, TextPipeline};
pub use render::{BakedFont, BakedGlyphMetric, Compositor, FontAtlasBaker, GlyphAtlas, GlyphRasterizer, RasterizedGlyph};
pub use surface::{Color, PixelFormat, Surface};

/// Text rendering error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextError {
    #[error("Atlas overflow: codepoint {codepoint} does not fit in a {atlas_width}x{atlas_height} atlas")]
    AtlasOverflow {
        codepoint: u32,
        atlas_width: u32,
        atlas_height: u32,
    },

    #[error("Codepoint {codepoint} outside baked range ({count} glyphs from {first})")]
    GlyphRange {
        codepoint: u32,
        first: u32,
        count: u32,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Rasterization failed: {0}")]
    Rasterization(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
