//! Text pipeline
//!
//! The explicit context threaded through baking, layout and compositing:
//! one baked font plus the policy for codepoints outside its range.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BakeConfig;
use crate::font::FontFace;
use crate::layout::{Cursor, DrawCommand, GlyphLayoutEngine};
use crate::render::{BakedFont, Compositor, FontAtlasBaker, GlyphAtlas};
use crate::surface::Surface;
use crate::{Result, TextError};

/// What to do with a codepoint that was not baked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingGlyph {
    /// Return `GlyphRange`
    #[default]
    Fail,
    /// Drop the codepoint; the cursor does not move
    Skip,
    /// Draw this codepoint instead (must itself be baked)
    Substitute(u32),
}

/// Baked font plus rendering policy
#[derive(Debug, Clone)]
pub struct TextPipeline {
    font: BakedFont,
    compositor: Compositor,
    missing_glyph: MissingGlyph,
}

impl TextPipeline {
    /// Bake `font` with `config` and wrap the result
    pub fn new(config: BakeConfig, font: FontFace) -> Result<Self> {
        let baked = FontAtlasBaker::new(config).bake(font)?;
        Ok(Self::from_baked(baked))
    }

    /// Wrap an already baked font
    pub fn from_baked(font: BakedFont) -> Self {
        Self {
            font,
            compositor: Compositor::new(),
            missing_glyph: MissingGlyph::default(),
        }
    }

    pub fn with_missing_glyph(mut self, policy: MissingGlyph) -> Self {
        self.missing_glyph = policy;
        self
    }

    pub fn missing_glyph(&self) -> MissingGlyph {
        self.missing_glyph
    }

    pub fn baked(&self) -> &BakedFont {
        &self.font
    }

    pub fn atlas(&self) -> &GlyphAtlas {
        self.font.atlas()
    }

    pub fn layout_engine(&self) -> GlyphLayoutEngine<'_> {
        GlyphLayoutEngine::new(&self.font)
    }

    /// Baseline cursor for text whose line box starts at `(x, top)`
    pub fn origin_at_top(&self, x: f32, top: f32) -> Cursor {
        Cursor::new(x, top + self.font.line_metrics().ascent)
    }

    /// Lay out `text`, applying the missing-glyph policy
    pub fn layout(&self, text: &str, start: Cursor) -> Result<(Vec<DrawCommand>, Cursor)> {
        let engine = self.layout_engine();
        let mut commands = Vec::with_capacity(text.len());
        let mut cursor = start;

        for c in text.chars() {
            let codepoint = u32::from(c);
            match engine.place(codepoint, &mut cursor) {
                Ok(command) => commands.push(command),
                Err(TextError::GlyphRange { .. }) if self.missing_glyph != MissingGlyph::Fail => {
                    match self.missing_glyph {
                        MissingGlyph::Substitute(substitute) => {
                            debug!(codepoint, substitute, "substituting unbaked codepoint");
                            commands.push(engine.place(substitute, &mut cursor)?);
                        }
                        _ => debug!(codepoint, "skipping unbaked codepoint"),
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok((commands, cursor))
    }

    /// Lay out `text` and composite it onto `surface`; returns the end cursor
    pub fn draw_text(&self, text: &str, start: Cursor, surface: &mut Surface) -> Result<Cursor> {
        let (commands, end) = self.layout(text, start)?;
        let written = self.compositor.composite(self.font.atlas(), &commands, surface);
        debug!(glyphs = commands.len(), pixels = written, "composited text");
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Color, PixelFormat};

    const FONT: &[u8] = include_bytes!("../tests/fixtures/DejaVuSansMono.ttf");

    fn pipeline() -> TextPipeline {
        TextPipeline::new(BakeConfig::default(), FontFace::from_bytes(FONT)).unwrap()
    }

    #[test]
    fn test_fail_policy_reports_range() {
        let result = pipeline().layout("a\u{1}b", Cursor::default());
        assert!(matches!(result, Err(TextError::GlyphRange { codepoint: 1, .. })));
    }

    #[test]
    fn test_skip_policy() {
        let p = pipeline().with_missing_glyph(MissingGlyph::Skip);
        let (commands, end) = p.layout("a\u{e9}b", Cursor::default()).unwrap();
        let (expected, expected_end) = p.layout("ab", Cursor::default()).unwrap();
        assert_eq!(commands, expected);
        assert_eq!(end, expected_end);
    }

    #[test]
    fn test_substitute_policy() {
        let p = pipeline().with_missing_glyph(MissingGlyph::Substitute('?' as u32));
        let (commands, _) = p.layout("\u{e9}", Cursor::default()).unwrap();
        let (expected, _) = p.layout("?", Cursor::default()).unwrap();
        assert_eq!(commands, expected);
    }

    #[test]
    fn test_unbaked_substitute_fails() {
        let p = pipeline().with_missing_glyph(MissingGlyph::Substitute(0x2603));
        assert!(p.layout("\u{e9}", Cursor::default()).is_err());
    }

    #[test]
    fn test_origin_at_top() {
        let p = pipeline();
        let origin = p.origin_at_top(4.0, 10.0);
        assert_eq!(origin.x, 4.0);
        assert!(origin.y > 10.0 && origin.y <= 10.0 + 32.0);
    }

    #[test]
    fn test_draw_text_marks_surface() {
        let p = pipeline();
        let mut surface = Surface::filled(200, 64, PixelFormat::Rgba8888, Color::RED);
        let start = p.origin_at_top(0.0, 0.0);
        let end = p.draw_text("Hi", start, &mut surface).unwrap();

        assert!(end.x > start.x);
        assert_eq!(end.y, start.y);
        let rgba = surface.to_rgba();
        assert!(rgba.chunks_exact(4).any(|px| px == [255, 255, 255, 255]));
        // Beyond the pen, the background is untouched
        assert_eq!(surface.color_at(199, 63), Some(Color::RED));
    }
}
