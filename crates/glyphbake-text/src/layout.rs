//! Glyph layout
//!
//! Turns baked metrics and a codepoint sequence into source/destination
//! rectangle pairs. Left-to-right, single line, no shaping. The only state
//! carried between calls is the explicit [`Cursor`].

use serde::{Deserialize, Serialize};

use crate::render::{BakedFont, BakedGlyphMetric};
use crate::Result;

pub use crate::geometry::PixelRect;

/// Pen position; `y` is the baseline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

impl Cursor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Copy `src` (atlas pixels) to `dst` (surface pixels); sizes are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawCommand {
    pub src: PixelRect,
    pub dst: PixelRect,
}

/// Round to the nearest pixel, halves rounding up
fn round_px(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Lays glyphs out against a baked font's metrics
#[derive(Debug, Clone, Copy)]
pub struct GlyphLayoutEngine<'a> {
    font: &'a BakedFont,
}

impl<'a> GlyphLayoutEngine<'a> {
    pub fn new(font: &'a BakedFont) -> Self {
        Self { font }
    }

    /// Build the draw command for one glyph at `cursor`
    pub fn quad(metric: &BakedGlyphMetric, cursor: Cursor) -> DrawCommand {
        let src = metric.texel_rect();
        let dst = PixelRect::new(
            round_px(cursor.x + metric.xoff0),
            round_px(cursor.y + metric.yoff0),
            src.width,
            src.height,
        );
        DrawCommand { src, dst }
    }

    /// Place one codepoint and advance the cursor
    ///
    /// Fails with `GlyphRange` without touching the cursor when the
    /// codepoint was not baked.
    pub fn place(&self, codepoint: u32, cursor: &mut Cursor) -> Result<DrawCommand> {
        let metric = self.font.glyph(codepoint)?;
        let command = Self::quad(metric, *cursor);
        cursor.x += metric.xadvance;
        Ok(command)
    }

    /// Lay out a codepoint sequence starting at `start`
    ///
    /// Returns the draw commands in input order and the end cursor, which
    /// can be passed back in to continue the same line.
    pub fn layout<I>(&self, codepoints: I, start: Cursor) -> Result<(Vec<DrawCommand>, Cursor)>
    where
        I: IntoIterator<Item = u32>,
    {
        let codepoints = codepoints.into_iter();
        let mut commands = Vec::with_capacity(codepoints.size_hint().0);
        let mut cursor = start;

        for codepoint in codepoints {
            commands.push(self.place(codepoint, &mut cursor)?);
        }

        Ok((commands, cursor))
    }

    /// Lay out the characters of a string
    pub fn layout_str(&self, text: &str, start: Cursor) -> Result<(Vec<DrawCommand>, Cursor)> {
        self.layout(text.chars().map(u32::from), start)
    }

    /// Total advance of a sequence without emitting commands
    pub fn measure<I>(&self, codepoints: I) -> Result<f32>
    where
        I: IntoIterator<Item = u32>,
    {
        codepoints
            .into_iter()
            .try_fold(0.0_f32, |width, cp| -> Result<f32> {
                Ok(width + self.font.glyph(cp)?.xadvance)
            })
    }
}
