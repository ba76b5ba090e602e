//! Font face ownership and metrics

mod face;

pub use face::{GlyphBox, ParsedFace};

use crate::Result;

/// Raw bytes of one font file
///
/// The bytes are never mutated. Baking takes the face by value, so the blob
/// is released as soon as the bake returns, whether it succeeded or not.
#[derive(Clone)]
pub struct FontFace {
    data: Vec<u8>,
}

impl FontFace {
    /// Wrap font file bytes
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// Raw font bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the font blob in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the blob is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Parse face `index` of the blob (0 for plain font files)
    pub fn parse(&self, index: u32) -> Result<ParsedFace<'_>> {
        ParsedFace::parse(&self.data, index)
    }
}

impl From<Vec<u8>> for FontFace {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace").field("len", &self.data.len()).finish()
    }
}

/// Vertical font metrics scaled to pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Distance from baseline to the top of the line (positive)
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line (negative)
    pub descent: f32,
    /// Extra spacing between lines
    pub line_gap: f32,
}

impl LineMetrics {
    /// Baseline-to-baseline distance
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}
