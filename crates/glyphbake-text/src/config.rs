//! Bake configuration
//!
//! One font, one pixel height, one contiguous codepoint range, one atlas.
//! Every value is range-checked by [`BakeConfig::validate`] before any
//! rasterization happens.

use serde::{Deserialize, Serialize};

use crate::{Result, TextError};

/// Largest pixel height accepted for baking
pub const MAX_PIXEL_HEIGHT: u32 = 1024;

/// One past the last Unicode scalar value
const CODEPOINT_LIMIT: u32 = 0x11_0000;

/// Parameters for a single atlas bake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Glyph pixel height (ascender to descender)
    pub pixel_height: u32,
    /// First codepoint of the baked range
    pub first_codepoint: u32,
    /// Number of consecutive codepoints to bake
    pub glyph_count: u32,
    /// Atlas width in pixels
    pub atlas_width: u32,
    /// Atlas height in pixels
    pub atlas_height: u32,
    /// Face index inside a font collection (0 for plain font files)
    pub face_index: u32,
}

impl Default for BakeConfig {
    /// Printable ASCII at 32px into a 512x512 atlas
    fn default() -> Self {
        Self {
            pixel_height: 32,
            first_codepoint: 32,
            glyph_count: 96,
            atlas_width: 512,
            atlas_height: 512,
            face_index: 0,
        }
    }
}

impl BakeConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pixel_height(mut self, pixel_height: u32) -> Self {
        self.pixel_height = pixel_height;
        self
    }

    pub fn with_range(mut self, first_codepoint: u32, glyph_count: u32) -> Self {
        self.first_codepoint = first_codepoint;
        self.glyph_count = glyph_count;
        self
    }

    pub fn with_atlas_size(mut self, width: u32, height: u32) -> Self {
        self.atlas_width = width;
        self.atlas_height = height;
        self
    }

    pub fn with_face_index(mut self, face_index: u32) -> Self {
        self.face_index = face_index;
        self
    }

    /// One past the last baked codepoint
    pub fn end_codepoint(&self) -> u32 {
        self.first_codepoint.saturating_add(self.glyph_count)
    }

    /// Check whether a codepoint belongs to the baked range
    pub fn contains(&self, codepoint: u32) -> bool {
        codepoint >= self.first_codepoint && codepoint < self.end_codepoint()
    }

    /// Range-check every parameter
    pub fn validate(&self) -> Result<()> {
        if self.pixel_height == 0 || self.pixel_height > MAX_PIXEL_HEIGHT {
            return Err(TextError::InvalidConfig(format!(
                "pixel height {} not in 1..={}",
                self.pixel_height, MAX_PIXEL_HEIGHT
            )));
        }

        if self.glyph_count == 0 {
            return Err(TextError::InvalidConfig("glyph count must be positive".into()));
        }

        match self.first_codepoint.checked_add(self.glyph_count) {
            Some(end) if end <= CODEPOINT_LIMIT => {}
            _ => {
                return Err(TextError::InvalidConfig(format!(
                    "codepoint range {} + {} exceeds U+10FFFF",
                    self.first_codepoint, self.glyph_count
                )));
            }
        }

        // Texel rectangles are stored as u16
        let max_side = u32::from(u16::MAX);
        for (name, side) in [("width", self.atlas_width), ("height", self.atlas_height)] {
            if side == 0 || side > max_side {
                return Err(TextError::InvalidConfig(format!(
                    "atlas {name} {side} not in 1..={max_side}"
                )));
            }
        }

        Ok(())
    }
}
