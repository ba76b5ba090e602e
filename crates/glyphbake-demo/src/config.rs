//! Demo configuration (JSON)

use std::path::Path;

use anyhow::Context;
use glyphbake_text::{BakeConfig, Color, Cursor, MissingGlyph, PixelFormat};
use serde::{Deserialize, Serialize};

/// Everything the host decides: atlas bake, surface and text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub bake: BakeConfig,
    /// Destination surface size
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub background: Color,
    pub text: String,
    /// Top-left corner of the text line
    pub origin: Cursor,
    pub missing_glyph: MissingGlyph,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bake: BakeConfig::default(),
            width: 640,
            height: 480,
            format: PixelFormat::Rgba8888,
            background: Color::RED,
            text: "Hello".to_string(),
            origin: Cursor::default(),
            missing_glyph: MissingGlyph::Fail,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: RenderConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.bake.validate()?;
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "surface size {}x{} must be positive",
            self.width,
            self.height
        );
        Ok(())
    }
}
