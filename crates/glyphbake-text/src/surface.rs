//! Surface - destination pixel buffer
//!
//! The host owns the surface; the compositor writes into it through
//! [`PixelFormat::encode_grey`], which replaces the 256-entry grey palette
//! of an indexed 8-bit atlas.

use serde::{Deserialize, Serialize};

/// Byte layout of one destination pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// R, G, B, A bytes
    #[default]
    Rgba8888,
    /// B, G, R, A bytes
    Bgra8888,
    /// Single luminance byte
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8888 | PixelFormat::Bgra8888 => 4,
            PixelFormat::Gray8 => 1,
        }
    }

    /// Encode an atlas coverage byte as an opaque grey pixel
    pub fn encode_grey(self, value: u8, out: &mut [u8]) {
        self.encode(Color::grey(value), out);
    }

    /// Encode a color into `out` (exactly `bytes_per_pixel` long)
    pub fn encode(self, color: Color, out: &mut [u8]) {
        match self {
            PixelFormat::Rgba8888 => out.copy_from_slice(&[color.r, color.g, color.b, color.a]),
            PixelFormat::Bgra8888 => out.copy_from_slice(&[color.b, color.g, color.r, color.a]),
            PixelFormat::Gray8 => out[0] = color.luma(),
        }
    }

    /// Decode one pixel back to a color
    pub fn decode(self, bytes: &[u8]) -> Color {
        match self {
            PixelFormat::Rgba8888 => Color::rgba(bytes[0], bytes[1], bytes[2], bytes[3]),
            PixelFormat::Bgra8888 => Color::rgba(bytes[2], bytes[1], bytes[0], bytes[3]),
            PixelFormat::Gray8 => Color::grey(bytes[0]),
        }
    }
}

/// Color (RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey
    pub fn grey(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Rec. 601 luma
    pub fn luma(&self) -> u8 {
        let y = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        ((y + 500) / 1000) as u8
    }
}

/// Destination pixel surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a zeroed surface
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let size = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            width,
            height,
            format,
            pixels: vec![0; size],
        }
    }

    /// Create a surface filled with one color
    pub fn filled(width: u32, height: u32, format: PixelFormat, color: Color) -> Self {
        let mut surface = Self::new(width, height, format);
        surface.fill(color);
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Fill every pixel
    pub fn fill(&mut self, color: Color) {
        let format = self.format;
        for px in self.pixels.chunks_exact_mut(format.bytes_per_pixel()) {
            format.encode(color, px);
        }
    }

    /// Raw bytes of pixel `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let idx = y as usize * self.stride() + x as usize * bpp;
        self.pixels.get(idx..idx + bpp)
    }

    /// Color of pixel `(x, y)`
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        self.pixel(x, y).map(|bytes| self.format.decode(bytes))
    }

    /// Mutable bytes of row `y` starting at column `x`
    pub(crate) fn row_from_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride() + x as usize * self.format.bytes_per_pixel();
        let end = (y as usize + 1) * self.stride();
        &mut self.pixels[start..end]
    }

    /// Get pixel data as raw bytes in the surface format
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Get pixel data as raw bytes (RGBA)
    pub fn to_rgba(&self) -> Vec<u8> {
        let format = self.format;
        self.pixels
            .chunks_exact(format.bytes_per_pixel())
            .flat_map(|px| {
                let c = format.decode(px);
                [c.r, c.g, c.b, c.a]
            })
            .collect()
    }
}
