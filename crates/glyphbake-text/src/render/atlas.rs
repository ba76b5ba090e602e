//! Greyscale glyph atlas and its shelf packer

/// Gutter left around and between glyphs
const GUTTER: u32 = 1;

/// Single-channel bitmap holding every baked glyph
///
/// One byte per pixel (coverage). Populated once by the baker; read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphAtlas {
    /// Atlas texture (grayscale)
    pixels: Vec<u8>,
    /// Atlas width
    width: u32,
    /// Atlas height
    height: u32,
    /// Bottom of the lowest shelf
    used_height: u32,
}

impl GlyphAtlas {
    /// Create a blank atlas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0u8; width as usize * height as usize],
            width,
            height,
            used_height: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get atlas size
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Rows actually occupied by glyphs
    pub fn used_height(&self) -> u32 {
        self.used_height
    }

    /// Get atlas texture
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Coverage at `(x, y)`, `None` outside the atlas
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            self.pixels.get(y as usize * self.width as usize + x as usize).copied()
        } else {
            None
        }
    }

    /// One row of the atlas
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Write glyph coverage at the given position, clipped to the atlas
    pub(crate) fn write_glyph(&mut self, x: u32, y: u32, bitmap: &[u8], w: u32, h: u32) {
        for py in 0..h {
            for px in 0..w {
                let src_idx = (py * w + px) as usize;
                let dst_x = x + px;
                let dst_y = y + py;

                if dst_x < self.width && dst_y < self.height && src_idx < bitmap.len() {
                    let dst_idx = dst_y as usize * self.width as usize + dst_x as usize;
                    self.pixels[dst_idx] = bitmap[src_idx];
                }
            }
        }
    }

    pub(crate) fn set_used_height(&mut self, used_height: u32) {
        self.used_height = used_height.min(self.height);
    }

    /// Fraction of atlas rows occupied by shelves
    pub fn usage(&self) -> f32 {
        if self.height == 0 {
            0.0
        } else {
            self.used_height as f32 / self.height as f32
        }
    }
}

/// Row-based ("shelf") packer
///
/// Glyphs go left to right on the current shelf; when the row is too
/// narrow, a new shelf starts below the tallest glyph placed so far.
#[derive(Debug, Clone)]
pub(crate) struct ShelfPacker {
    width: u32,
    height: u32,
    /// Current packing position
    x: u32,
    y: u32,
    /// Bottom of the tallest glyph placed so far
    bottom_y: u32,
    /// Shelves started so far
    shelves: u32,
}

impl ShelfPacker {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: GUTTER,
            y: GUTTER,
            bottom_y: GUTTER,
            shelves: 1,
        }
    }

    /// Reserve a `w`×`h` cell, `None` when the atlas is exhausted
    pub(crate) fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.x + w + GUTTER >= self.width {
            // Move to next row
            self.y = self.bottom_y;
            self.x = GUTTER;
            self.shelves += 1;
        }

        if self.x + w + GUTTER >= self.width || self.y + h + GUTTER >= self.height {
            return None;
        }

        let origin = (self.x, self.y);
        self.x += w + GUTTER;
        self.bottom_y = self.bottom_y.max(self.y + h + GUTTER);
        Some(origin)
    }

    pub(crate) fn bottom(&self) -> u32 {
        self.bottom_y
    }

    pub(crate) fn shelves(&self) -> u32 {
        self.shelves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_creation() {
        let atlas = GlyphAtlas::new(256, 128);
        assert_eq!(atlas.size(), (256, 128));
        assert_eq!(atlas.pixels().len(), 256 * 128);
        assert_eq!(atlas.used_height(), 0);
    }

    #[test]
    fn test_write_glyph_clips() {
        let mut atlas = GlyphAtlas::new(4, 4);
        atlas.write_glyph(2, 2, &[10, 20, 30, 40, 50, 60, 70, 80, 90], 3, 3);
        assert_eq!(atlas.pixel(2, 2), Some(10));
        assert_eq!(atlas.pixel(3, 2), Some(20));
        assert_eq!(atlas.pixel(2, 3), Some(40));
        assert_eq!(atlas.pixel(3, 3), Some(50));
        assert_eq!(atlas.pixel(4, 4), None);
    }

    #[test]
    fn test_packer_fills_rows() {
        // 10px cells + 1px gutter in a 64px atlas: x = 1, 12, 23, 34, 45
        let mut packer = ShelfPacker::new(64, 64);
        let xs: Vec<u32> = (0..5).map(|_| packer.place(10, 10).unwrap().0).collect();
        assert_eq!(xs, vec![1, 12, 23, 34, 45]);
        assert_eq!(packer.shelves(), 1);

        // 56 + 10 + 1 >= 64: wraps below the first shelf
        assert_eq!(packer.place(10, 10), Some((1, 12)));
        assert_eq!(packer.shelves(), 2);
        assert_eq!(packer.bottom(), 23);
    }

    #[test]
    fn test_new_shelf_starts_below_tallest() {
        let mut packer = ShelfPacker::new(32, 64);
        packer.place(10, 5).unwrap();
        packer.place(10, 20).unwrap();
        // Row is full, next shelf starts at 1 + 20 + 1
        assert_eq!(packer.place(10, 5), Some((1, 22)));
    }

    #[test]
    fn test_packer_full() {
        let mut packer = ShelfPacker::new(64, 32);
        assert_eq!(packer.place(30, 15), Some((1, 1)));
        assert_eq!(packer.place(30, 15), Some((32, 1)));
        // Second shelf would start at y = 17 and end past the atlas
        assert!(packer.place(30, 15).is_none());
    }

    #[test]
    fn test_packer_rejects_too_wide() {
        let mut packer = ShelfPacker::new(16, 256);
        assert!(packer.place(20, 4).is_none());
    }
}
