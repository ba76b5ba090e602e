//! Compositor - copies atlas regions onto a destination surface
//!
//! Each command is clipped against the atlas and the surface before any
//! pixel is touched. Pixels are overwritten, never blended, so later
//! commands win where glyph boxes overlap.

use tracing::trace;

use super::atlas::GlyphAtlas;
use crate::geometry::PixelRect;
use crate::layout::DrawCommand;
use crate::surface::Surface;

/// Source and destination origins plus the size left after clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClippedBlit {
    src_x: u32,
    src_y: u32,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
}

/// Intersect `src` with `(0, 0, src_w, src_h)` and `dst` with
/// `(0, 0, dst_w, dst_h)`, shifting both by the same amount
fn clip(src: PixelRect, src_bounds: (u32, u32), dst: PixelRect, dst_bounds: (u32, u32)) -> Option<ClippedBlit> {
    let mut sx = i64::from(src.x);
    let mut sy = i64::from(src.y);
    let mut dx = i64::from(dst.x);
    let mut dy = i64::from(dst.y);
    let mut w = i64::from(src.width.min(dst.width));
    let mut h = i64::from(src.height.min(dst.height));

    // Left/top edges: whichever side starts further out drops those columns
    let skip_x = (-sx).max(-dx).max(0);
    let skip_y = (-sy).max(-dy).max(0);
    sx += skip_x;
    dx += skip_x;
    sy += skip_y;
    dy += skip_y;
    w -= skip_x;
    h -= skip_y;

    // Right/bottom edges
    w = w.min(i64::from(src_bounds.0) - sx).min(i64::from(dst_bounds.0) - dx);
    h = h.min(i64::from(src_bounds.1) - sy).min(i64::from(dst_bounds.1) - dy);

    if w <= 0 || h <= 0 {
        return None;
    }

    Some(ClippedBlit {
        src_x: sx as u32,
        src_y: sy as u32,
        dst_x: dx as u32,
        dst_y: dy as u32,
        width: w as u32,
        height: h as u32,
    })
}

/// Writes atlas coverage into a surface as opaque grey pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor;

impl Compositor {
    pub fn new() -> Self {
        Self
    }

    /// Copy every command's source block to its destination
    ///
    /// Parts outside the atlas or the surface are dropped silently.
    /// Returns the number of surface pixels written.
    pub fn composite(&self, atlas: &GlyphAtlas, commands: &[DrawCommand], surface: &mut Surface) -> usize {
        let format = surface.format();
        let bpp = format.bytes_per_pixel();
        let surface_bounds = (surface.width(), surface.height());
        let mut written = 0;

        for command in commands {
            let Some(blit) = clip(command.src, atlas.size(), command.dst, surface_bounds) else {
                trace!(?command, "command clipped away");
                continue;
            };

            for row in 0..blit.height {
                let src_row = &atlas.row(blit.src_y + row)[blit.src_x as usize..][..blit.width as usize];
                let dst_row = surface.row_from_mut(blit.dst_x, blit.dst_y + row);

                for (value, px) in src_row.iter().zip(dst_row.chunks_exact_mut(bpp)) {
                    format.encode_grey(*value, px);
                }
            }

            written += blit.width as usize * blit.height as usize;
        }

        written
    }
}
