use crate::constants::MAX_CANVAS_SIDE;
use crate::font::{GlyphBuffer, RasterizedGlyph, Surface};

use super::color::Color;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error(
        "Canvas {width}x{height} is too large: each side must be at most {max}",
        max = MAX_CANVAS_SIDE
    )]
    TooLarge { width: u32, height: u32 },
}

/// In-memory RGBA8 surface.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        let too_large = CanvasError::TooLarge { width, height };
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(too_large);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(too_large)?;

        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let p = &self.pixels[idx..idx + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// True if nothing has been drawn since creation or the last clear.
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|p| p[3] == 0)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// One character per pixel: `.` empty, `+` partial, `#` mostly covered.
    pub fn to_ascii(&self) -> String {
        let row_len = self.width as usize * 4;
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for (i, row) in self.pixels.chunks_exact(row_len.max(1)).enumerate()
        {
            if i > 0 {
                out.push('\n');
            }
            for p in row.chunks_exact(4) {
                out.push(match p[3] {
                    0 => '.',
                    1..=127 => '+',
                    _ => '#',
                });
            }
        }
        out
    }

    /// Source-over blend of `src` onto the pixel at byte index `idx`.
    fn blend(&mut self, idx: usize, src: [u8; 4]) {
        let sa = src[3] as u32;
        if sa == 0 {
            return;
        }
        let dst = &mut self.pixels[idx..idx + 4];
        let da = dst[3] as u32 * (255 - sa) / 255;
        let out_a = sa + da;
        for c in 0..3 {
            dst[c] = ((src[c] as u32 * sa + dst[c] as u32 * da) / out_a) as u8;
        }
        dst[3] = out_a as u8;
    }
}

impl Surface for Canvas {
    fn blit(&mut self, glyph: &RasterizedGlyph, x: i32, y: i32, color: Color) {
        for gy in 0..glyph.height {
            let py = y + gy as i32;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for gx in 0..glyph.width {
                let px = x + gx as i32;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }

                let src_idx = gy as usize * glyph.width as usize + gx as usize;
                let src = match &glyph.buffer {
                    GlyphBuffer::Alpha(data) => match data.get(src_idx) {
                        Some(&coverage) => [
                            color.r,
                            color.g,
                            color.b,
                            (coverage as u32 * color.a as u32 / 255) as u8,
                        ],
                        None => continue,
                    },
                    GlyphBuffer::Rgba(data) => match data.get(src_idx * 4..src_idx * 4 + 4) {
                        Some(p) => [p[0], p[1], p[2], p[3]],
                        None => continue,
                    },
                };

                let dst_idx = self.index(px as u32, py as u32);
                self.blend(dst_idx, src);
            }
        }
    }
}
