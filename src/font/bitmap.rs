//! Procedural monospace face.
//!
//! `BitmapFace` needs no font files: every covered rune is drawn as a framed
//! box filled with a pattern derived from its code point, so distinct runes
//! produce distinct images. Wide runes (CJK, Hangul, fullwidth forms, emoji)
//! take two cells.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use ahash::RandomState;

use crate::constants::{MAX_CELL_HEIGHT, MAX_CELL_WIDTH};
use crate::renderer::Color;

use super::limited::UnicodeRanges;
use super::traits::Face;
use super::types::{FaceError, Glyph, GlyphBuffer, Metrics, Point, RasterizedGlyph};

const WIDE_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x115F),
    (0x2E80, 0x303E),
    (0x3041, 0x33FF),
    (0x3400, 0x4DBF),
    (0x4E00, 0x9FFF),
    (0xA000, 0xA4CF),
    (0xAC00, 0xD7A3),
    (0xF900, 0xFAFF),
    (0xFE30, 0xFE4F),
    (0xFF00, 0xFF60),
    (0xFFE0, 0xFFE6),
    (0x1F300, 0x1F64F),
    (0x1F900, 0x1F9FF),
    (0x20000, 0x3FFFD),
];

fn is_wide(ch: char) -> bool {
    let code = ch as u32;
    WIDE_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

pub struct BitmapFaceBuilder {
    cell_width: u32,
    metrics: Metrics,
    covers: Vec<(u32, u32)>,
    kerning: Vec<(char, char, f32)>,
    color: Option<Color>,
}

impl BitmapFaceBuilder {
    pub fn line_gap(mut self, line_gap: f32) -> Self {
        self.metrics.line_gap = line_gap;
        self
    }

    /// Adds `start..=end` to the runes the face has glyphs for.
    pub fn cover(mut self, start: u32, end: u32) -> Self {
        self.covers.push((start, end));
        self
    }

    /// Adjusts the pen by `adjust` pixels between `left` and `right` when
    /// they are adjacent within one run.
    pub fn kern(mut self, left: char, right: char, adjust: f32) -> Self {
        self.kerning.push((left, right, adjust));
        self
    }

    /// Makes the face draw pre-colored glyphs that ignore the draw color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn build(self) -> Result<BitmapFace, FaceError> {
        if !(1..=MAX_CELL_WIDTH).contains(&self.cell_width) {
            return Err(FaceError::InvalidCellWidth(self.cell_width));
        }
        let Metrics {
            ascent, descent, ..
        } = self.metrics;
        let height_ok = ascent.is_finite()
            && descent.is_finite()
            && ascent >= 0.0
            && descent >= 0.0
            && ascent + descent <= MAX_CELL_HEIGHT;
        if !height_ok {
            return Err(FaceError::InvalidMetrics { ascent, descent });
        }

        let mut covers = UnicodeRanges::new();
        for (start, end) in self.covers {
            covers.add(start, end)?;
        }

        let kerning = self
            .kerning
            .into_iter()
            .map(|(left, right, adjust)| ((left, right), adjust))
            .collect();

        Ok(BitmapFace {
            cell_width: self.cell_width,
            metrics: self.metrics,
            covers,
            kerning,
            color: self.color,
            cache: RefCell::new(HashMap::default()),
        })
    }
}

pub struct BitmapFace {
    cell_width: u32,
    metrics: Metrics,
    covers: UnicodeRanges,
    kerning: HashMap<(char, char), f32, RandomState>,
    color: Option<Color>,
    /// Rasterized images per rune; `None` for runes with nothing to draw.
    cache: RefCell<HashMap<char, Option<Rc<RasterizedGlyph>>, RandomState>>,
}

impl BitmapFace {
    pub fn builder(cell_width: u32, ascent: f32, descent: f32) -> BitmapFaceBuilder {
        BitmapFaceBuilder {
            cell_width,
            metrics: Metrics::new(ascent, descent, 0.0),
            covers: Vec::new(),
            kerning: Vec::new(),
            color: None,
        }
    }

    /// Advance of a single rune; zero for runes the face does not cover.
    pub fn rune_advance(&self, ch: char) -> f32 {
        if !self.covers.contains(ch) {
            return 0.0;
        }
        let cells = if is_wide(ch) { 2.0 } else { 1.0 };
        self.cell_width as f32 * cells
    }

    pub fn kerning(&self, left: char, right: char) -> f32 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0.0)
    }

    pub fn glyph_image(&self, ch: char) -> Option<Rc<RasterizedGlyph>> {
        if let Some(cached) = self.cache.borrow().get(&ch) {
            return cached.clone();
        }

        let image = if self.covers.contains(ch) && !ch.is_whitespace() {
            Some(Rc::new(self.rasterize(ch)))
        } else {
            None
        };
        self.cache.borrow_mut().insert(ch, image.clone());
        image
    }

    fn rasterize(&self, ch: char) -> RasterizedGlyph {
        // Leave the last column empty so neighbouring glyphs do not touch.
        let width = (self.rune_advance(ch) as u32).saturating_sub(1).max(1);
        let height = (self.metrics.ascent + self.metrics.descent).round().max(1.0) as u32;
        let code = ch as u32;

        // Both sides are bounded by the limits checked in `build`.
        let mut mask = vec![0u8; width as usize * height as usize];
        for y in 0..height {
            for x in 0..width {
                let frame = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                let bit = (code >> ((x + y * width) % 21)) & 1 == 1;
                if frame || bit {
                    mask[y as usize * width as usize + x as usize] = 0xFF;
                }
            }
        }

        let buffer = match self.color {
            Some(color) => GlyphBuffer::Rgba(
                mask.iter()
                    .flat_map(|&coverage| {
                        let [r, g, b, a] = color.to_array();
                        [r, g, b, (coverage as u32 * a as u32 / 255) as u8]
                    })
                    .collect(),
            ),
            None => GlyphBuffer::Alpha(mask),
        };

        RasterizedGlyph {
            character: ch,
            width,
            height,
            bearing_x: 0,
            bearing_y: self.metrics.ascent.round() as i32,
            buffer,
        }
    }
}

impl fmt::Debug for BitmapFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitmapFace")
            .field("cell_width", &self.cell_width)
            .field("metrics", &self.metrics)
            .field("covers", &self.covers)
            .field("kerning_pairs", &self.kerning.len())
            .field("color", &self.color)
            .finish()
    }
}

impl Face for BitmapFace {
    fn metrics(&self) -> Metrics {
        self.metrics
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.covers.contains(ch)
    }

    fn advance(&self, text: &str) -> f32 {
        let mut advance = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            if let Some(left) = prev {
                advance += self.kerning(left, ch);
            }
            advance += self.rune_advance(ch);
            prev = Some(ch);
        }
        advance
    }

    fn append_glyphs(
        &self,
        glyphs: &mut Vec<Glyph>,
        text: &str,
        index_offset: usize,
        origin: Point,
    ) {
        let mut pen_x = origin.x;
        let mut prev = None;
        for (i, ch) in text.char_indices() {
            if let Some(left) = prev {
                pen_x += self.kerning(left, ch);
            }

            let image = self.glyph_image(ch);
            let (x, y) = match &image {
                Some(img) => (
                    pen_x + img.bearing_x as f32,
                    origin.y - img.bearing_y as f32,
                ),
                None => (pen_x, origin.y),
            };

            glyphs.push(Glyph {
                start: index_offset + i,
                end: index_offset + i + ch.len_utf8(),
                character: ch,
                image,
                x,
                y,
                origin_x: pen_x,
                origin_y: origin.y,
            });

            pen_x += self.rune_advance(ch);
            prev = Some(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face() -> BitmapFace {
        BitmapFace::builder(6, 10.0, 2.0)
            .cover(0x20, 0x7E)
            .cover(0x3040, 0x309F)
            .kern('A', 'V', -1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_rejects_invalid_cover() {
        let result = BitmapFace::builder(6, 10.0, 2.0).cover(0x7F, 0x20).build();
        assert!(matches!(result, Err(FaceError::InvalidRange { .. })));
    }

    #[test]
    fn test_builder_rejects_bad_cell_width() {
        for width in [0, MAX_CELL_WIDTH + 1, 3_000_000_000] {
            let result = BitmapFace::builder(width, 10.0, 2.0).cover(0x00, 0xFFFF).build();
            assert!(matches!(result, Err(FaceError::InvalidCellWidth(w)) if w == width));
        }
        assert!(BitmapFace::builder(MAX_CELL_WIDTH, 10.0, 2.0).build().is_ok());
    }

    #[test]
    fn test_builder_rejects_bad_metrics() {
        let cases = [
            (-1.0, 2.0),
            (10.0, f32::NAN),
            (1e9, 0.0),
            (f32::INFINITY, 0.0),
        ];
        for (ascent, descent) in cases {
            let result = BitmapFace::builder(6, ascent, descent).build();
            assert!(matches!(result, Err(FaceError::InvalidMetrics { .. })));
        }
    }

    #[test]
    fn test_widest_cell_advance() {
        let face = BitmapFace::builder(MAX_CELL_WIDTH, 10.0, 2.0)
            .cover(0x00, 0xFFFF)
            .build()
            .unwrap();
        assert_eq!(face.advance("あa"), (MAX_CELL_WIDTH * 3) as f32);
    }

    #[test]
    fn test_colored_face_produces_rgba() {
        let face = BitmapFace::builder(4, 2.0, 1.0)
            .cover(0x20, 0x7E)
            .color(Color::from_rgb(0x00FF00))
            .build()
            .unwrap();
        let image = face.glyph_image('a').unwrap();
        assert!(image.buffer.is_colored());
        assert_eq!(
            image.buffer.as_bytes().len(),
            (image.width * image.height * 4) as usize
        );
        // Top-left pixel sits on the frame.
        assert_eq!(&image.buffer.as_bytes()[..4], &[0x00, 0xFF, 0x00, 0xFF]);
    }

    #[test]
    fn test_rune_advance() {
        let face = face();
        assert_eq!(face.rune_advance('a'), 6.0);
        assert_eq!(face.rune_advance('あ'), 12.0);
        assert_eq!(face.rune_advance('é'), 0.0, "not covered");
    }

    #[test]
    fn test_advance_applies_kerning() {
        let face = face();
        assert_eq!(face.advance(""), 0.0);
        assert_eq!(face.advance("abc"), 18.0);
        assert_eq!(face.advance("AV"), 11.0);
        assert_eq!(face.advance("VA"), 12.0);
        assert_eq!(face.advance("aあ"), 18.0);
    }

    #[test]
    fn test_append_glyphs_positions() {
        let face = face();
        let mut glyphs = Vec::new();
        face.append_glyphs(&mut glyphs, "AVあ", 3, Point::new(1.0, 10.0));

        assert_eq!(glyphs.len(), 3);
        assert_eq!((glyphs[0].start, glyphs[0].end), (3, 4));
        assert_eq!((glyphs[2].start, glyphs[2].end), (5, 8));

        assert_eq!(glyphs[0].origin_x, 1.0);
        assert_eq!(glyphs[1].origin_x, 6.0, "kerned by -1");
        assert_eq!(glyphs[2].origin_x, 12.0);
        assert_eq!(glyphs[0].y, 0.0, "top of image sits ascent above baseline");
    }

    #[test]
    fn test_whitespace_and_uncovered_have_no_image() {
        let face = face();
        let mut glyphs = Vec::new();
        face.append_glyphs(&mut glyphs, "a é", 0, Point::default());
        assert_eq!(glyphs.len(), 3);
        assert!(glyphs[0].image.is_some());
        assert!(glyphs[1].image.is_none());
        assert!(glyphs[2].image.is_none());
    }

    #[test]
    fn test_glyph_images_are_cached() {
        let face = face();
        let first = face.glyph_image('a').unwrap();
        let second = face.glyph_image('a').unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_rasterized_dimensions() {
        let face = face();
        let narrow = face.glyph_image('a').unwrap();
        assert_eq!((narrow.width, narrow.height), (5, 12));
        assert_eq!(narrow.bearing_y, 10);
        assert_eq!(narrow.buffer.as_bytes().len(), 60);

        let wide = face.glyph_image('あ').unwrap();
        assert_eq!(wide.width, 11);
        assert_ne!(narrow.buffer, face.glyph_image('b').unwrap().buffer);
    }
}
