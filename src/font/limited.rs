use std::cell::RefCell;

use crate::renderer::Color;

use super::slot::FaceSlot;
use super::traits::{Face, Surface};
use super::types::{FaceError, Glyph, Metrics, Point};

/// Inclusive interval of code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnicodeRange {
    pub start: u32,
    pub end: u32,
}

impl UnicodeRange {
    pub fn new(start: u32, end: u32) -> Result<Self, FaceError> {
        if start > end {
            return Err(FaceError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, ch: char) -> bool {
        (self.start..=self.end).contains(&(ch as u32))
    }
}

/// Unordered set of ranges. Overlaps are kept as-is; membership is an OR
/// over all intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnicodeRanges {
    ranges: Vec<UnicodeRange>,
}

impl UnicodeRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, start: u32, end: u32) -> Result<(), FaceError> {
        self.ranges.push(UnicodeRange::new(start, end)?);
        Ok(())
    }

    pub fn contains(&self, ch: char) -> bool {
        self.ranges.iter().any(|r| r.contains(ch))
    }

    pub fn as_slice(&self) -> &[UnicodeRange] {
        &self.ranges
    }
}

/// Restricts the coverage of another face to a set of unicode ranges.
///
/// Only `has_glyph` is gated. Once a run has been assigned to this face,
/// metrics, advance and rendering go straight to the wrapped face. With no
/// ranges added the face covers nothing.
#[derive(Debug)]
pub struct LimitedFace {
    face: FaceSlot,
    ranges: RefCell<UnicodeRanges>,
}

impl LimitedFace {
    pub fn new(face: FaceSlot) -> Self {
        Self {
            face,
            ranges: RefCell::new(UnicodeRanges::new()),
        }
    }

    /// Accepts `start..=end` in addition to the existing ranges.
    ///
    /// Takes `&self` so ranges can still be added once the face is shared
    /// with a `MultiFace`.
    pub fn add_unicode_range(&self, start: u32, end: u32) -> Result<(), FaceError> {
        self.ranges.borrow_mut().add(start, end)?;
        log::debug!("LimitedFace accepts U+{:04X}-U+{:04X}", start, end);
        Ok(())
    }

    pub fn ranges(&self) -> Vec<UnicodeRange> {
        self.ranges.borrow().as_slice().to_vec()
    }
}

impl Face for LimitedFace {
    fn metrics(&self) -> Metrics {
        self.face.metrics()
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.ranges.borrow().contains(ch) && self.face.has_glyph(ch)
    }

    fn advance(&self, text: &str) -> f32 {
        self.face.advance(text)
    }

    fn append_glyphs(
        &self,
        glyphs: &mut Vec<Glyph>,
        text: &str,
        index_offset: usize,
        origin: Point,
    ) {
        self.face.append_glyphs(glyphs, text, index_offset, origin);
    }

    fn draw(&self, target: &mut dyn Surface, text: &str, origin: Point, color: Color) {
        self.face.draw(target, text, origin, color);
    }
}
