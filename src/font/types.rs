use std::rc::Rc;

/// Vertical metrics of a face, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyph.
    pub descent: f32,
    /// Recommended extra space between lines.
    pub line_gap: f32,
}

impl Metrics {
    pub fn new(ascent: f32, descent: f32, line_gap: f32) -> Self {
        Self {
            ascent,
            descent,
            line_gap,
        }
    }

    /// Baseline-to-baseline distance for consecutive lines.
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.line_gap
    }

    /// Component-wise maximum, used when several faces share a line.
    pub fn max(self, other: Metrics) -> Metrics {
        Metrics {
            ascent: self.ascent.max(other.ascent),
            descent: self.descent.max(other.descent),
            line_gap: self.line_gap.max(other.line_gap),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rasterized glyph with positioning data.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub character: char,
    pub width: u32,
    pub height: u32,
    /// Horizontal offset from the pen position to the left edge.
    pub bearing_x: i32,
    /// Vertical offset from the baseline up to the top edge.
    pub bearing_y: i32,
    pub buffer: GlyphBuffer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlyphBuffer {
    /// One coverage byte per pixel, tinted with the draw color.
    Alpha(Vec<u8>),
    /// Pre-colored RGBA pixels (emoji and similar).
    Rgba(Vec<u8>),
}

impl GlyphBuffer {
    pub fn is_colored(&self) -> bool {
        matches!(self, GlyphBuffer::Rgba(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            GlyphBuffer::Alpha(b) | GlyphBuffer::Rgba(b) => b,
        }
    }
}

/// A laid-out glyph for one rune of the input text.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Byte index of the rune in the input text.
    pub start: usize,
    /// Byte index just past the rune.
    pub end: usize,
    pub character: char,
    /// `None` when there is nothing to draw (whitespace, or a rune the
    /// face has no glyph for).
    pub image: Option<Rc<RasterizedGlyph>>,
    /// Top-left corner of the image.
    pub x: f32,
    pub y: f32,
    /// Baseline pen position the glyph was laid out from.
    pub origin_x: f32,
    pub origin_y: f32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FaceError {
    #[error("Invalid unicode range: U+{start:04X} > U+{end:04X}")]
    InvalidRange { start: u32, end: u32 },
    #[error("MultiFace requires at least one face")]
    NoFaces,
    #[error(
        "Invalid cell width {0}: must be between 1 and {max}",
        max = crate::constants::MAX_CELL_WIDTH
    )]
    InvalidCellWidth(u32),
    #[error("Invalid vertical metrics: ascent {ascent}, descent {descent}")]
    InvalidMetrics { ascent: f32, descent: f32 },
}
