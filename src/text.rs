//! Text operations that accept any [`Face`], leaf or composed.
//!
//! These handle line breaks and alignment and hand each line to the face.
//! A `MultiFace` then splits the line into face runs itself, so calling
//! these functions with a `MultiFace` or with a single face goes through
//! exactly the same code.

use crate::font::{Face, Glyph, Metrics, Point, Surface};
use crate::renderer::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutOptions {
    /// Baseline-to-baseline distance. Defaults to the face's line height.
    pub line_spacing: Option<f32>,
    /// Horizontal alignment of each line relative to the origin.
    pub primary_align: Align,
    /// Vertical alignment of the whole block relative to the origin.
    pub secondary_align: Align,
}

impl LayoutOptions {
    /// The configured line spacing, or the line height of `metrics`.
    pub fn resolved_line_spacing(&self, metrics: &Metrics) -> f32 {
        self.line_spacing.unwrap_or_else(|| metrics.line_height())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawOptions {
    /// Top-left of the text block for start alignment.
    pub origin: Point,
    pub color: Color,
    pub layout: LayoutOptions,
}

/// Pen advance after rendering `text`. Newlines are not treated specially.
pub fn advance(text: &str, face: &dyn Face) -> f32 {
    face.advance(text)
}

/// Width of the widest line and height of the block. Alignment does not
/// affect the size.
pub fn measure(text: &str, face: &dyn Face, options: &LayoutOptions) -> (f32, f32) {
    if text.is_empty() {
        return (0.0, 0.0);
    }

    let metrics = face.metrics();
    let mut width: f32 = 0.0;
    let mut line_count = 0;
    for line in text.split('\n') {
        width = width.max(face.advance(line));
        line_count += 1;
    }

    let line_spacing = options.resolved_line_spacing(&metrics);
    (width, block_height(&metrics, line_spacing, line_count))
}

fn block_height(metrics: &Metrics, line_spacing: f32, line_count: usize) -> f32 {
    line_spacing * line_count.saturating_sub(1) as f32 + metrics.ascent + metrics.descent
}

/// Lays out `text` and appends the glyphs with positions relative to the
/// block origin. Glyph byte indices refer to `text`.
pub fn append_glyphs(
    glyphs: &mut Vec<Glyph>,
    text: &str,
    face: &dyn Face,
    options: &LayoutOptions,
) {
    layout_lines(text, face, options, Point::default(), |line, index_offset, origin| {
        face.append_glyphs(glyphs, line, index_offset, origin);
    });
}

/// Renders `text` onto `target`. Each line goes through [`Face::draw`].
pub fn draw(target: &mut dyn Surface, text: &str, face: &dyn Face, options: &DrawOptions) {
    layout_lines(text, face, &options.layout, options.origin, |line, _, origin| {
        face.draw(&mut *target, line, origin, options.color);
    });
}

fn layout_lines(
    text: &str,
    face: &dyn Face,
    options: &LayoutOptions,
    block_origin: Point,
    mut emit: impl FnMut(&str, usize, Point),
) {
    if text.is_empty() {
        return;
    }

    let metrics = face.metrics();
    let line_spacing = options.resolved_line_spacing(&metrics);
    let block_height = block_height(&metrics, line_spacing, text.split('\n').count());

    let mut baseline = block_origin.y + metrics.ascent;
    match options.secondary_align {
        Align::Start => {}
        Align::Center => baseline -= block_height / 2.0,
        Align::End => baseline -= block_height,
    }

    let mut index_offset = 0;
    for line in text.split('\n') {
        let mut x = block_origin.x;
        match options.primary_align {
            Align::Start => {}
            Align::Center => x -= face.advance(line) / 2.0,
            Align::End => x -= face.advance(line),
        }

        emit(line, index_offset, Point::new(x, baseline));

        index_offset += line.len() + 1;
        baseline += line_spacing;
    }
}
