use crate::renderer::Color;

use super::types::{Glyph, Metrics, Point, RasterizedGlyph};

/// A source of glyphs.
///
/// Every method operates on a single line of text; newline handling lives in
/// [`crate::text`]. `LimitedFace`, `MultiFace` and `FaceSlot` implement this
/// trait too, so a composed face can stand in anywhere a leaf face can.
pub trait Face {
    fn metrics(&self) -> Metrics;

    fn has_glyph(&self, ch: char) -> bool;

    /// Pen advance after laying out `text`, including kerning between
    /// adjacent runes of the run.
    fn advance(&self, text: &str) -> f32;

    /// Appends one glyph per rune of `text`, laid out from the baseline
    /// point `origin`. `index_offset` is added to the byte indices of the
    /// emitted glyphs.
    fn append_glyphs(
        &self,
        glyphs: &mut Vec<Glyph>,
        text: &str,
        index_offset: usize,
        origin: Point,
    );

    /// Renders `text` onto `target` starting at the baseline point `origin`.
    fn draw(&self, target: &mut dyn Surface, text: &str, origin: Point, color: Color) {
        let mut glyphs = Vec::new();
        self.append_glyphs(&mut glyphs, text, 0, origin);
        blit_glyphs(target, &glyphs, color);
    }
}

/// A render target glyph images are drawn onto.
pub trait Surface {
    /// Draws `glyph` with its top-left corner at `(x, y)`. Pixels outside
    /// the surface are clipped.
    fn blit(&mut self, glyph: &RasterizedGlyph, x: i32, y: i32, color: Color);
}

fn blit_glyphs(target: &mut dyn Surface, glyphs: &[Glyph], color: Color) {
    for glyph in glyphs {
        if let Some(image) = &glyph.image {
            target.blit(image, glyph.x.round() as i32, glyph.y.round() as i32, color);
        }
    }
}
