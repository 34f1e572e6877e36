use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::renderer::Color;

use super::traits::{Face, Surface};
use super::types::{Glyph, Metrics, Point};

/// Shared handle to a face that may be absent.
///
/// Clones share the same slot: clearing or replacing the face through one
/// clone is seen by every other clone on its next call. An empty slot has no
/// coverage, zero metrics and zero advance, and draws nothing.
#[derive(Clone, Default)]
pub struct FaceSlot {
    inner: Rc<RefCell<Option<Rc<dyn Face>>>>,
}

impl FaceSlot {
    pub fn new<F: Face + 'static>(face: F) -> Self {
        Self::shared(Rc::new(face))
    }

    /// Wraps a face the caller keeps its own handle to.
    pub fn shared(face: Rc<dyn Face>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(face))),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    /// Returns the current face, if any.
    ///
    /// The slot is not borrowed while the caller uses the result, so the
    /// face may itself touch other slots (or this one) freely.
    pub fn get(&self) -> Option<Rc<dyn Face>> {
        self.inner.borrow().clone()
    }

    pub fn set(&self, face: Option<Rc<dyn Face>>) {
        *self.inner.borrow_mut() = face;
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn is_absent(&self) -> bool {
        self.inner.borrow().is_none()
    }

    /// Whether both handles refer to the same slot.
    pub fn ptr_eq(&self, other: &FaceSlot) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceSlot")
            .field("absent", &self.is_absent())
            .finish()
    }
}

impl Face for FaceSlot {
    fn metrics(&self) -> Metrics {
        self.get().map(|face| face.metrics()).unwrap_or_default()
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.get().is_some_and(|face| face.has_glyph(ch))
    }

    fn advance(&self, text: &str) -> f32 {
        self.get().map_or(0.0, |face| face.advance(text))
    }

    fn append_glyphs(
        &self,
        glyphs: &mut Vec<Glyph>,
        text: &str,
        index_offset: usize,
        origin: Point,
    ) {
        if let Some(face) = self.get() {
            face.append_glyphs(glyphs, text, index_offset, origin);
        }
    }

    fn draw(&self, target: &mut dyn Surface, text: &str, origin: Point, color: Color) {
        if let Some(face) = self.get() {
            face.draw(target, text, origin, color);
        }
    }
}
