use crate::renderer::Color;

use super::run::RunSplitter;
use super::slot::FaceSlot;
use super::traits::{Face, Surface};
use super::types::{FaceError, Glyph, Metrics, Point};

/// An ordered list of faces used as one.
///
/// Each rune goes to the first entry that has a glyph for it. When no entry
/// does, the last entry is used anyway, so there is always a face
/// responsible for every rune even if it draws nothing. Entries are queried
/// on every call; a slot cleared after construction simply stops covering.
#[derive(Debug, Clone)]
pub struct MultiFace {
    faces: Vec<FaceSlot>,
}

impl MultiFace {
    pub fn new(faces: impl IntoIterator<Item = FaceSlot>) -> Result<Self, FaceError> {
        let faces: Vec<FaceSlot> = faces.into_iter().collect();
        if faces.is_empty() {
            return Err(FaceError::NoFaces);
        }

        log::debug!(
            "MultiFace with {} faces ({} absent)",
            faces.len(),
            faces.iter().filter(|f| f.is_absent()).count()
        );
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[FaceSlot] {
        &self.faces
    }

    /// The last entry, used when no entry covers a rune.
    pub fn fallback(&self) -> &FaceSlot {
        &self.faces[self.faces.len() - 1]
    }

    /// Index of the first entry with a glyph for `ch`.
    pub fn covering_face(&self, ch: char) -> Option<usize> {
        self.faces.iter().position(|face| face.has_glyph(ch))
    }

    /// Index of the entry responsible for `ch`, falling back to the last.
    pub fn resolve(&self, ch: char) -> usize {
        self.covering_face(ch).unwrap_or(self.faces.len() - 1)
    }

    /// Splits `text` into runs of runes resolved to the same entry.
    pub fn runs<'a>(&'a self, text: &'a str) -> RunSplitter<'a> {
        RunSplitter::new(self, text)
    }
}

impl Face for MultiFace {
    fn metrics(&self) -> Metrics {
        self.faces
            .iter()
            .fold(Metrics::default(), |acc, face| acc.max(face.metrics()))
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.covering_face(ch).is_some()
    }

    fn advance(&self, text: &str) -> f32 {
        self.runs(text)
            .map(|run| self.faces[run.face_index].advance(run.text))
            .sum()
    }

    fn append_glyphs(
        &self,
        glyphs: &mut Vec<Glyph>,
        text: &str,
        index_offset: usize,
        origin: Point,
    ) {
        let mut origin = origin;
        for run in self.runs(text) {
            let face = &self.faces[run.face_index];
            face.append_glyphs(glyphs, run.text, index_offset + run.start, origin);
            origin.x += face.advance(run.text);
        }
    }

    fn draw(&self, target: &mut dyn Surface, text: &str, origin: Point, color: Color) {
        let mut origin = origin;
        for run in self.runs(text) {
            let face = &self.faces[run.face_index];
            face.draw(target, run.text, origin, color);
            origin.x += face.advance(run.text);
        }
    }
}
