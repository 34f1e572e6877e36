use std::str::CharIndices;

use super::multi::MultiFace;

/// A maximal span of text whose runes all resolve to the same face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRun<'a> {
    /// Index of the resolved entry in the `MultiFace`.
    pub face_index: usize,
    /// Byte index of the first rune.
    pub start: usize,
    /// Byte index just past the last rune.
    pub end: usize,
    pub text: &'a str,
}

impl FaceRun<'_> {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Iterator that groups consecutive runes into face runs.
///
/// A new run starts whenever the resolved face changes, so each face sees
/// whole runs and can kern within them, while no shaping context crosses a
/// face boundary. Every rune is resolved exactly once.
pub struct RunSplitter<'a> {
    multi: &'a MultiFace,
    text: &'a str,
    chars: CharIndices<'a>,
    /// First rune of the next run as (byte index, face index), already
    /// resolved while ending the previous run.
    pending: Option<(usize, usize)>,
}

impl<'a> RunSplitter<'a> {
    pub fn new(multi: &'a MultiFace, text: &'a str) -> Self {
        Self {
            multi,
            text,
            chars: text.char_indices(),
            pending: None,
        }
    }
}

impl<'a> Iterator for RunSplitter<'a> {
    type Item = FaceRun<'a>;

    fn next(&mut self) -> Option<FaceRun<'a>> {
        let (start, face_index) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let (i, ch) = self.chars.next()?;
                (i, self.multi.resolve(ch))
            }
        };

        let mut end = self.text.len();
        for (i, ch) in self.chars.by_ref() {
            let resolved = self.multi.resolve(ch);
            if resolved != face_index {
                self.pending = Some((i, resolved));
                end = i;
                break;
            }
        }

        let run = FaceRun {
            face_index,
            start,
            end,
            text: &self.text[start..end],
        };
        log::trace!("run {}..{} -> face {}", start, end, face_index);
        Some(run)
    }
}
