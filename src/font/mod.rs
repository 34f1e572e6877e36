mod bitmap;
mod limited;
mod multi;
mod run;
mod slot;
mod traits;
mod types;

pub use bitmap::{BitmapFace, BitmapFaceBuilder};
pub use limited::{LimitedFace, UnicodeRange, UnicodeRanges};
pub use multi::MultiFace;
pub use run::{FaceRun, RunSplitter};
pub use slot::FaceSlot;
pub use traits::{Face, Surface};
pub use types::{FaceError, Glyph, GlyphBuffer, Metrics, Point, RasterizedGlyph};
