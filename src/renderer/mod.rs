mod canvas;
mod color;

pub use canvas::{Canvas, CanvasError};
pub use color::Color;
