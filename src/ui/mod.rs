//! Rendering layer - surface abstraction, formatters, animation, renderer.

pub mod animate;
pub mod chart;
pub mod format;
pub mod render;
pub mod surface;
pub mod term;

pub use render::Renderer;
pub use surface::{Bindings, BufferSurface, LogRow, Slot, Surface, Tone};
