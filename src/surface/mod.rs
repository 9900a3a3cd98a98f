//! Scrolling height-field surface.
//!
//! Row 0 mirrors the current loudness window; each frame every older row
//! moves one slice deeper, giving the waterfall effect.

mod color;
mod grid;
mod updater;

// Re-export public types
pub use color::ColorMap;
pub use grid::{SurfaceGrid, Vertex};
pub use updater::SurfaceUpdater;
