//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers are collected here with:
//! - Units (Hz, frames, grid units, degrees)
//! - Documented ranges and meanings
//! - A `validate()` that rejects values the pipeline cannot run with

mod audio;
mod camera;
mod render;
mod surface;

// Re-export all types
pub use audio::CaptureConfig;
pub use camera::CameraParams;
pub use render::RenderConfig;
pub use surface::SurfaceParams;
