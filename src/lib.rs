//! Loudscape library - microphone loudness rendered as a scrolling surface

pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod params;
pub mod rendering;
pub mod surface;
