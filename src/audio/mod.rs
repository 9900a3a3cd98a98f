//! Microphone capture and loudness history.
//!
//! The capture callback measures each buffer and writes one sample into a
//! shared ring; the render loop reads the ring once per frame.

mod history;
mod sampler;
mod system;

// Re-export public types
pub use history::AmplitudeHistory;
pub use sampler::{measure_loudness, AmplitudeSampler};
pub use system::{list_input_devices, CaptureSystem};
