//! Error taxonomy for capture startup, per-buffer measurement, and shutdown.

use thiserror::Error;

/// Fatal errors raised before the visualizer is running
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("No audio input device found")]
    NoInputDevice,
    #[error("Audio input device '{0}' not found")]
    DeviceNotFound(String),
    #[error("Failed to query audio devices: {0}")]
    DeviceQuery(String),
    #[error("Failed to open audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Graphics initialization failed: {0}")]
    Graphics(String),
}

impl From<cpal::DevicesError> for StartupError {
    fn from(e: cpal::DevicesError) -> Self {
        Self::DeviceQuery(e.to_string())
    }
}

/// A capture callback delivered zero samples
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Audio buffer contained no samples")]
pub struct DegenerateBufferError;

/// Non-fatal failure while stopping the capture stream
#[derive(Error, Debug)]
pub enum ShutdownError {
    #[error("Failed to stop audio stream: {0}")]
    Pause(#[from] cpal::PauseStreamError),
}

/// An amplitude window does not match the surface width
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Amplitude window has {actual} samples but the surface has {expected} columns")]
pub struct WindowSizeError {
    pub expected: usize,
    pub actual: usize,
}
