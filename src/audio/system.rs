//! Capture stream lifecycle: device selection, start, and idempotent shutdown.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::history::AmplitudeHistory;
use super::sampler::AmplitudeSampler;
use crate::error::{ShutdownError, StartupError};
use crate::params::CaptureConfig;

/// Running microphone capture feeding an [`AmplitudeHistory`]
pub struct CaptureSystem {
    /// Input stream (None once shut down)
    stream: Option<cpal::Stream>,

    /// Cleared on shutdown; the callback drops buffers once false
    running: Arc<AtomicBool>,

    /// Set by the stream error callback
    faulted: Arc<AtomicBool>,

    device_name: String,
}

impl CaptureSystem {
    /// Open the configured input device and start writing loudness samples
    /// into `history`.
    ///
    /// # Errors
    /// - If the configuration is invalid
    /// - If no matching input device exists
    /// - If the stream cannot be built or started
    pub fn start(
        config: &CaptureConfig,
        history: Arc<AmplitudeHistory>,
    ) -> Result<Self, StartupError> {
        config.validate()?;

        let host = cpal::default_host();
        let device = find_input_device(&host, config)?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        log::info!(
            "Audio input: {} @ {}Hz, {} frames per buffer",
            device_name,
            config.sample_rate_hz,
            config.buffer_frames
        );

        let running = Arc::new(AtomicBool::new(true));
        let faulted = Arc::new(AtomicBool::new(false));

        let sampler = AmplitudeSampler::new(history);
        let callback_running = Arc::clone(&running);
        let callback_faulted = Arc::clone(&faulted);

        let stream = device.build_input_stream(
            &config.stream_config(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                handle_input(&sampler, &callback_running, data);
            },
            move |err| {
                callback_faulted.store(true, Ordering::Release);
                log::error!("Audio stream error: {}", err);
            },
            None,
        )?;

        stream.play()?;
        log::debug!("Audio stream started");

        Ok(Self {
            stream: Some(stream),
            running,
            faulted,
            device_name,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some() && self.running.load(Ordering::Acquire)
    }

    /// Whether the stream reported an error since it started
    pub fn is_faulted(&self) -> bool {
        self.faulted.load(Ordering::Acquire)
    }

    /// Stop the stream and release it.
    ///
    /// Safe to call repeatedly; calls after the first are no-ops. The stream
    /// is released even when pausing it fails.
    pub fn shutdown(&mut self) -> Result<(), ShutdownError> {
        self.running.store(false, Ordering::Release);

        let Some(stream) = self.stream.take() else {
            return Ok(());
        };

        let paused = stream.pause();
        drop(stream);
        log::debug!("Audio stream stopped");

        paused.map_err(ShutdownError::from)
    }
}

impl Drop for CaptureSystem {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("{}", e);
        }
    }
}

/// Capture callback body. Returns the recorded loudness, if any.
fn handle_input(sampler: &AmplitudeSampler, running: &AtomicBool, data: &[f32]) -> Option<f32> {
    if !running.load(Ordering::Acquire) {
        return None;
    }
    match sampler.process(data) {
        Ok(loudness) => Some(loudness),
        Err(e) => {
            log::warn!("Skipping capture buffer: {}", e);
            None
        }
    }
}

/// Resolve the configured device name to an input device
fn find_input_device(host: &cpal::Host, config: &CaptureConfig) -> Result<cpal::Device, StartupError> {
    if config.uses_default_device() {
        return host
            .default_input_device()
            .ok_or(StartupError::NoInputDevice);
    }

    let mut devices = host.input_devices()?.peekable();
    if devices.peek().is_none() {
        return Err(StartupError::NoInputDevice);
    }

    devices
        .find(|d| d.name().map(|n| n == config.device_name).unwrap_or(false))
        .ok_or_else(|| StartupError::DeviceNotFound(config.device_name.clone()))
}

/// Names of all input devices on the default host
pub fn list_input_devices() -> Result<Vec<String>, StartupError> {
    let host = cpal::default_host();
    let names = host
        .input_devices()?
        .map(|d| d.name().unwrap_or_else(|_| "Unknown".to_string()))
        .collect();
    Ok(names)
}
