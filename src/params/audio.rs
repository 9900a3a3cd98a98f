//! Audio capture configuration.

use crate::error::StartupError;

/// Device name that selects the host's default input device
pub const DEFAULT_DEVICE: &str = "default";

/// Capture device configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Input device name, or "default" for the system default
    pub device_name: String,

    /// Capture sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Frames delivered per capture callback
    /// 512 frames @ 44.1kHz ≈ 86 loudness samples per second
    pub buffer_frames: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE.to_string(),
            sample_rate_hz: 44100,
            buffer_frames: 512,
        }
    }
}

impl CaptureConfig {
    /// Whether the host default device should be used
    pub fn uses_default_device(&self) -> bool {
        self.device_name.eq_ignore_ascii_case(DEFAULT_DEVICE)
    }

    /// cpal stream configuration: mono at the requested rate and buffer size
    pub fn stream_config(&self) -> cpal::StreamConfig {
        cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(self.sample_rate_hz),
            buffer_size: cpal::BufferSize::Fixed(self.buffer_frames),
        }
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        if self.sample_rate_hz == 0 {
            return Err(StartupError::InvalidConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        if self.buffer_frames == 0 {
            return Err(StartupError::InvalidConfig(
                "buffer frames must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_mono_fixed_buffer() {
        let config = CaptureConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.uses_default_device());

        let stream = config.stream_config();
        assert_eq!(stream.channels, 1);
        assert_eq!(stream.sample_rate.0, 44100);
        assert_eq!(stream.buffer_size, cpal::BufferSize::Fixed(512));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let config = CaptureConfig {
            buffer_frames: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StartupError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_named_device() {
        let config = CaptureConfig {
            device_name: "USB Microphone".to_string(),
            ..Default::default()
        };
        assert!(!config.uses_default_device());
    }
}
