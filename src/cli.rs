//! Command-line argument parsing.

use clap::Parser;

use crate::params::{CaptureConfig, SurfaceParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "loudscape")]
#[command(about = "Scrolling 3D surface driven by live microphone loudness", long_about = None)]
pub struct Args {
    /// Input device name ("default" for the system default)
    #[arg(long, value_name = "NAME", default_value = "default")]
    pub device: String,

    /// Capture sample rate
    #[arg(long, value_name = "HZ", default_value = "44100")]
    pub sample_rate: u32,

    /// Frames per capture buffer (one loudness sample each)
    #[arg(long, value_name = "FRAMES", default_value = "512")]
    pub buffer_frames: u32,

    /// Surface resolution: columns, rows and history length
    #[arg(long, value_name = "N", default_value = "75")]
    pub grid_size: usize,

    /// Physical extent of the grid
    #[arg(long, value_name = "UNITS", default_value = "10.0")]
    pub span: f32,

    /// Height gain applied to loudness
    #[arg(long, value_name = "K", default_value = "15.0")]
    pub gain: f32,

    /// Loudness bias so silence still shows a surface
    #[arg(long, value_name = "EPS", default_value = "0.1")]
    pub bias: f32,

    /// List input devices and exit
    #[arg(long)]
    pub list_devices: bool,
}

impl Args {
    /// Capture configuration from the audio flags
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            device_name: self.device.clone(),
            sample_rate_hz: self.sample_rate,
            buffer_frames: self.buffer_frames,
        }
    }

    /// Surface parameters from the layout and mapping flags
    pub fn surface_params(&self) -> SurfaceParams {
        SurfaceParams {
            span: self.span,
            gain: self.gain,
            bias: self.bias,
            ..SurfaceParams::with_size(self.grid_size)
        }
    }
}
