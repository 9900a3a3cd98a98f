//! Height to color mapping.

use crate::params::SurfaceParams;

/// Maps stored heights to a single-channel (green) brightness with a floor
#[derive(Debug, Clone, Copy)]
pub struct ColorMap {
    divisor: f32,
    min_brightness: f32,
}

impl ColorMap {
    pub fn new(divisor: f32, min_brightness: f32) -> Self {
        Self {
            divisor,
            min_brightness,
        }
    }

    pub fn from_params(params: &SurfaceParams) -> Self {
        Self::new(params.color_divisor, params.min_brightness)
    }

    /// Brightness in `min_brightness..=1.0`.
    ///
    /// Only the display value is clamped; heights above the divisor saturate.
    pub fn brightness(&self, height: f32) -> f32 {
        let level = (height / self.divisor).clamp(0.0, 1.0);
        self.min_brightness + (1.0 - self.min_brightness) * level
    }

    /// RGB color for a height
    pub fn color(&self, height: f32) -> [f32; 3] {
        [0.0, self.brightness(height), 0.0]
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::from_params(&SurfaceParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_height_hits_floor() {
        let map = ColorMap::default();
        assert!((map.brightness(0.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_saturates_at_divisor() {
        let map = ColorMap::default();
        assert!((map.brightness(20.0) - 1.0).abs() < 1e-6);
        assert!((map.brightness(500.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_between() {
        let map = ColorMap::new(20.0, 0.8);
        assert!((map.brightness(10.0) - 0.9).abs() < 1e-6);
        assert!((map.brightness(5.0) - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_negative_height_clamped() {
        let map = ColorMap::default();
        assert!((map.brightness(-3.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_color_uses_green_channel_only() {
        let [r, g, b] = ColorMap::default().color(10.0);
        assert_eq!(r, 0.0);
        assert_eq!(b, 0.0);
        assert!((g - 0.9).abs() < 1e-6);
    }
}
