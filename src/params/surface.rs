//! Surface grid layout and loudness-to-height mapping.

use crate::error::StartupError;

/// Surface layout and visual mapping parameters
#[derive(Debug, Clone)]
pub struct SurfaceParams {
    /// Columns per row; also the amplitude history capacity
    pub columns: usize,

    /// Depth-in-time rows
    pub rows: usize,

    /// Physical extent of the grid along x and z (grid units)
    /// Grid spans -span/2 ..= span/2
    pub span: f32,

    /// Bias added to loudness so silence still draws a visible surface
    pub bias: f32,

    /// Visual gain applied after the bias
    /// Formula: height = (loudness + bias) * gain
    pub gain: f32,

    /// Height that maps to full brightness
    pub color_divisor: f32,

    /// Brightness at zero height (0..=1)
    pub min_brightness: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            columns: 75,
            rows: 75,
            span: 10.0,
            bias: 0.1,
            gain: 15.0,
            color_divisor: 20.0,
            min_brightness: 0.8,
        }
    }
}

impl SurfaceParams {
    /// Square grid with `size` rows and columns, other values default
    pub fn with_size(size: usize) -> Self {
        Self {
            columns: size,
            rows: size,
            ..Default::default()
        }
    }

    /// Map one loudness sample to a stored (unclamped) height
    pub fn height_for(&self, loudness: f32) -> f32 {
        (loudness + self.bias) * self.gain
    }

    /// Spacing between adjacent columns
    pub fn column_step(&self) -> f32 {
        self.span / (self.columns - 1) as f32
    }

    /// Spacing between adjacent rows
    pub fn row_step(&self) -> f32 {
        self.span / (self.rows - 1) as f32
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        if self.columns < 2 || self.rows < 2 {
            return Err(StartupError::InvalidConfig(format!(
                "grid must be at least 2x2, got {}x{}",
                self.rows, self.columns
            )));
        }
        if !self.span.is_finite() || self.span <= 0.0 {
            return Err(StartupError::InvalidConfig(format!(
                "span must be finite and > 0, got {}",
                self.span
            )));
        }
        if !self.gain.is_finite() || self.gain <= 0.0 {
            return Err(StartupError::InvalidConfig(format!(
                "gain must be finite and > 0, got {}",
                self.gain
            )));
        }
        if !self.bias.is_finite() || self.bias < 0.0 {
            return Err(StartupError::InvalidConfig(format!(
                "bias must be finite and >= 0, got {}",
                self.bias
            )));
        }
        if !self.color_divisor.is_finite() || self.color_divisor <= 0.0 {
            return Err(StartupError::InvalidConfig(
                "color divisor must be finite and > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_brightness) {
            return Err(StartupError::InvalidConfig(
                "min brightness must be within 0..=1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_mapping() {
        let params = SurfaceParams::default();
        assert!((params.height_for(0.0) - 1.5).abs() < 1e-5);
        assert!((params.height_for(1.0) - 16.5).abs() < 1e-5);
    }

    #[test]
    fn test_step_spans_full_extent() {
        let params = SurfaceParams::with_size(11);
        assert!((params.column_step() - 1.0).abs() < 1e-6);
        assert!((params.column_step() * 10.0 - params.span).abs() < 1e-5);
    }

    #[test]
    fn test_single_column_rejected() {
        let params = SurfaceParams::with_size(1);
        assert!(params.validate().is_err());
        assert!(SurfaceParams::default().validate().is_ok());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let cases: [fn(&mut SurfaceParams); 7] = [
            |p| p.span = f32::NAN,
            |p| p.span = f32::INFINITY,
            |p| p.gain = f32::NAN,
            |p| p.gain = f32::INFINITY,
            |p| p.bias = f32::NAN,
            |p| p.color_divisor = f32::NAN,
            |p| p.min_brightness = f32::NAN,
        ];

        for (i, set) in cases.iter().enumerate() {
            let mut params = SurfaceParams::default();
            set(&mut params);
            assert!(
                matches!(params.validate(), Err(StartupError::InvalidConfig(_))),
                "case {} was accepted",
                i
            );
        }
    }
}
