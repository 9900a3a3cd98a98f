//! Orbit camera defaults and pointer sensitivity.

/// Camera orientation and drag sensitivity
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Initial rotation about the x axis (degrees)
    pub initial_angle_x_deg: f32,

    /// Initial rotation about the y axis (degrees)
    pub initial_angle_y_deg: f32,

    /// Initial uniform scale
    pub initial_zoom: f32,

    /// Rotation per pointer pixel while the primary button is held (degrees)
    pub degrees_per_pixel: f32,

    /// Zoom change per vertical pointer pixel while the secondary button is held
    pub zoom_per_pixel: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            initial_angle_x_deg: 25.0, // Tilted to show the surface relief
            initial_angle_y_deg: 0.0,
            initial_zoom: 1.0,
            degrees_per_pixel: 1.0,
            zoom_per_pixel: 0.01,
        }
    }
}
