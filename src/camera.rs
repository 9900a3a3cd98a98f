//! Orbit camera driven by pointer drags, with a fixed orthographic volume.

use glam::{Mat4, Vec3};

use crate::params::CameraParams;

/// Pointer buttons the camera responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Drag rotates
    Primary,
    /// Vertical drag zooms
    Secondary,
}

/// Camera orientation and pointer tracking
#[derive(Debug, Clone)]
pub struct CameraState {
    pub angle_x_deg: f32,
    pub angle_y_deg: f32,
    pub zoom: f32,
    last_pointer: (f64, f64),
    primary_held: bool,
    secondary_held: bool,
    degrees_per_pixel: f32,
    zoom_per_pixel: f32,
}

impl CameraState {
    pub fn new(params: &CameraParams) -> Self {
        Self {
            angle_x_deg: params.initial_angle_x_deg,
            angle_y_deg: params.initial_angle_y_deg,
            zoom: params.initial_zoom,
            last_pointer: (0.0, 0.0),
            primary_held: false,
            secondary_held: false,
            degrees_per_pixel: params.degrees_per_pixel,
            zoom_per_pixel: params.zoom_per_pixel,
        }
    }

    pub fn button_pressed(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.primary_held = true,
            PointerButton::Secondary => self.secondary_held = true,
        }
    }

    pub fn button_released(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.primary_held = false,
            PointerButton::Secondary => self.secondary_held = false,
        }
    }

    /// Apply a pointer move; rotation takes precedence over zoom when both
    /// buttons are held.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let dx = (x - self.last_pointer.0) as f32;
        let dy = (y - self.last_pointer.1) as f32;

        if self.primary_held {
            self.angle_y_deg += dx * self.degrees_per_pixel;
            self.angle_x_deg += dy * self.degrees_per_pixel;
        } else if self.secondary_held {
            self.zoom += dy * self.zoom_per_pixel;
        }

        self.last_pointer = (x, y);
    }

    /// Model transform: scale by zoom, then rotate about x, then about y
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.zoom))
            * Mat4::from_rotation_x(self.angle_x_deg.to_radians())
            * Mat4::from_rotation_y(self.angle_y_deg.to_radians())
    }

    /// Orthographic projection enclosing `span` on every axis, composed with
    /// the model transform
    pub fn view_proj_matrix(&self, span: f32) -> Mat4 {
        let half = span / 2.0;
        let proj = Mat4::orthographic_rh(-half, half, -half, half, -half, half);
        proj * self.model_matrix()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(&CameraParams::default())
    }
}
