//! Camera projection from unit-square space to pixel space
//!
//! One global affine map, applied identically to every feature after its own
//! transform. No clipping happens here.

use super::math::Vec2;

/// Focal length at which `fov_mm` leaves the zoom untouched
pub const REFERENCE_FOV_MM: f32 = 80.0;

/// Camera state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Zoom factor (1.0 = template fills the canvas)
    pub distance: f32,
    /// Horizontal pan as a fraction of canvas width
    pub pos_x: f32,
    /// Vertical pan as a fraction of canvas height
    pub pos_y: f32,
    /// Lens focal length in millimetres
    pub fov_mm: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            distance: 1.0,
            pos_x: 0.0,
            pos_y: 0.0,
            fov_mm: REFERENCE_FOV_MM,
        }
    }

    /// Effective zoom fed to the projection
    pub fn zoom(&self) -> f32 {
        if self.fov_mm == REFERENCE_FOV_MM {
            self.distance
        } else {
            self.distance * self.fov_mm / REFERENCE_FOV_MM
        }
    }

    pub fn project(&self, p: Vec2, canvas_w: f32, canvas_h: f32) -> Vec2 {
        project(p, canvas_w, canvas_h, self.zoom(), self.pos_x, self.pos_y)
    }

    pub fn project_radius(&self, radius: f32, canvas_w: f32, canvas_h: f32) -> f32 {
        project_radius(radius, canvas_w, canvas_h, self.zoom())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Project a unit-square point to pixel coordinates
pub fn project(p: Vec2, canvas_w: f32, canvas_h: f32, cam_distance: f32, cam_pos_x: f32, cam_pos_y: f32) -> Vec2 {
    Vec2 {
        x: (p.x - 0.5) * canvas_w * cam_distance + canvas_w / 2.0 + cam_pos_x * canvas_w,
        y: (p.y - 0.5) * canvas_h * cam_distance + canvas_h / 2.0 + cam_pos_y * canvas_h,
    }
}

/// Project a unit-square radius, keeping circles round on non-square canvases
pub fn project_radius(radius: f32, canvas_w: f32, canvas_h: f32, cam_distance: f32) -> f32 {
    radius * canvas_w.min(canvas_h) * cam_distance
}
