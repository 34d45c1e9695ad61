//! 2D vector math for template and pixel space
//!
//! Unit-square coordinates use a y-down frame (same as the raster), so a
//! positive rotation turns clockwise on screen.

use std::ops::{Add, Mul, Sub};

/// 2D point / vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).len()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

/// Arithmetic mean of a point set. Empty input yields the origin.
pub fn centroid<'a, I>(points: I) -> Vec2
where
    I: IntoIterator<Item = &'a Vec2>,
{
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut count = 0usize;
    for p in points {
        sum_x += p.x as f64;
        sum_y += p.y as f64;
        count += 1;
    }
    if count == 0 {
        return Vec2::ZERO;
    }
    Vec2::new((sum_x / count as f64) as f32, (sum_y / count as f64) as f32)
}

/// Scale `p` about `center` by per-axis factors. A unit factor leaves that
/// axis untouched bit-for-bit.
pub fn scale_about(p: Vec2, center: Vec2, scale: Vec2) -> Vec2 {
    Vec2 {
        x: if scale.x == 1.0 { p.x } else { center.x + (p.x - center.x) * scale.x },
        y: if scale.y == 1.0 { p.y } else { center.y + (p.y - center.y) * scale.y },
    }
}

/// Rotate `p` about `center` by `degrees`. Zero degrees returns `p` unchanged.
pub fn rotate_about(p: Vec2, center: Vec2, degrees: f32) -> Vec2 {
    if degrees == 0.0 {
        return p;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = p - center;
    Vec2 {
        x: center.x + d.x * cos - d.y * sin,
        y: center.y + d.x * sin + d.y * cos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_dot() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.dot(b) - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_centroid_of_square() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let c = centroid(&pts);
        assert!((c.x - 1.0).abs() < 1e-6 && (c.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_centroid_empty_is_origin() {
        let pts: [Vec2; 0] = [];
        assert_eq!(centroid(&pts), Vec2::ZERO);
    }

    #[test]
    fn test_rotate_quarter_turn_is_clockwise_in_y_down() {
        let p = rotate_about(Vec2::new(1.0, 0.0), Vec2::ZERO, 90.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let p = Vec2::new(0.3137, 0.7771);
        let c = Vec2::new(0.5, 0.5);
        assert_eq!(rotate_about(p, c, 0.0), p);
    }

    #[test]
    fn test_scale_about_keeps_center_fixed() {
        let c = Vec2::new(0.5, 0.25);
        assert_eq!(scale_about(c, c, Vec2::new(3.0, 0.5)), c);
        let p = scale_about(Vec2::new(0.75, 0.25), c, Vec2::new(2.0, 1.0));
        assert!((p.x - 1.0).abs() < 1e-6);
    }
}
