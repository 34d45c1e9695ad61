//! Core rendering functions
//! Stroke rasterization of polylines, polygons and circles

use std::path::Path;

use image::RgbaImage;

use super::math::Vec2;
use super::types::{BackgroundMode, Color, StrokeStyle};

/// Maximum distance in pixels between two stamps along a segment
const STEP: f32 = 0.5;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Signed variant that silently drops off-canvas pixels
    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(Color::from_bytes(bytes))
        } else {
            None
        }
    }

    /// Stamp one pen footprint centred at `c`
    fn stamp(&mut self, c: Vec2, width: u32, color: Color) {
        if width <= 1 {
            self.plot(c.x.floor() as i64, c.y.floor() as i64, color);
            return;
        }
        let r = width as f32 / 2.0;
        let r_sq = r * r;
        let x0 = (c.x - r).floor().max(0.0) as i64;
        let x1 = (c.x + r).ceil().min(self.width as f32) as i64;
        let y0 = (c.y - r).floor().max(0.0) as i64;
        let y1 = (c.y + r).ceil().min(self.height as f32) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - c.x;
                let dy = y as f32 + 0.5 - c.y;
                if dx * dx + dy * dy <= r_sq {
                    self.plot(x, y, color);
                }
            }
        }
    }

    /// Draw a segment with the given pen. The segment is clipped to the
    /// canvas (grown by the pen radius) first, so off-canvas geometry costs
    /// nothing.
    pub fn draw_thick_line(&mut self, a: Vec2, b: Vec2, stroke: StrokeStyle) {
        let margin = stroke.width as f32 / 2.0 + 1.0;
        let min = Vec2::new(-margin, -margin);
        let max = Vec2::new(self.width as f32 + margin, self.height as f32 + margin);
        let Some((a, b)) = clip_segment(a, b, min, max) else {
            return;
        };

        let steps = (a.distance(b) / STEP).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = a + (b - a) * t;
            self.stamp(p, stroke.width, stroke.color);
        }
    }

    /// Connect consecutive points; `closed` also joins last to first
    pub fn draw_polyline(&mut self, points: &[Vec2], closed: bool, stroke: StrokeStyle) {
        match points {
            [] => {}
            [only] => self.stamp(*only, stroke.width, stroke.color),
            _ => {
                for pair in points.windows(2) {
                    self.draw_thick_line(pair[0], pair[1], stroke);
                }
                if closed && points.len() > 2 {
                    self.draw_thick_line(points[points.len() - 1], points[0], stroke);
                }
            }
        }
    }

    /// Draw a circle outline centred at `center`
    pub fn draw_circle_outline(&mut self, center: Vec2, radius: f32, stroke: StrokeStyle) {
        let half = (stroke.width as f32 / 2.0).max(0.5);
        let outer = radius + half;
        let x0 = (center.x - outer).floor().max(0.0) as i64;
        let x1 = (center.x + outer).ceil().min(self.width as f32) as i64;
        let y0 = (center.y - outer).floor().max(0.0) as i64;
        let y1 = (center.y + outer).ceil().min(self.height as f32) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if (p.distance(center) - radius).abs() <= half {
                    self.plot(x, y, stroke.color);
                }
            }
        }
    }

    /// Export as a normalized (height, width, channels) buffer
    pub fn to_pixel_buffer(&self, mode: BackgroundMode) -> PixelBuffer {
        let channels = mode.channels();
        let mut data = Vec::with_capacity(self.width * self.height * channels);
        for px in self.pixels.chunks_exact(4) {
            for &c in &px[..channels] {
                data.push(c as f32 / 255.0);
            }
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            channels,
            data,
        }
    }

    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.pixels.clone())
    }

    /// Write the framebuffer as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        match self.to_rgba_image() {
            Some(img) => img.save(path),
            None => Err(image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ))),
        }
    }
}

/// A feature already mapped to pixel space, ready to stroke
#[derive(Debug, Clone, PartialEq)]
pub enum PixelShape {
    /// One or more point lists sharing a style
    Path { subpaths: Vec<Vec<Vec2>>, closed: bool },
    Circle { center: Vec2, radius: f32 },
}

impl PixelShape {
    /// Every point the shape is defined by (circle: its centre)
    pub fn points(&self) -> Vec<Vec2> {
        match self {
            PixelShape::Path { subpaths, .. } => subpaths.iter().flatten().copied().collect(),
            PixelShape::Circle { center, .. } => vec![*center],
        }
    }
}

/// Stroke every shape into the framebuffer in one uniform style
pub fn draw_shapes(fb: &mut Framebuffer, shapes: &[PixelShape], stroke: StrokeStyle) {
    for shape in shapes {
        match shape {
            PixelShape::Path { subpaths, closed } => {
                for path in subpaths {
                    fb.draw_polyline(path, *closed, stroke);
                }
            }
            PixelShape::Circle { center, radius } => {
                fb.draw_circle_outline(*center, *radius, stroke);
            }
        }
    }
}

/// Normalized pixel data in (height, width, channels) order, values in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    /// 3 (RGB) or 4 (RGBA)
    pub channels: usize,
    pub data: Vec<f32>,
}

impl PixelBuffer {
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    /// All channel values of one pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * self.channels;
        Some(&self.data[idx..idx + self.channels])
    }
}

/// Liang-Barsky clip of segment `a`-`b` against the box `min`..`max`
fn clip_segment(a: Vec2, b: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    let edges = [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}
