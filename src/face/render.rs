//! Render entry point
//!
//! library -> per-feature transform -> camera projection -> rasterizer.
//! Every feature is transformed and projected before the framebuffer is
//! allocated, so a rejected parameter never leaves a half-drawn buffer.

use tracing::{debug, info};

use crate::error::ShaperResult;
use crate::rasterizer::{draw_shapes, Color, Framebuffer, PixelBuffer, PixelShape, StrokeStyle};

use super::geometry::{FeatureId, GeometryLibrary};
use super::params::FaceParams;
use super::transform::{transform_feature, TransformedFeature};

/// Foreground color of every stroke
pub const STROKE_COLOR: Color = Color::BLACK;

/// One feature mapped to pixel space
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    pub id: FeatureId,
    pub shape: PixelShape,
}

/// Transform and project every feature in draw order without rasterizing
pub fn render_plan(params: &FaceParams) -> ShaperResult<Vec<RenderedFeature>> {
    params.validate()?;

    let lib = GeometryLibrary::for_gender(params.canvas.gender);
    let w = params.canvas.width as f32;
    let h = params.canvas.height as f32;
    let camera = params.camera;

    let mut plan = Vec::with_capacity(FeatureId::COUNT);
    for template in lib.iter() {
        let t = params.transform_for(template)?;
        let shape = match transform_feature(template, &t)? {
            TransformedFeature::Paths { subpaths, closed } => PixelShape::Path {
                subpaths: subpaths
                    .into_iter()
                    .map(|path| path.into_iter().map(|p| camera.project(p, w, h)).collect())
                    .collect(),
                closed,
            },
            TransformedFeature::Circle { center, radius } => PixelShape::Circle {
                center: camera.project(center, w, h),
                radius: camera.project_radius(radius, w, h),
            },
        };
        plan.push(RenderedFeature { id: template.id, shape });
    }
    debug!(features = plan.len(), "face plan built");
    Ok(plan)
}

/// Render into an RGBA framebuffer (alpha 0 on the background in transparent mode)
pub fn render_framebuffer(params: &FaceParams) -> ShaperResult<Framebuffer> {
    let plan = render_plan(params)?;
    let width = params.canvas.width as usize;
    let height = params.canvas.height as usize;
    info!(
        width,
        height,
        background = ?params.canvas.background,
        "rendering face"
    );

    let mut fb = Framebuffer::new(width, height);
    fb.clear(params.canvas.background.clear_color());
    let shapes: Vec<PixelShape> = plan.into_iter().map(|f| f.shape).collect();
    draw_shapes(&mut fb, &shapes, StrokeStyle::from_thickness(params.line_thickness, STROKE_COLOR));
    Ok(fb)
}

/// Render to a normalized (height, width, channels) buffer: 3 channels when
/// opaque, 4 when transparent.
pub fn render_face(params: &FaceParams) -> ShaperResult<PixelBuffer> {
    let fb = render_framebuffer(params)?;
    Ok(fb.to_pixel_buffer(params.canvas.background))
}
