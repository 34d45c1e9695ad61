//! Binary stroke rasterizer
//!
//! Features:
//! - Unit-square to pixel camera projection (zoom, pan, focal length)
//! - Open polylines, closed polygons, multi-subpath contours, circles
//! - Uniform pen width, no anti-aliasing
//! - Opaque (RGB) or transparent (RGBA) export

mod camera;
mod math;
mod render;
mod types;

pub use camera::*;
pub use math::*;
pub use render::*;
pub use types::*;
