//! Parametric face mask
//!
//! Template library, per-feature transforms, the typed parameter set and
//! the render entry point.

mod geometry;
mod params;
mod render;
mod transform;

pub use geometry::*;
pub use params::*;
pub use render::*;
pub use transform::*;
