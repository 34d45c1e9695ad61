//! Face Shaper: parametric line-art face masks
//!
//! Renders a binary stroke mask from fixed feature templates and a typed
//! parameter set:
//! - Per-feature scale, rotation, translation and point-subset offsets
//! - One global camera projection (zoom, pan, focal length)
//! - Opaque or transparent output, exportable as PNG
//! - A versioned flat settings vector for interchange, plus RON presets

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod face;
pub mod rasterizer;
pub mod settings;
