//! Error types for the face shaper.
//!
//! Validation failures are reported before any pixel is written. Short or
//! long settings vectors are not errors and never show up here.

use std::io;
use thiserror::Error;

use crate::face::FeatureId;

/// Rejections from the per-feature transform stack.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A scale factor was zero, negative or not finite.
    #[error("scale for {feature} must be positive and finite, got ({x}, {y})")]
    NonPositiveScale { feature: FeatureId, x: f32, y: f32 },

    /// A translation, rotation or offset was NaN or infinite.
    #[error("{what} for {feature} is not finite")]
    NonFinite { feature: FeatureId, what: &'static str },

    /// A non-zero rotation was requested for a feature that does not rotate.
    #[error("{feature} does not support rotation (got {degrees} degrees)")]
    RotationUnsupported { feature: FeatureId, degrees: f32 },

    /// A targeted point index does not exist in the feature.
    #[error("point index {index} out of range for {feature} ({count} points)")]
    IndexOutOfRange { feature: FeatureId, index: usize, count: usize },

    /// A control targets a named point subset the feature does not declare.
    #[error("{feature} has no '{subset}' point subset")]
    MissingSubset { feature: FeatureId, subset: &'static str },

    /// The transform does not apply to this kind of template.
    #[error("{feature} is a circle; only uniform size and offset apply")]
    CircleShape { feature: FeatureId },
}

/// Errors that reject a render request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The canvas is smaller or larger than the documented range.
    #[error("canvas size {width}x{height} outside {min}..={max}")]
    CanvasOutOfRange { width: u32, height: u32, min: u32, max: u32 },

    /// A named parameter was NaN or infinite.
    #[error("parameter '{name}' is not finite: {value}")]
    NonFinite { name: &'static str, value: f32 },

    /// A parameter that must be strictly positive was not.
    #[error("parameter '{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// A parameter exceeded its upper bound.
    #[error("parameter '{name}' must be at most {max}, got {value}")]
    TooLarge { name: &'static str, value: f32, max: f32 },

    /// The transform stack rejected a feature.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

/// Errors while reading or writing preset files.
#[derive(Error, Debug)]
pub enum PresetError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The preset text is not valid RON.
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The preset could not be serialized.
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    /// The preset was written by a newer schema than this build knows.
    #[error("preset schema version {found} is newer than supported version {supported}")]
    SchemaMismatch { found: u32, supported: u32 },
}

/// Result type alias for render and validation operations.
pub type ShaperResult<T> = Result<T, ValidationError>;

/// Result type alias for preset operations.
pub type PresetResult<T> = Result<T, PresetError>;
