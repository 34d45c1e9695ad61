//! Typed parameter set for one render

use crate::error::{ShaperResult, TransformError, ValidationError};
use crate::rasterizer::{BackgroundMode, Camera};

use super::geometry::{FeatureId, FeatureTemplate, Gender, SUBSET_FOREHEAD, SUBSET_JAW, SUBSET_TIP};
use super::transform::FeatureTransform;

pub const MIN_CANVAS: u32 = 256;
pub const MAX_CANVAS: u32 = 2048;
pub const DEFAULT_CANVAS: u32 = 1024;
pub const DEFAULT_LINE_THICKNESS: f32 = 2.0;
/// Thickest accepted stroke, in pixels before rounding
pub const MAX_LINE_THICKNESS: f32 = 10.0;

/// Output canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub gender: Gender,
    pub background: BackgroundMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS,
            height: DEFAULT_CANVAS,
            gender: Gender::Female,
            background: BackgroundMode::Opaque,
        }
    }
}

/// Scale, position and rotation (eyes, eyebrows)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeControl {
    pub size_x: f32,
    pub size_y: f32,
    pub pos_x: f32,
    pub pos_y: f32,
    /// Degrees
    pub rotation: f32,
}

impl Default for ShapeControl {
    fn default() -> Self {
        Self { size_x: 1.0, size_y: 1.0, pos_x: 0.0, pos_y: 0.0, rotation: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrisControl {
    pub size: f32,
    pub pos_x: f32,
    pub pos_y: f32,
}

impl Default for IrisControl {
    fn default() -> Self {
        Self { size: 1.0, pos_x: 0.0, pos_y: 0.0 }
    }
}

/// Head outline. Jaw and forehead widths act on their own point subsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadControl {
    pub size_x: f32,
    pub size_y: f32,
    pub jaw_size_x: f32,
    pub forehead_size_x: f32,
}

impl Default for HeadControl {
    fn default() -> Self {
        Self { size_x: 1.0, size_y: 1.0, jaw_size_x: 1.0, forehead_size_x: 1.0 }
    }
}

/// Both lips share width and vertical position; heights are separate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LipsControl {
    pub size_x: f32,
    pub upper_size_y: f32,
    pub lower_size_y: f32,
    pub pos_y: f32,
}

impl Default for LipsControl {
    fn default() -> Self {
        Self { size_x: 1.0, upper_size_y: 1.0, lower_size_y: 1.0, pos_y: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChinControl {
    pub size_x: f32,
    pub size_y: f32,
}

impl Default for ChinControl {
    fn default() -> Self {
        Self { size_x: 1.0, size_y: 1.0 }
    }
}

/// Translation only (cheeks)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetControl {
    pub pos_x: f32,
    pub pos_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarsControl {
    pub size_x: f32,
    pub size_y: f32,
    pub pos_x: f32,
    pub pos_y: f32,
}

impl Default for EarsControl {
    fn default() -> Self {
        Self { size_x: 1.0, size_y: 1.0, pos_x: 0.0, pos_y: 0.0 }
    }
}

/// Nose and its bridge. `pos_y` moves both; `tip_pos_y` only the tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoseControl {
    pub size_x: f32,
    pub size_y: f32,
    pub pos_y: f32,
    pub tip_pos_y: f32,
}

impl Default for NoseControl {
    fn default() -> Self {
        Self { size_x: 1.0, size_y: 1.0, pos_y: 0.0, tip_pos_y: 0.0 }
    }
}

/// Every control of one render. `Default` is the neutral face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceParams {
    pub canvas: CanvasConfig,
    pub camera: Camera,
    pub line_thickness: f32,

    pub eye_left: ShapeControl,
    pub eye_right: ShapeControl,
    pub iris_left: IrisControl,
    pub iris_right: IrisControl,
    pub head: HeadControl,
    pub lips: LipsControl,
    pub chin: ChinControl,
    pub cheek_left: OffsetControl,
    pub cheek_right: OffsetControl,
    pub ears: EarsControl,
    pub eyebrow_left: ShapeControl,
    pub eyebrow_right: ShapeControl,
    pub nose: NoseControl,
}

impl Default for FaceParams {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            camera: Camera::default(),
            line_thickness: DEFAULT_LINE_THICKNESS,
            eye_left: ShapeControl::default(),
            eye_right: ShapeControl::default(),
            iris_left: IrisControl::default(),
            iris_right: IrisControl::default(),
            head: HeadControl::default(),
            lips: LipsControl::default(),
            chin: ChinControl::default(),
            cheek_left: OffsetControl::default(),
            cheek_right: OffsetControl::default(),
            ears: EarsControl::default(),
            eyebrow_left: ShapeControl::default(),
            eyebrow_right: ShapeControl::default(),
            nose: NoseControl::default(),
        }
    }
}

fn positive(name: &'static str, value: f32) -> ShaperResult<()> {
    if !value.is_finite() {
        Err(ValidationError::NonFinite { name, value })
    } else if value <= 0.0 {
        Err(ValidationError::NonPositive { name, value })
    } else {
        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> ShaperResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { name, value })
    }
}

fn subset_indices(template: &FeatureTemplate, subset: &'static str) -> Result<&'static [usize], TransformError> {
    template
        .caps
        .subset(subset)
        .map(|s| s.indices)
        .ok_or(TransformError::MissingSubset { feature: template.id, subset })
}

impl FaceParams {
    /// Check canvas, camera and stroke scalars. Per-feature controls are
    /// checked by the transform stack when their transform is built.
    pub fn validate(&self) -> ShaperResult<()> {
        let CanvasConfig { width, height, .. } = self.canvas;
        if !(MIN_CANVAS..=MAX_CANVAS).contains(&width) || !(MIN_CANVAS..=MAX_CANVAS).contains(&height) {
            return Err(ValidationError::CanvasOutOfRange {
                width,
                height,
                min: MIN_CANVAS,
                max: MAX_CANVAS,
            });
        }
        positive("camera_distance", self.camera.distance)?;
        finite("camera_pos_x", self.camera.pos_x)?;
        finite("camera_pos_y", self.camera.pos_y)?;
        positive("fov_mm", self.camera.fov_mm)?;
        positive("line_thickness", self.line_thickness)?;
        if self.line_thickness > MAX_LINE_THICKNESS {
            return Err(ValidationError::TooLarge {
                name: "line_thickness",
                value: self.line_thickness,
                max: MAX_LINE_THICKNESS,
            });
        }
        Ok(())
    }

    /// Build the transform for one feature from its controls
    pub fn transform_for(&self, template: &FeatureTemplate) -> Result<FeatureTransform, TransformError> {
        let t = FeatureTransform::identity();
        let t = match template.id {
            FeatureId::Head => {
                let h = &self.head;
                t.with_scale(h.size_x, h.size_y)
                    .with_subset_scale(subset_indices(template, SUBSET_JAW)?, h.jaw_size_x, 1.0)
                    .with_subset_scale(subset_indices(template, SUBSET_FOREHEAD)?, h.forehead_size_x, 1.0)
            }
            FeatureId::Ears => {
                let e = &self.ears;
                t.with_scale(e.size_x, e.size_y).with_offset(e.pos_x, e.pos_y)
            }
            FeatureId::CheekLeft => t.with_offset(self.cheek_left.pos_x, self.cheek_left.pos_y),
            FeatureId::CheekRight => t.with_offset(self.cheek_right.pos_x, self.cheek_right.pos_y),
            FeatureId::Chin => t.with_scale(self.chin.size_x, self.chin.size_y),
            FeatureId::LipsUpper => t
                .with_scale(self.lips.size_x, self.lips.upper_size_y)
                .with_offset(0.0, self.lips.pos_y),
            FeatureId::LipsLower => t
                .with_scale(self.lips.size_x, self.lips.lower_size_y)
                .with_offset(0.0, self.lips.pos_y),
            FeatureId::NoseBridge => t.with_offset(0.0, self.nose.pos_y),
            FeatureId::Nose => {
                let n = &self.nose;
                t.with_scale(n.size_x, n.size_y)
                    .with_offset(0.0, n.pos_y)
                    .with_point_offset(subset_indices(template, SUBSET_TIP)?, 0.0, n.tip_pos_y)
            }
            FeatureId::EyebrowLeft => shape(t, &self.eyebrow_left),
            FeatureId::EyebrowRight => shape(t, &self.eyebrow_right),
            FeatureId::EyeLeft => shape(t, &self.eye_left),
            FeatureId::EyeRight => shape(t, &self.eye_right),
            FeatureId::IrisLeft => iris(t, &self.iris_left),
            FeatureId::IrisRight => iris(t, &self.iris_right),
        };
        Ok(t)
    }
}

fn shape(t: FeatureTransform, c: &ShapeControl) -> FeatureTransform {
    t.with_scale(c.size_x, c.size_y)
        .with_offset(c.pos_x, c.pos_y)
        .with_rotation(c.rotation)
}

fn iris(t: FeatureTransform, c: &IrisControl) -> FeatureTransform {
    t.with_scale(c.size, c.size).with_offset(c.pos_x, c.pos_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::geometry::GeometryLibrary;
    use crate::rasterizer::Vec2;

    #[test]
    fn test_default_is_valid_and_neutral() {
        let params = FaceParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.canvas.width, 1024);
        assert_eq!(params.camera.fov_mm, 80.0);
        assert_eq!(params.line_thickness, 2.0);

        let lib = GeometryLibrary::for_gender(params.canvas.gender);
        for template in lib.iter() {
            let t = params.transform_for(template).unwrap();
            assert_eq!(t.scale, Vec2::ONE, "{}", template.id);
            assert_eq!(t.offset, Vec2::ZERO, "{}", template.id);
            assert_eq!(t.rotation, 0.0, "{}", template.id);
        }
    }

    #[test]
    fn test_canvas_bounds() {
        let mut params = FaceParams::default();
        params.canvas.width = 255;
        assert!(matches!(params.validate(), Err(ValidationError::CanvasOutOfRange { .. })));

        params.canvas.width = 256;
        params.canvas.height = 2048;
        assert!(params.validate().is_ok());

        params.canvas.height = 2049;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_camera_and_stroke_rejected_not_clamped() {
        let mut params = FaceParams::default();
        params.camera.distance = 0.0;
        assert_eq!(
            params.validate(),
            Err(ValidationError::NonPositive { name: "camera_distance", value: 0.0 })
        );

        let mut params = FaceParams::default();
        params.camera.pos_x = f32::NAN;
        assert!(matches!(
            params.validate(),
            Err(ValidationError::NonFinite { name: "camera_pos_x", .. })
        ));

        let mut params = FaceParams::default();
        params.line_thickness = -1.0;
        assert!(params.validate().is_err());

        let mut params = FaceParams::default();
        params.camera.fov_mm = f32::INFINITY;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_line_thickness_upper_bound() {
        let mut params = FaceParams::default();
        params.line_thickness = MAX_LINE_THICKNESS;
        assert!(params.validate().is_ok());

        params.line_thickness = 11.0;
        assert_eq!(
            params.validate(),
            Err(ValidationError::TooLarge {
                name: "line_thickness",
                value: 11.0,
                max: MAX_LINE_THICKNESS,
            })
        );
    }

    #[test]
    fn test_nose_controls_share_position() {
        let mut params = FaceParams::default();
        params.nose.pos_y = 0.05;
        params.nose.tip_pos_y = 0.02;

        let lib = GeometryLibrary::for_gender(Gender::Female);
        let bridge = params.transform_for(lib.get(FeatureId::NoseBridge)).unwrap();
        assert_eq!(bridge.offset, Vec2::new(0.0, 0.05));
        assert!(bridge.point_offset.is_none());

        let nose = params.transform_for(lib.get(FeatureId::Nose)).unwrap();
        assert_eq!(nose.offset, Vec2::new(0.0, 0.05));
        let tip = nose.point_offset.unwrap();
        assert_eq!(tip.indices, vec![3, 5, 7]);
        assert_eq!(tip.delta, Vec2::new(0.0, 0.02));
    }

    #[test]
    fn test_lips_use_their_own_heights() {
        let mut params = FaceParams::default();
        params.lips.upper_size_y = 1.5;
        params.lips.lower_size_y = 0.5;
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let upper = params.transform_for(lib.get(FeatureId::LipsUpper)).unwrap();
        let lower = params.transform_for(lib.get(FeatureId::LipsLower)).unwrap();
        assert_eq!(upper.scale.y, 1.5);
        assert_eq!(lower.scale.y, 0.5);
    }

    #[test]
    fn test_head_carries_subset_scales() {
        let mut params = FaceParams::default();
        params.head.jaw_size_x = 1.2;
        params.head.forehead_size_x = 0.8;
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let t = params.transform_for(lib.get(FeatureId::Head)).unwrap();
        assert_eq!(t.subset_scales.len(), 2);
        assert_eq!(t.subset_scales[0].scale, Vec2::new(1.2, 1.0));
        assert_eq!(t.subset_scales[1].scale, Vec2::new(0.8, 1.0));
    }

    #[test]
    fn test_missing_subset_is_reported() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let mut chin_as_nose = *lib.get(FeatureId::Chin);
        chin_as_nose.id = FeatureId::Nose;
        let err = FaceParams::default().transform_for(&chin_as_nose).unwrap_err();
        assert_eq!(err, TransformError::MissingSubset { feature: FeatureId::Nose, subset: "tip" });
    }
}
