//! Per-feature transform stack
//!
//! Pure functions over copies of template points. Order is fixed:
//!
//! 1. subset scales, each about the centroid of its own subset
//! 2. centroid of the whole feature
//! 3. scale about that centroid
//! 4. rotation about that centroid (only for features that opt in)
//! 5. translation
//! 6. selective point offset, in the already scaled and positioned frame
//!
//! Every parameter is validated before the first point is touched, so a
//! rejected transform never produces partial output.

use crate::error::TransformError;
use crate::rasterizer::{centroid, rotate_about, scale_about, Vec2};

use super::geometry::{FeatureCaps, FeatureId, FeatureTemplate, TemplateShape};

/// Scale restricted to a subset of a feature's points
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetScale {
    pub indices: Vec<usize>,
    pub scale: Vec2,
}

/// Offset added to a subset of points after the general transform
#[derive(Debug, Clone, PartialEq)]
pub struct PointOffset {
    pub indices: Vec<usize>,
    pub delta: Vec2,
}

/// Transform parameters for one feature
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTransform {
    /// Per-axis scale about the feature centroid
    pub scale: Vec2,
    /// Degrees, clockwise on screen
    pub rotation: f32,
    /// Translation as a fraction of the unit square
    pub offset: Vec2,
    pub subset_scales: Vec<SubsetScale>,
    pub point_offset: Option<PointOffset>,
}

impl Default for FeatureTransform {
    fn default() -> Self {
        Self {
            scale: Vec2::ONE,
            rotation: 0.0,
            offset: Vec2::ZERO,
            subset_scales: Vec::new(),
            point_offset: None,
        }
    }
}

impl FeatureTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vec2::new(x, y);
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    pub fn with_subset_scale(mut self, indices: &[usize], x: f32, y: f32) -> Self {
        self.subset_scales.push(SubsetScale {
            indices: indices.to_vec(),
            scale: Vec2::new(x, y),
        });
        self
    }

    pub fn with_point_offset(mut self, indices: &[usize], dx: f32, dy: f32) -> Self {
        self.point_offset = Some(PointOffset {
            indices: indices.to_vec(),
            delta: Vec2::new(dx, dy),
        });
        self
    }

    /// Check every parameter against the feature it will be applied to
    pub fn validate(&self, feature: FeatureId, caps: &FeatureCaps, point_count: usize) -> Result<(), TransformError> {
        check_scale(feature, self.scale)?;
        if !self.rotation.is_finite() {
            return Err(TransformError::NonFinite { feature, what: "rotation" });
        }
        if self.rotation != 0.0 && !caps.rotation {
            return Err(TransformError::RotationUnsupported {
                feature,
                degrees: self.rotation,
            });
        }
        if !self.offset.is_finite() {
            return Err(TransformError::NonFinite { feature, what: "offset" });
        }
        for subset in &self.subset_scales {
            check_scale(feature, subset.scale)?;
            check_indices(feature, &subset.indices, point_count)?;
        }
        if let Some(point_offset) = &self.point_offset {
            if !point_offset.delta.is_finite() {
                return Err(TransformError::NonFinite { feature, what: "point offset" });
            }
            check_indices(feature, &point_offset.indices, point_count)?;
        }
        Ok(())
    }
}

fn check_scale(feature: FeatureId, scale: Vec2) -> Result<(), TransformError> {
    let ok = |v: f32| v.is_finite() && v > 0.0;
    if ok(scale.x) && ok(scale.y) {
        Ok(())
    } else {
        Err(TransformError::NonPositiveScale {
            feature,
            x: scale.x,
            y: scale.y,
        })
    }
}

fn check_indices(feature: FeatureId, indices: &[usize], count: usize) -> Result<(), TransformError> {
    match indices.iter().find(|&&i| i >= count) {
        Some(&index) => Err(TransformError::IndexOutOfRange { feature, index, count }),
        None => Ok(()),
    }
}

/// Apply a transform to a flat point list. The template slice is never
/// written; the result is a fresh copy.
pub fn transform_points(
    feature: FeatureId,
    points: &[Vec2],
    caps: &FeatureCaps,
    t: &FeatureTransform,
) -> Result<Vec<Vec2>, TransformError> {
    t.validate(feature, caps, points.len())?;

    let mut pts = points.to_vec();

    for subset in &t.subset_scales {
        let c = centroid(subset.indices.iter().map(|&i| &pts[i]));
        for &i in &subset.indices {
            pts[i] = scale_about(pts[i], c, subset.scale);
        }
    }

    let c = centroid(&pts);
    for p in pts.iter_mut() {
        let scaled = scale_about(*p, c, t.scale);
        let rotated = rotate_about(scaled, c, t.rotation);
        *p = rotated + t.offset;
    }

    if let Some(point_offset) = &t.point_offset {
        for &i in &point_offset.indices {
            pts[i] = pts[i] + point_offset.delta;
        }
    }

    Ok(pts)
}

/// A feature after its own transform, still in unit-square space
#[derive(Debug, Clone, PartialEq)]
pub enum TransformedFeature {
    Paths { subpaths: Vec<Vec<Vec2>>, closed: bool },
    Circle { center: Vec2, radius: f32 },
}

/// Transform a whole template. Multi-subpath features share one centroid
/// computed over all of their points.
pub fn transform_feature(template: &FeatureTemplate, t: &FeatureTransform) -> Result<TransformedFeature, TransformError> {
    let feature = template.id;
    match template.shape {
        TemplateShape::Circle { center, radius } => {
            if !t.subset_scales.is_empty() || t.point_offset.is_some() || t.scale.x != t.scale.y {
                return Err(TransformError::CircleShape { feature });
            }
            let moved = transform_points(feature, &[center], &template.caps, t)?;
            Ok(TransformedFeature::Circle {
                center: moved[0],
                radius: radius * t.scale.x,
            })
        }
        shape => {
            let subpaths = shape.subpaths();
            let flat: Vec<Vec2> = subpaths.iter().flatten().copied().collect();
            let moved = transform_points(feature, &flat, &template.caps, t)?;

            let mut out = Vec::with_capacity(subpaths.len());
            let mut start = 0;
            for path in &subpaths {
                out.push(moved[start..start + path.len()].to_vec());
                start += path.len();
            }
            Ok(TransformedFeature::Paths {
                subpaths: out,
                closed: shape.is_closed(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::geometry::{Gender, GeometryLibrary, SUBSET_JAW, SUBSET_TIP};
    use proptest::prelude::*;

    const ROT: FeatureCaps = FeatureCaps { rotation: true, subsets: &[] };
    const PLAIN: FeatureCaps = FeatureCaps { rotation: false, subsets: &[] };

    fn diamond() -> Vec<Vec2> {
        vec![
            Vec2::new(0.4, 0.5),
            Vec2::new(0.5, 0.3),
            Vec2::new(0.6, 0.5),
            Vec2::new(0.5, 0.7),
        ]
    }

    fn close(a: Vec2, b: Vec2, eps: f32) -> bool {
        (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
    }

    #[test]
    fn test_identity_is_bit_exact() {
        let pts = diamond();
        let out = transform_points(FeatureId::EyeLeft, &pts, &ROT, &FeatureTransform::identity()).unwrap();
        assert_eq!(out, pts);
    }

    #[test]
    fn test_scale_doubles_spread_about_centroid() {
        let pts = diamond();
        let t = FeatureTransform::identity().with_scale(2.0, 1.0);
        let out = transform_points(FeatureId::EyeLeft, &pts, &PLAIN, &t).unwrap();
        assert!(close(out[0], Vec2::new(0.3, 0.5), 1e-6));
        assert!(close(out[2], Vec2::new(0.7, 0.5), 1e-6));
        // y untouched bit for bit
        for (a, b) in out.iter().zip(&pts) {
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn test_rotation_about_centroid() {
        let t = FeatureTransform::identity().with_rotation(90.0);
        let out = transform_points(FeatureId::EyeLeft, &diamond(), &ROT, &t).unwrap();
        // (0.4, 0.5) is left of centre; a clockwise quarter turn moves it above
        assert!(close(out[0], Vec2::new(0.5, 0.4), 1e-6));
    }

    #[test]
    fn test_translation_after_scale() {
        let t = FeatureTransform::identity().with_scale(2.0, 2.0).with_offset(0.1, -0.2);
        let out = transform_points(FeatureId::Chin, &diamond(), &PLAIN, &t).unwrap();
        // (0.5, 0.3) scales about (0.5, 0.5) to (0.5, 0.1), then moves by the offset
        assert!(close(out[1], Vec2::new(0.6, -0.1), 1e-6));
        assert!(close(out[3], Vec2::new(0.6, 0.7), 1e-6));
    }

    #[test]
    fn test_point_offset_applies_in_scaled_frame() {
        let t = FeatureTransform::identity()
            .with_scale(1.0, 2.0)
            .with_offset(0.0, 0.1)
            .with_point_offset(&[3], 0.0, 0.05);
        let out = transform_points(FeatureId::Nose, &diamond(), &PLAIN, &t).unwrap();
        // bottom point: scaled to 0.9, moved to 1.0, then nudged to 1.05
        assert!(close(out[3], Vec2::new(0.5, 1.05), 1e-6));
        assert!(close(out[1], Vec2::new(0.5, 0.2), 1e-6));
    }

    #[test]
    fn test_subset_scale_uses_subset_centroid() {
        let pts = vec![
            Vec2::new(0.2, 0.2),
            Vec2::new(0.8, 0.2),
            Vec2::new(0.4, 0.8),
            Vec2::new(0.6, 0.8),
        ];
        let t = FeatureTransform::identity().with_subset_scale(&[2, 3], 2.0, 1.0);
        let out = transform_points(FeatureId::Head, &pts, &PLAIN, &t).unwrap();
        assert!(close(out[2], Vec2::new(0.3, 0.8), 1e-6));
        assert!(close(out[3], Vec2::new(0.7, 0.8), 1e-6));
        assert_eq!(out[0], pts[0]);
        assert_eq!(out[1], pts[1]);
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let t = FeatureTransform::identity().with_scale(0.0, 1.0);
        let err = transform_points(FeatureId::Chin, &diamond(), &PLAIN, &t).unwrap_err();
        assert!(matches!(err, TransformError::NonPositiveScale { .. }));

        let t = FeatureTransform::identity().with_scale(1.0, -2.0);
        assert!(transform_points(FeatureId::Chin, &diamond(), &PLAIN, &t).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let t = FeatureTransform::identity().with_offset(f32::NAN, 0.0);
        let err = transform_points(FeatureId::Chin, &diamond(), &PLAIN, &t).unwrap_err();
        assert_eq!(err, TransformError::NonFinite { feature: FeatureId::Chin, what: "offset" });

        let t = FeatureTransform::identity().with_scale(f32::INFINITY, 1.0);
        assert!(transform_points(FeatureId::Chin, &diamond(), &PLAIN, &t).is_err());
    }

    #[test]
    fn test_rejects_rotation_without_capability() {
        let t = FeatureTransform::identity().with_rotation(10.0);
        let err = transform_points(FeatureId::Chin, &diamond(), &PLAIN, &t).unwrap_err();
        assert!(matches!(err, TransformError::RotationUnsupported { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let t = FeatureTransform::identity().with_point_offset(&[1, 4], 0.0, 0.1);
        let err = transform_points(FeatureId::Nose, &diamond(), &PLAIN, &t).unwrap_err();
        assert_eq!(
            err,
            TransformError::IndexOutOfRange { feature: FeatureId::Nose, index: 4, count: 4 }
        );
    }

    #[test]
    fn test_template_is_not_mutated() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let head = lib.get(FeatureId::Head);
        let before = head.shape.subpaths();
        let jaw = head.caps.subset(SUBSET_JAW).unwrap();
        let t = FeatureTransform::identity()
            .with_scale(1.5, 0.7)
            .with_subset_scale(jaw.indices, 1.3, 1.0);
        transform_feature(head, &t).unwrap();
        assert_eq!(head.shape.subpaths(), before);
    }

    #[test]
    fn test_multi_subpath_shares_one_centroid() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let ears = lib.get(FeatureId::Ears);
        let t = FeatureTransform::identity().with_scale(2.0, 1.0);
        let TransformedFeature::Paths { subpaths, closed } = transform_feature(ears, &t).unwrap() else {
            panic!("ears are a contour");
        };
        assert!(closed);
        assert_eq!(subpaths.len(), 2);
        // the pair centroid sits at x = 0.5, so both ears move outwards
        assert!(subpaths[0][0].x < 0.1875);
        assert!(subpaths[1][0].x > 0.8125);
    }

    #[test]
    fn test_circle_scales_radius_and_moves_center() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let iris = lib.get(FeatureId::IrisLeft);
        let t = FeatureTransform::identity().with_scale(2.0, 2.0).with_offset(0.01, 0.0);
        let TransformedFeature::Circle { center, radius } = transform_feature(iris, &t).unwrap() else {
            panic!("iris is a circle");
        };
        assert!((radius - 0.0544006).abs() < 1e-6);
        assert!(close(center, Vec2::new(0.354990, 0.428113), 1e-6));

        let skewed = FeatureTransform::identity().with_scale(2.0, 1.0);
        assert!(matches!(
            transform_feature(iris, &skewed),
            Err(TransformError::CircleShape { .. })
        ));
    }

    #[test]
    fn test_nose_tip_offset_on_template() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let nose = lib.get(FeatureId::Nose);
        let tip = nose.caps.subset(SUBSET_TIP).unwrap();
        let base = transform_feature(nose, &FeatureTransform::identity()).unwrap();
        let nudged = transform_feature(nose, &FeatureTransform::identity().with_point_offset(tip.indices, 0.0, 0.02)).unwrap();
        let (TransformedFeature::Paths { subpaths: a, .. }, TransformedFeature::Paths { subpaths: b, .. }) = (base, nudged) else {
            panic!("nose is a path");
        };
        for (i, (pa, pb)) in a[0].iter().zip(&b[0]).enumerate() {
            if tip.indices.contains(&i) {
                assert!((pb.y - pa.y - 0.02).abs() < 1e-6);
                assert_eq!(pb.x, pa.x);
            } else {
                assert_eq!(pa, pb);
            }
        }
    }

    fn arb_points() -> impl Strategy<Value = Vec<Vec2>> {
        prop::collection::vec((0.0f32..1.0, 0.0f32..1.0).prop_map(|(x, y)| Vec2::new(x, y)), 3..24)
    }

    proptest! {
        #[test]
        fn prop_centroid_preserved(
            pts in arb_points(),
            sx in 0.1f32..4.0,
            sy in 0.1f32..4.0,
            deg in -180.0f32..180.0,
            ox in -0.5f32..0.5,
            oy in -0.5f32..0.5,
        ) {
            let t = FeatureTransform::identity()
                .with_scale(sx, sy)
                .with_rotation(deg)
                .with_offset(ox, oy);
            let out = transform_points(FeatureId::EyeLeft, &pts, &ROT, &t).unwrap();
            let before = centroid(&pts) + Vec2::new(ox, oy);
            let after = centroid(&out);
            prop_assert!(close(before, after, 1e-4), "{:?} vs {:?}", before, after);
        }

        #[test]
        fn prop_subset_centroid_preserved(
            pts in arb_points(),
            sx in 0.1f32..4.0,
        ) {
            let subset = [0usize, 1, 2];
            let t = FeatureTransform::identity().with_subset_scale(&subset, sx, 1.0);
            let out = transform_points(FeatureId::Head, &pts, &PLAIN, &t).unwrap();
            let before = centroid(subset.iter().map(|&i| &pts[i]));
            let after = centroid(subset.iter().map(|&i| &out[i]));
            prop_assert!(close(before, after, 1e-4));
        }

        #[test]
        fn prop_point_offset_is_local(
            pts in arb_points(),
            sx in 0.5f32..2.0,
            sy in 0.5f32..2.0,
            oy in -0.3f32..0.3,
            delta in -0.2f32..0.2,
        ) {
            let targets = [0usize, 2];
            let plain = FeatureTransform::identity().with_scale(sx, sy).with_offset(0.0, oy);
            let nudged = plain.clone().with_point_offset(&targets, 0.0, delta);
            let a = transform_points(FeatureId::Nose, &pts, &PLAIN, &plain).unwrap();
            let b = transform_points(FeatureId::Nose, &pts, &PLAIN, &nudged).unwrap();
            for i in 0..pts.len() {
                if targets.contains(&i) {
                    prop_assert_eq!(b[i].x, a[i].x);
                    prop_assert_eq!(b[i].y, a[i].y + delta);
                } else {
                    prop_assert_eq!(b[i], a[i]);
                }
            }
        }
    }
}
