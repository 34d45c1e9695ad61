//! Feature templates in normalized unit-square coordinates
//!
//! Pure data, fixed at build time and shared by every render. Coordinates
//! are y-down with (0.5, 0.5) at the middle of the face.

use std::fmt;

use crate::rasterizer::Vec2;

/// Stable identifier of one feature template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureId {
    Head = 0,
    Ears = 1,
    CheekLeft = 2,
    CheekRight = 3,
    Chin = 4,
    LipsUpper = 5,
    LipsLower = 6,
    NoseBridge = 7,
    Nose = 8,
    EyebrowLeft = 9,
    EyebrowRight = 10,
    EyeLeft = 11,
    EyeRight = 12,
    IrisLeft = 13,
    IrisRight = 14,
}

impl FeatureId {
    pub const COUNT: usize = 15;

    /// Draw order
    pub const ALL: [FeatureId; FeatureId::COUNT] = [
        FeatureId::Head,
        FeatureId::Ears,
        FeatureId::CheekLeft,
        FeatureId::CheekRight,
        FeatureId::Chin,
        FeatureId::LipsUpper,
        FeatureId::LipsLower,
        FeatureId::NoseBridge,
        FeatureId::Nose,
        FeatureId::EyebrowLeft,
        FeatureId::EyebrowRight,
        FeatureId::EyeLeft,
        FeatureId::EyeRight,
        FeatureId::IrisLeft,
        FeatureId::IrisRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FeatureId::Head => "head",
            FeatureId::Ears => "ears",
            FeatureId::CheekLeft => "cheek_left",
            FeatureId::CheekRight => "cheek_right",
            FeatureId::Chin => "chin",
            FeatureId::LipsUpper => "lips_upper",
            FeatureId::LipsLower => "lips_lower",
            FeatureId::NoseBridge => "nose_bridge",
            FeatureId::Nose => "nose",
            FeatureId::EyebrowLeft => "eyebrow_left",
            FeatureId::EyebrowRight => "eyebrow_right",
            FeatureId::EyeLeft => "eye_left",
            FeatureId::EyeRight => "eye_right",
            FeatureId::IrisLeft => "iris_left",
            FeatureId::IrisRight => "iris_right",
        }
    }

    pub fn from_name(name: &str) -> Option<FeatureId> {
        FeatureId::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gender preset selecting a template table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Female = 0,
    Male = 1,
}

impl Gender {
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Gender> {
        match index {
            0 => Some(Gender::Female),
            1 => Some(Gender::Male),
            _ => None,
        }
    }
}

/// Template geometry of one feature
#[derive(Debug, Clone, Copy)]
pub enum TemplateShape {
    Polyline(&'static [Vec2]),
    Polygon(&'static [Vec2]),
    /// Independent point lists sharing one transform
    Contour {
        subpaths: &'static [&'static [Vec2]],
        closed: bool,
    },
    Circle { center: Vec2, radius: f32 },
}

impl TemplateShape {
    /// Point lists of the shape (a circle has its centre as the only point)
    pub fn subpaths(&self) -> Vec<Vec<Vec2>> {
        match self {
            TemplateShape::Polyline(pts) | TemplateShape::Polygon(pts) => vec![pts.to_vec()],
            TemplateShape::Contour { subpaths, .. } => subpaths.iter().map(|p| p.to_vec()).collect(),
            TemplateShape::Circle { center, .. } => vec![vec![*center]],
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            TemplateShape::Polyline(pts) | TemplateShape::Polygon(pts) => pts.len(),
            TemplateShape::Contour { subpaths, .. } => subpaths.iter().map(|p| p.len()).sum(),
            TemplateShape::Circle { .. } => 1,
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            TemplateShape::Polyline(_) => false,
            TemplateShape::Polygon(_) => true,
            TemplateShape::Contour { closed, .. } => *closed,
            TemplateShape::Circle { .. } => true,
        }
    }
}

/// Named set of point indices inside one feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSubset {
    pub name: &'static str,
    /// Indices into the feature's points, subpaths concatenated in order
    pub indices: &'static [usize],
}

pub const SUBSET_JAW: &str = "jaw";
pub const SUBSET_FOREHEAD: &str = "forehead";
pub const SUBSET_TIP: &str = "tip";

/// Optional per-feature transform capabilities
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureCaps {
    pub rotation: bool,
    pub subsets: &'static [PointSubset],
}

impl FeatureCaps {
    pub fn subset(&self, name: &str) -> Option<&'static PointSubset> {
        self.subsets.iter().find(|s| s.name == name)
    }
}

/// One entry of the library
#[derive(Debug, Clone, Copy)]
pub struct FeatureTemplate {
    pub id: FeatureId,
    pub shape: TemplateShape,
    pub caps: FeatureCaps,
}

/// Immutable table of every feature template
#[derive(Debug)]
pub struct GeometryLibrary {
    /// Indexed by `FeatureId` discriminant
    features: [FeatureTemplate; FeatureId::COUNT],
}

impl GeometryLibrary {
    pub fn get(&self, id: FeatureId) -> &FeatureTemplate {
        &self.features[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureTemplate> {
        FeatureId::ALL.into_iter().map(move |id| self.get(id))
    }

    /// Template table for a gender preset. Male geometry has not been
    /// authored yet, so both presets share the female table.
    pub fn for_gender(gender: Gender) -> &'static GeometryLibrary {
        match gender {
            Gender::Female | Gender::Male => &FEMALE,
        }
    }
}

const fn p(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

const NO_CAPS: FeatureCaps = FeatureCaps { rotation: false, subsets: &[] };
const ROTATABLE: FeatureCaps = FeatureCaps { rotation: true, subsets: &[] };

const HEAD: [Vec2; 20] = [
    p(0.571760, 0.935952),
    p(0.679310, 0.854875),
    p(0.752114, 0.752289),
    p(0.791825, 0.621574),
    p(0.791825, 0.547116),
    p(0.818299, 0.464385),
    p(0.791825, 0.381654),
    p(0.791825, 0.193027),
    p(0.626362, 0.072239),
    p(0.500000, 0.072239),
    p(0.373638, 0.072239),
    p(0.208175, 0.193027),
    p(0.208175, 0.381654),
    p(0.181701, 0.464385),
    p(0.208175, 0.547116),
    p(0.208175, 0.621574),
    p(0.247886, 0.752289),
    p(0.320690, 0.854875),
    p(0.428240, 0.935952),
    p(0.500000, 0.935174),
];

const HEAD_SUBSETS: [PointSubset; 2] = [
    PointSubset { name: SUBSET_JAW, indices: &[0, 1, 2, 16, 17, 18, 19] },
    PointSubset { name: SUBSET_FOREHEAD, indices: &[7, 8, 9, 10, 11] },
];

const EAR_LEFT: [Vec2; 6] = [
    p(0.187500, 0.484375),
    p(0.171875, 0.375000),
    p(0.140625, 0.375000),
    p(0.125000, 0.500000),
    p(0.156250, 0.625000),
    p(0.187500, 0.625000),
];

const EAR_RIGHT: [Vec2; 6] = [
    p(0.812500, 0.484375),
    p(0.828125, 0.375000),
    p(0.859375, 0.375000),
    p(0.875000, 0.500000),
    p(0.843750, 0.625000),
    p(0.812500, 0.625000),
];

const EARS: [&[Vec2]; 2] = [&EAR_LEFT, &EAR_RIGHT];

const CHEEK_LEFT: [Vec2; 4] = [
    p(0.345693, 0.695507),
    p(0.181702, 0.464385),
    p(0.226775, 0.603442),
    p(0.316923, 0.729073),
];

const CHEEK_RIGHT: [Vec2; 4] = [
    p(0.654307, 0.695507),
    p(0.818298, 0.464385),
    p(0.773225, 0.603442),
    p(0.683077, 0.729073),
];

const CHIN: [Vec2; 7] = [
    p(0.445406, 0.935787),
    p(0.430974, 0.890426),
    p(0.459156, 0.851369),
    p(0.500000, 0.838925),
    p(0.540844, 0.851369),
    p(0.569026, 0.890426),
    p(0.554594, 0.935787),
];

const LIP_UPPER_LEFT: [Vec2; 6] = [
    p(0.499984, 0.762932),
    p(0.458618, 0.750634),
    p(0.442072, 0.754981),
    p(0.392433, 0.754258),
    p(0.450345, 0.800273),
    p(0.499984, 0.800273),
];

const LIP_UPPER_RIGHT: [Vec2; 6] = [
    p(0.499984, 0.762932),
    p(0.541349, 0.750634),
    p(0.557895, 0.754981),
    p(0.607534, 0.754258),
    p(0.549622, 0.800273),
    p(0.499984, 0.800273),
];

const LIP_LOWER_LEFT: [Vec2; 6] = [
    p(0.500000, 0.736025),
    p(0.475736, 0.726097),
    p(0.391922, 0.753943),
    p(0.444298, 0.754226),
    p(0.459189, 0.749262),
    p(0.500000, 0.764153),
];

const LIP_LOWER_RIGHT: [Vec2; 6] = [
    p(0.500000, 0.736025),
    p(0.524265, 0.726097),
    p(0.608079, 0.753943),
    p(0.555702, 0.754226),
    p(0.540811, 0.749262),
    p(0.500000, 0.764153),
];

const LIPS_UPPER: [&[Vec2]; 2] = [&LIP_UPPER_LEFT, &LIP_UPPER_RIGHT];
const LIPS_LOWER: [&[Vec2]; 2] = [&LIP_LOWER_LEFT, &LIP_LOWER_RIGHT];

const NOSE_BRIDGE_LEFT: [Vec2; 5] = [
    p(0.455851, 0.629847),
    p(0.474476, 0.579209),
    p(0.475906, 0.441927),
    p(0.453468, 0.412688),
    p(0.431031, 0.383450),
];

const NOSE_BRIDGE_RIGHT: [Vec2; 5] = [
    p(0.544149, 0.629847),
    p(0.525524, 0.579209),
    p(0.524094, 0.441927),
    p(0.546532, 0.412688),
    p(0.568969, 0.383450),
];

const NOSE_BRIDGE: [&[Vec2]; 2] = [&NOSE_BRIDGE_LEFT, &NOSE_BRIDGE_RIGHT];

/// Left wing, nostrils and tip, right wing. Indices 3, 5 and 7 are the
/// three lowest vertices.
const NOSE: [Vec2; 11] = [
    p(0.455541, 0.542654),
    p(0.428341, 0.619195),
    p(0.430238, 0.648926),
    p(0.455541, 0.655884),
    p(0.475000, 0.650000),
    p(0.500000, 0.671066),
    p(0.525000, 0.650000),
    p(0.544459, 0.655884),
    p(0.569762, 0.648926),
    p(0.571659, 0.619195),
    p(0.544459, 0.542654),
];

const NOSE_SUBSETS: [PointSubset; 1] = [PointSubset { name: SUBSET_TIP, indices: &[3, 5, 7] }];

const EYEBROW_LEFT: [Vec2; 5] = [
    p(0.431031, 0.383450),
    p(0.278829, 0.333225),
    p(0.207658, 0.386617),
    p(0.278528, 0.361798),
    p(0.414485, 0.406908),
];

const EYEBROW_RIGHT: [Vec2; 5] = [
    p(0.568969, 0.383450),
    p(0.721171, 0.333225),
    p(0.792342, 0.386617),
    p(0.721472, 0.361798),
    p(0.585515, 0.406908),
];

const EYE_LEFT: [Vec2; 6] = [
    p(0.288225, 0.433240),
    p(0.276156, 0.449786),
    p(0.346136, 0.474606),
    p(0.412321, 0.449786),
    p(0.346136, 0.400148),
    p(0.304771, 0.412257),
];

const EYE_RIGHT: [Vec2; 6] = [
    p(0.653864, 0.474606),
    p(0.723844, 0.449786),
    p(0.711775, 0.433240),
    p(0.695229, 0.412257),
    p(0.653864, 0.400148),
    p(0.587679, 0.449786),
];

const IRIS_RADIUS: f32 = 0.0272003;

static FEMALE: GeometryLibrary = GeometryLibrary {
    features: [
        FeatureTemplate {
            id: FeatureId::Head,
            shape: TemplateShape::Polygon(&HEAD),
            caps: FeatureCaps { rotation: false, subsets: &HEAD_SUBSETS },
        },
        FeatureTemplate {
            id: FeatureId::Ears,
            shape: TemplateShape::Contour { subpaths: &EARS, closed: true },
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::CheekLeft,
            shape: TemplateShape::Polyline(&CHEEK_LEFT),
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::CheekRight,
            shape: TemplateShape::Polyline(&CHEEK_RIGHT),
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::Chin,
            shape: TemplateShape::Polyline(&CHIN),
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::LipsUpper,
            shape: TemplateShape::Contour { subpaths: &LIPS_UPPER, closed: false },
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::LipsLower,
            shape: TemplateShape::Contour { subpaths: &LIPS_LOWER, closed: false },
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::NoseBridge,
            shape: TemplateShape::Contour { subpaths: &NOSE_BRIDGE, closed: false },
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::Nose,
            shape: TemplateShape::Polyline(&NOSE),
            caps: FeatureCaps { rotation: false, subsets: &NOSE_SUBSETS },
        },
        FeatureTemplate {
            id: FeatureId::EyebrowLeft,
            shape: TemplateShape::Polygon(&EYEBROW_LEFT),
            caps: ROTATABLE,
        },
        FeatureTemplate {
            id: FeatureId::EyebrowRight,
            shape: TemplateShape::Polygon(&EYEBROW_RIGHT),
            caps: ROTATABLE,
        },
        FeatureTemplate {
            id: FeatureId::EyeLeft,
            shape: TemplateShape::Polygon(&EYE_LEFT),
            caps: ROTATABLE,
        },
        FeatureTemplate {
            id: FeatureId::EyeRight,
            shape: TemplateShape::Polygon(&EYE_RIGHT),
            caps: ROTATABLE,
        },
        FeatureTemplate {
            id: FeatureId::IrisLeft,
            shape: TemplateShape::Circle { center: p(0.344990, 0.428113), radius: IRIS_RADIUS },
            caps: NO_CAPS,
        },
        FeatureTemplate {
            id: FeatureId::IrisRight,
            shape: TemplateShape::Circle { center: p(0.655011, 0.428113), radius: IRIS_RADIUS },
            caps: NO_CAPS,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_id() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        for id in FeatureId::ALL {
            assert_eq!(lib.get(id).id, id);
        }
        assert_eq!(lib.iter().count(), FeatureId::COUNT);
    }

    #[test]
    fn test_names_round_trip() {
        for id in FeatureId::ALL {
            assert_eq!(FeatureId::from_name(id.name()), Some(id));
        }
        assert_eq!(FeatureId::from_name("tail"), None);
    }

    #[test]
    fn test_all_points_in_unit_square() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        for tpl in lib.iter() {
            for pt in tpl.shape.subpaths().iter().flatten() {
                assert!((0.0..=1.0).contains(&pt.x), "{} x={}", tpl.id, pt.x);
                assert!((0.0..=1.0).contains(&pt.y), "{} y={}", tpl.id, pt.y);
            }
        }
    }

    #[test]
    fn test_subset_indices_in_range() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        for tpl in lib.iter() {
            let count = tpl.shape.point_count();
            for subset in tpl.caps.subsets {
                assert!(subset.indices.iter().all(|&i| i < count), "{}:{}", tpl.id, subset.name);
            }
        }
    }

    #[test]
    fn test_nose_tip_is_lowest_three_points() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let nose = lib.get(FeatureId::Nose);
        let mut pts: Vec<(usize, f32)> = nose.shape.subpaths()[0]
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.y))
            .collect();
        pts.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut lowest: Vec<usize> = pts[..3].iter().map(|(i, _)| *i).collect();
        lowest.sort();
        let tip = nose.caps.subset(SUBSET_TIP).unwrap();
        assert_eq!(lowest, tip.indices);
    }

    #[test]
    fn test_ears_are_two_closed_subpaths_either_side() {
        let lib = GeometryLibrary::for_gender(Gender::Female);
        let ears = lib.get(FeatureId::Ears);
        assert!(ears.shape.is_closed());
        let subpaths = ears.shape.subpaths();
        assert_eq!(subpaths.len(), 2);
        assert!(subpaths[0].iter().all(|p| p.x < 0.5));
        assert!(subpaths[1].iter().all(|p| p.x > 0.5));
    }

    #[test]
    fn test_only_eyes_and_brows_rotate() {
        let lib = GeometryLibrary::for_gender(Gender::Male);
        let rotatable: Vec<FeatureId> = lib.iter().filter(|t| t.caps.rotation).map(|t| t.id).collect();
        assert_eq!(
            rotatable,
            vec![FeatureId::EyebrowLeft, FeatureId::EyebrowRight, FeatureId::EyeLeft, FeatureId::EyeRight]
        );
    }
}
