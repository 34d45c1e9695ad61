//! Versioned SettingsVector layout
//!
//! Each slot of the flat vector is bound to exactly one named parameter, a
//! reserved placeholder, or a retired parameter. Slots are only ever
//! appended; a retired slot keeps its index forever.

use crate::face::{FaceParams, Gender};
use crate::rasterizer::BackgroundMode;

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Total length of a version 1 vector
pub const SETTINGS_LIST_LENGTH: usize = 60;

/// How a slot value maps onto its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    /// Rounded to the nearest integer
    Integer,
    /// `>= 0.5` is true
    Boolean,
    /// Rounded to a variant index; unknown indices keep the default
    Enum,
}

/// Every parameter addressable through the settings vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    CanvasWidth,
    CanvasHeight,
    Gender,
    TransparentBackground,
    EyeLeftSizeX,
    EyeLeftSizeY,
    EyeLeftPosX,
    EyeLeftPosY,
    EyeLeftRotation,
    EyeRightSizeX,
    EyeRightSizeY,
    EyeRightPosX,
    EyeRightPosY,
    EyeRightRotation,
    IrisLeftSize,
    IrisLeftPosX,
    IrisLeftPosY,
    IrisRightSize,
    IrisRightPosX,
    IrisRightPosY,
    HeadSizeX,
    HeadSizeY,
    JawSizeX,
    ForeheadSizeX,
    LipsSizeX,
    LipUpperSizeY,
    LipLowerSizeY,
    LipsPosY,
    ChinSizeX,
    ChinSizeY,
    CheekLeftPosX,
    CheekLeftPosY,
    CheekRightPosX,
    CheekRightPosY,
    EarsSizeX,
    EarsSizeY,
    EarsPosX,
    EarsPosY,
    EyebrowLeftSizeX,
    EyebrowLeftSizeY,
    EyebrowLeftPosX,
    EyebrowLeftPosY,
    EyebrowLeftRotation,
    EyebrowRightSizeX,
    EyebrowRightSizeY,
    EyebrowRightPosX,
    EyebrowRightPosY,
    EyebrowRightRotation,
    NoseSizeX,
    NoseSizeY,
    NosePosY,
    NoseTipPosY,
    CameraDistance,
    CameraPosX,
    CameraPosY,
    FovMm,
    LineThickness,
}

impl ParamKey {
    pub const COUNT: usize = 57;

    /// Version 1 order
    pub const ALL: [ParamKey; ParamKey::COUNT] = [
        ParamKey::CanvasWidth,
        ParamKey::CanvasHeight,
        ParamKey::Gender,
        ParamKey::TransparentBackground,
        ParamKey::EyeLeftSizeX,
        ParamKey::EyeLeftSizeY,
        ParamKey::EyeLeftPosX,
        ParamKey::EyeLeftPosY,
        ParamKey::EyeLeftRotation,
        ParamKey::EyeRightSizeX,
        ParamKey::EyeRightSizeY,
        ParamKey::EyeRightPosX,
        ParamKey::EyeRightPosY,
        ParamKey::EyeRightRotation,
        ParamKey::IrisLeftSize,
        ParamKey::IrisLeftPosX,
        ParamKey::IrisLeftPosY,
        ParamKey::IrisRightSize,
        ParamKey::IrisRightPosX,
        ParamKey::IrisRightPosY,
        ParamKey::HeadSizeX,
        ParamKey::HeadSizeY,
        ParamKey::JawSizeX,
        ParamKey::ForeheadSizeX,
        ParamKey::LipsSizeX,
        ParamKey::LipUpperSizeY,
        ParamKey::LipLowerSizeY,
        ParamKey::LipsPosY,
        ParamKey::ChinSizeX,
        ParamKey::ChinSizeY,
        ParamKey::CheekLeftPosX,
        ParamKey::CheekLeftPosY,
        ParamKey::CheekRightPosX,
        ParamKey::CheekRightPosY,
        ParamKey::EarsSizeX,
        ParamKey::EarsSizeY,
        ParamKey::EarsPosX,
        ParamKey::EarsPosY,
        ParamKey::EyebrowLeftSizeX,
        ParamKey::EyebrowLeftSizeY,
        ParamKey::EyebrowLeftPosX,
        ParamKey::EyebrowLeftPosY,
        ParamKey::EyebrowLeftRotation,
        ParamKey::EyebrowRightSizeX,
        ParamKey::EyebrowRightSizeY,
        ParamKey::EyebrowRightPosX,
        ParamKey::EyebrowRightPosY,
        ParamKey::EyebrowRightRotation,
        ParamKey::NoseSizeX,
        ParamKey::NoseSizeY,
        ParamKey::NosePosY,
        ParamKey::NoseTipPosY,
        ParamKey::CameraDistance,
        ParamKey::CameraPosX,
        ParamKey::CameraPosY,
        ParamKey::FovMm,
        ParamKey::LineThickness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::CanvasWidth => "canvas_width",
            ParamKey::CanvasHeight => "canvas_height",
            ParamKey::Gender => "gender",
            ParamKey::TransparentBackground => "transparent_background",
            ParamKey::EyeLeftSizeX => "eye_left_size_x",
            ParamKey::EyeLeftSizeY => "eye_left_size_y",
            ParamKey::EyeLeftPosX => "eye_left_pos_x",
            ParamKey::EyeLeftPosY => "eye_left_pos_y",
            ParamKey::EyeLeftRotation => "eye_left_rotation",
            ParamKey::EyeRightSizeX => "eye_right_size_x",
            ParamKey::EyeRightSizeY => "eye_right_size_y",
            ParamKey::EyeRightPosX => "eye_right_pos_x",
            ParamKey::EyeRightPosY => "eye_right_pos_y",
            ParamKey::EyeRightRotation => "eye_right_rotation",
            ParamKey::IrisLeftSize => "iris_left_size",
            ParamKey::IrisLeftPosX => "iris_left_pos_x",
            ParamKey::IrisLeftPosY => "iris_left_pos_y",
            ParamKey::IrisRightSize => "iris_right_size",
            ParamKey::IrisRightPosX => "iris_right_pos_x",
            ParamKey::IrisRightPosY => "iris_right_pos_y",
            ParamKey::HeadSizeX => "head_size_x",
            ParamKey::HeadSizeY => "head_size_y",
            ParamKey::JawSizeX => "jaw_size_x",
            ParamKey::ForeheadSizeX => "forehead_size_x",
            ParamKey::LipsSizeX => "lips_size_x",
            ParamKey::LipUpperSizeY => "lip_upper_size_y",
            ParamKey::LipLowerSizeY => "lip_lower_size_y",
            ParamKey::LipsPosY => "lips_pos_y",
            ParamKey::ChinSizeX => "chin_size_x",
            ParamKey::ChinSizeY => "chin_size_y",
            ParamKey::CheekLeftPosX => "cheek_left_pos_x",
            ParamKey::CheekLeftPosY => "cheek_left_pos_y",
            ParamKey::CheekRightPosX => "cheek_right_pos_x",
            ParamKey::CheekRightPosY => "cheek_right_pos_y",
            ParamKey::EarsSizeX => "ears_size_x",
            ParamKey::EarsSizeY => "ears_size_y",
            ParamKey::EarsPosX => "ears_pos_x",
            ParamKey::EarsPosY => "ears_pos_y",
            ParamKey::EyebrowLeftSizeX => "eyebrow_left_size_x",
            ParamKey::EyebrowLeftSizeY => "eyebrow_left_size_y",
            ParamKey::EyebrowLeftPosX => "eyebrow_left_pos_x",
            ParamKey::EyebrowLeftPosY => "eyebrow_left_pos_y",
            ParamKey::EyebrowLeftRotation => "eyebrow_left_rotation",
            ParamKey::EyebrowRightSizeX => "eyebrow_right_size_x",
            ParamKey::EyebrowRightSizeY => "eyebrow_right_size_y",
            ParamKey::EyebrowRightPosX => "eyebrow_right_pos_x",
            ParamKey::EyebrowRightPosY => "eyebrow_right_pos_y",
            ParamKey::EyebrowRightRotation => "eyebrow_right_rotation",
            ParamKey::NoseSizeX => "nose_size_x",
            ParamKey::NoseSizeY => "nose_size_y",
            ParamKey::NosePosY => "nose_pos_y",
            ParamKey::NoseTipPosY => "nose_tip_pos_y",
            ParamKey::CameraDistance => "camera_distance",
            ParamKey::CameraPosX => "camera_pos_x",
            ParamKey::CameraPosY => "camera_pos_y",
            ParamKey::FovMm => "fov_mm",
            ParamKey::LineThickness => "line_thickness",
        }
    }

    pub fn from_name(name: &str) -> Option<ParamKey> {
        ParamKey::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamKey::CanvasWidth | ParamKey::CanvasHeight => ParamKind::Integer,
            ParamKey::Gender => ParamKind::Enum,
            ParamKey::TransparentBackground => ParamKind::Boolean,
            _ => ParamKind::Float,
        }
    }

    /// Read the parameter as a slot value
    pub fn get(self, params: &FaceParams) -> f32 {
        match self {
            ParamKey::CanvasWidth => params.canvas.width as f32,
            ParamKey::CanvasHeight => params.canvas.height as f32,
            ParamKey::Gender => params.canvas.gender.index() as f32,
            ParamKey::TransparentBackground => {
                if params.canvas.background.is_transparent() {
                    1.0
                } else {
                    0.0
                }
            }
            key => key.float_ref(params).copied().unwrap_or(0.0),
        }
    }

    /// Write a finite slot value into the parameter, applying the kind's
    /// coercion. Returns false when the value was not applicable (an
    /// unknown enum index) and the parameter kept its previous value.
    pub fn set(self, params: &mut FaceParams, value: f32) -> bool {
        match self {
            ParamKey::CanvasWidth => params.canvas.width = value.round().max(0.0) as u32,
            ParamKey::CanvasHeight => params.canvas.height = value.round().max(0.0) as u32,
            ParamKey::Gender => {
                let index = value.round();
                match (index >= 0.0).then(|| Gender::from_index(index as u32)).flatten() {
                    Some(gender) => params.canvas.gender = gender,
                    None => return false,
                }
            }
            ParamKey::TransparentBackground => {
                params.canvas.background = BackgroundMode::from_transparent_flag(value >= 0.5)
            }
            key => match key.float_mut(params) {
                Some(field) => *field = value,
                None => return false,
            },
        }
        true
    }
}

/// Binds each `Float` key to its field, generating shared and mutable accessors
macro_rules! float_fields {
    ($($key:ident => $($field:ident).+;)*) => {
        impl ParamKey {
            fn float_ref(self, p: &FaceParams) -> Option<&f32> {
                match self {
                    $(ParamKey::$key => Some(&p.$($field).+),)*
                    _ => None,
                }
            }

            fn float_mut(self, p: &mut FaceParams) -> Option<&mut f32> {
                match self {
                    $(ParamKey::$key => Some(&mut p.$($field).+),)*
                    _ => None,
                }
            }
        }
    };
}

float_fields! {
    EyeLeftSizeX => eye_left.size_x;
    EyeLeftSizeY => eye_left.size_y;
    EyeLeftPosX => eye_left.pos_x;
    EyeLeftPosY => eye_left.pos_y;
    EyeLeftRotation => eye_left.rotation;
    EyeRightSizeX => eye_right.size_x;
    EyeRightSizeY => eye_right.size_y;
    EyeRightPosX => eye_right.pos_x;
    EyeRightPosY => eye_right.pos_y;
    EyeRightRotation => eye_right.rotation;
    IrisLeftSize => iris_left.size;
    IrisLeftPosX => iris_left.pos_x;
    IrisLeftPosY => iris_left.pos_y;
    IrisRightSize => iris_right.size;
    IrisRightPosX => iris_right.pos_x;
    IrisRightPosY => iris_right.pos_y;
    HeadSizeX => head.size_x;
    HeadSizeY => head.size_y;
    JawSizeX => head.jaw_size_x;
    ForeheadSizeX => head.forehead_size_x;
    LipsSizeX => lips.size_x;
    LipUpperSizeY => lips.upper_size_y;
    LipLowerSizeY => lips.lower_size_y;
    LipsPosY => lips.pos_y;
    ChinSizeX => chin.size_x;
    ChinSizeY => chin.size_y;
    CheekLeftPosX => cheek_left.pos_x;
    CheekLeftPosY => cheek_left.pos_y;
    CheekRightPosX => cheek_right.pos_x;
    CheekRightPosY => cheek_right.pos_y;
    EarsSizeX => ears.size_x;
    EarsSizeY => ears.size_y;
    EarsPosX => ears.pos_x;
    EarsPosY => ears.pos_y;
    EyebrowLeftSizeX => eyebrow_left.size_x;
    EyebrowLeftSizeY => eyebrow_left.size_y;
    EyebrowLeftPosX => eyebrow_left.pos_x;
    EyebrowLeftPosY => eyebrow_left.pos_y;
    EyebrowLeftRotation => eyebrow_left.rotation;
    EyebrowRightSizeX => eyebrow_right.size_x;
    EyebrowRightSizeY => eyebrow_right.size_y;
    EyebrowRightPosX => eyebrow_right.pos_x;
    EyebrowRightPosY => eyebrow_right.pos_y;
    EyebrowRightRotation => eyebrow_right.rotation;
    NoseSizeX => nose.size_x;
    NoseSizeY => nose.size_y;
    NosePosY => nose.pos_y;
    NoseTipPosY => nose.tip_pos_y;
    CameraDistance => camera.distance;
    CameraPosX => camera.pos_x;
    CameraPosY => camera.pos_y;
    FovMm => camera.fov_mm;
    LineThickness => line_thickness;
}

/// One position of the flat vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Param(ParamKey),
    /// Placeholder for future parameters
    Reserved,
    /// A parameter that no longer exists; its index is never reused
    Retired(&'static str),
}

/// Ordered slot table with a declared version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub version: u32,
    pub slots: &'static [Slot],
}

impl Schema {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot index bound to a parameter, if this schema carries it
    pub fn index_of(&self, key: ParamKey) -> Option<usize> {
        self.slots.iter().position(|s| *s == Slot::Param(key))
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }
}

const V1_SLOTS: [Slot; SETTINGS_LIST_LENGTH] = {
    let mut slots = [Slot::Reserved; SETTINGS_LIST_LENGTH];
    let mut i = 0;
    while i < ParamKey::COUNT {
        slots[i] = Slot::Param(ParamKey::ALL[i]);
        i += 1;
    }
    slots
};

/// Version 1: 57 parameters followed by 3 reserved slots
pub static SCHEMA_V1: Schema = Schema {
    version: 1,
    slots: &V1_SLOTS,
};

/// The schema new vectors are written with
pub fn current_schema() -> &'static Schema {
    &SCHEMA_V1
}
