//! Preset files: a SettingsVector stored as pretty-printed RON

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PresetResult;
use crate::face::FaceParams;

use super::codec::SettingsVector;

/// Default preset file used by the preview
pub const DEFAULT_PRESET_PATH: &str = "face_preset.ron";

/// On-disk preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub schema_version: u32,
    pub values: Vec<f32>,
}

impl Preset {
    pub fn from_params(params: &FaceParams) -> Self {
        let SettingsVector { version, values } = SettingsVector::from_params(params);
        Self {
            schema_version: version,
            values,
        }
    }

    pub fn to_params(&self) -> PresetResult<FaceParams> {
        SettingsVector {
            version: self.schema_version,
            values: self.values.clone(),
        }
        .to_params()
    }
}

/// Load a parameter set from a RON preset file
pub fn load_preset<P: AsRef<Path>>(path: P) -> PresetResult<FaceParams> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let params = load_preset_from_str(&contents)?;
    info!(path = %path.display(), "loaded preset");
    Ok(params)
}

/// Save a parameter set as a RON preset file
pub fn save_preset<P: AsRef<Path>>(params: &FaceParams, path: P) -> PresetResult<()> {
    let path = path.as_ref();
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(&Preset::from_params(params), config)?;
    fs::write(path, contents)?;
    info!(path = %path.display(), "saved preset");
    Ok(())
}

/// Load a parameter set from RON text (embedded presets, tests)
pub fn load_preset_from_str(s: &str) -> PresetResult<FaceParams> {
    let preset: Preset = ron::from_str(s)?;
    preset.to_params()
}
