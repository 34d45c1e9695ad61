//! SettingsVector encode / decode
//!
//! Decoding never fails. A short vector leaves the missing parameters at
//! their defaults, a long one has its tail ignored, and a non-finite value
//! is skipped in favour of the default.

use tracing::{debug, warn};

use crate::error::{PresetError, PresetResult};
use crate::face::FaceParams;

use super::schema::{current_schema, Schema, Slot, SCHEMA_VERSION};

/// Flat numeric form of a parameter set, tagged with its schema version
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsVector {
    pub version: u32,
    pub values: Vec<f32>,
}

impl SettingsVector {
    pub fn from_params(params: &FaceParams) -> Self {
        let schema = current_schema();
        Self {
            version: schema.version,
            values: encode_with(schema, params),
        }
    }

    /// Decode through the tolerant codec. Vectors from a newer schema are
    /// refused since their slot meanings are unknown here.
    pub fn to_params(&self) -> PresetResult<FaceParams> {
        if self.version > SCHEMA_VERSION {
            return Err(PresetError::SchemaMismatch {
                found: self.version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(decode(&self.values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encode with the current schema
pub fn encode(params: &FaceParams) -> Vec<f32> {
    encode_with(current_schema(), params)
}

/// Decode with the current schema
pub fn decode(values: &[f32]) -> FaceParams {
    decode_with(current_schema(), values)
}

/// One value per slot; reserved and retired slots are written as 0.0
pub fn encode_with(schema: &Schema, params: &FaceParams) -> Vec<f32> {
    schema
        .slots
        .iter()
        .map(|slot| match slot {
            Slot::Param(key) => key.get(params),
            Slot::Reserved | Slot::Retired(_) => 0.0,
        })
        .collect()
}

/// Populate a default parameter set from as many slots as `values` covers
pub fn decode_with(schema: &Schema, values: &[f32]) -> FaceParams {
    let mut params = FaceParams::default();

    if values.len() < schema.len() {
        debug!(
            got = values.len(),
            expected = schema.len(),
            "short settings vector, trailing parameters keep defaults"
        );
    } else if values.len() > schema.len() {
        debug!(
            got = values.len(),
            expected = schema.len(),
            "long settings vector, ignoring trailing values"
        );
    }

    for (index, (slot, &value)) in schema.slots.iter().zip(values).enumerate() {
        let Slot::Param(key) = *slot else {
            continue;
        };
        if !value.is_finite() {
            warn!(index, param = key.name(), value, "non-finite setting, keeping default");
            continue;
        }
        if !key.set(&mut params, value) {
            warn!(index, param = key.name(), value, "unrecognised setting value, keeping default");
        }
    }

    params
}
