//! Settings interchange
//!
//! The flat SettingsVector, its versioned slot table and RON presets.

mod codec;
mod preset;
mod schema;

pub use codec::*;
pub use preset::*;
pub use schema::*;
