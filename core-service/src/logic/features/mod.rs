//! Features Module - Feature schema and input assembly
//!
//! Layout (names, order, version hash), the positional vector the model
//! consumes, and the derived-feature step shared by training and inference.

pub mod layout;
pub mod vector;
pub mod derived;

// Re-export common types
pub use layout::{
    feature_index, feature_name, slider_config, validate_columns, SchemaError, SliderSetting,
    FEATURE_COUNT, FEATURE_LAYOUT, TARGET_NAME, TARGET_UNITS,
};
pub use vector::FeatureVector;
pub use derived::{compute_lsf, resolve_lsf, ProcessInputs};
