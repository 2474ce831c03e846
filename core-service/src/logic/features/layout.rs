//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The order is positional input to the model and to attribution alignment.
//! Persisted artifacts carry the layout hash and are rejected on mismatch.

use std::collections::BTreeMap;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Raw meal chemistry (0-3) ===
    "limestone_pct",         // 0: Limestone share of raw meal (%)
    "silica_pct",            // 1: SiO2 (%)
    "al2o3_pct",             // 2: Al2O3 (%)
    "fe2o3_pct",             // 3: Fe2O3 (%)

    // === Derived (4) ===
    "lsf",                   // 4: Lime saturation factor (see derived.rs)

    // === Kiln (5-7) ===
    "kiln_temp",             // 5: Burning zone temperature (°C)
    "fuel_rate",             // 6: Fuel feed rate (t/h)
    "o2",                    // 7: O2 at kiln outlet (%)

    // === Cooler / mill (8-10) ===
    "cooling_rate",          // 8: Clinker cooling rate
    "blaine",                // 9: Fineness (m²/kg)
    "mill_power",            // 10: Cement mill power draw (kW)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 11;

/// Regression target column
pub const TARGET_NAME: &str = "strength_28d";

/// Unit reported next to the predicted target
pub const TARGET_UNITS: &str = "MPa";

pub const LIMESTONE_INDEX: usize = 0;
pub const LSF_INDEX: usize = 4;

/// Features that are physical shares/concentrations and cannot be negative
pub const NON_NEGATIVE_FEATURES: &[&str] = &[
    "limestone_pct",
    "silica_pct",
    "al2o3_pct",
    "fe2o3_pct",
    "o2",
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    // Hash all feature names in order, then the target
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.update(TARGET_NAME.as_bytes());

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// SCHEMA VALIDATION
// ============================================================================

/// Dataset or input record does not fit the feature schema
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Dataset missing required columns: [{}]", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Check that every feature column and the target are present.
///
/// Missing names are reported in schema order with the target last.
/// Extra columns are allowed and ignored by callers.
pub fn validate_columns<S: AsRef<str>>(columns: &[S]) -> Result<(), SchemaError> {
    let missing: Vec<String> = FEATURE_LAYOUT
        .iter()
        .copied()
        .chain(std::iter::once(TARGET_NAME))
        .filter(|required| !columns.iter().any(|c| c.as_ref() == *required))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns { missing })
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// SLIDER CONFIG (static UI bounds, not derived from data)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSetting {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

const fn slider(min: f64, max: f64, step: f64, default: f64) -> SliderSetting {
    SliderSetting { min, max, step, default }
}

/// `lsf` is derived, so it has no slider
pub const SLIDER_BOUNDS: &[(&str, SliderSetting)] = &[
    ("limestone_pct", slider(70.0, 90.0, 0.1, 80.0)),
    ("silica_pct", slider(3.0, 8.0, 0.1, 5.0)),
    ("al2o3_pct", slider(1.0, 3.5, 0.1, 2.0)),
    ("fe2o3_pct", slider(1.0, 3.0, 0.1, 2.0)),
    ("kiln_temp", slider(1350.0, 1500.0, 1.0, 1425.0)),
    ("fuel_rate", slider(3.5, 6.0, 0.1, 4.5)),
    ("o2", slider(3.0, 6.0, 0.1, 4.5)),
    ("cooling_rate", slider(2.0, 5.0, 0.1, 3.2)),
    ("blaine", slider(280.0, 360.0, 1.0, 320.0)),
    ("mill_power", slider(1500.0, 3500.0, 10.0, 2200.0)),
];

pub fn slider_config() -> BTreeMap<String, SliderSetting> {
    SLIDER_BOUNDS
        .iter()
        .map(|(name, setting)| (name.to_string(), *setting))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
