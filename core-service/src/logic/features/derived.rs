//! Derived features
//!
//! `lsf` is the only feature that can be computed instead of supplied.
//! Training data always carries the column; inference input may omit it.
//! Both paths go through [`resolve_lsf`] so the formula cannot diverge.

use serde::{Deserialize, Serialize};

use super::layout::{SchemaError, FEATURE_COUNT, NON_NEGATIVE_FEATURES};
use super::vector::FeatureVector;

/// lsf ≈ 0.8 × limestone share
pub const LSF_LIMESTONE_FACTOR: f64 = 0.8;

pub fn compute_lsf(limestone_pct: f64) -> f64 {
    LSF_LIMESTONE_FACTOR * limestone_pct / 100.0
}

/// Caller-supplied value wins (scenario override), otherwise computed
pub fn resolve_lsf(limestone_pct: f64, supplied: Option<f64>) -> f64 {
    supplied.unwrap_or_else(|| compute_lsf(limestone_pct))
}

// ============================================================================
// PROCESS INPUTS
// ============================================================================

/// One reading from the silo/kiln line, as an operator or client sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInputs {
    pub limestone_pct: f64,
    pub silica_pct: f64,
    pub al2o3_pct: f64,
    pub fe2o3_pct: f64,
    pub kiln_temp: f64,
    pub fuel_rate: f64,
    /// Oxygen percentage at kiln outlet
    pub o2: f64,
    pub cooling_rate: f64,
    pub blaine: f64,
    pub mill_power: f64,
    /// Lime saturation factor. Optional; computed if missing.
    #[serde(default)]
    pub lsf: Option<f64>,
}

impl ProcessInputs {
    /// Validate and assemble the model input in layout order.
    pub fn resolve(&self) -> Result<FeatureVector, SchemaError> {
        self.validate()?;

        let values: [f64; FEATURE_COUNT] = [
            self.limestone_pct,
            self.silica_pct,
            self.al2o3_pct,
            self.fe2o3_pct,
            resolve_lsf(self.limestone_pct, self.lsf),
            self.kiln_temp,
            self.fuel_rate,
            self.o2,
            self.cooling_rate,
            self.blaine,
            self.mill_power,
        ];

        Ok(FeatureVector::from_values(values))
    }

    fn raw_fields(&self) -> [(&'static str, f64); 10] {
        [
            ("limestone_pct", self.limestone_pct),
            ("silica_pct", self.silica_pct),
            ("al2o3_pct", self.al2o3_pct),
            ("fe2o3_pct", self.fe2o3_pct),
            ("kiln_temp", self.kiln_temp),
            ("fuel_rate", self.fuel_rate),
            ("o2", self.o2),
            ("cooling_rate", self.cooling_rate),
            ("blaine", self.blaine),
            ("mill_power", self.mill_power),
        ]
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let lsf = self.lsf.map(|v| ("lsf", v));

        for (field, value) in self.raw_fields().into_iter().chain(lsf) {
            if !value.is_finite() {
                return Err(SchemaError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be a finite number".to_string(),
                });
            }
            if value < 0.0 && NON_NEGATIVE_FEATURES.contains(&field) {
                return Err(SchemaError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must be >= 0, got {value}"),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
