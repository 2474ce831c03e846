//! Feature Vector - positional model input
//!
//! Index `i` always holds `FEATURE_LAYOUT[i]`; the layout version and hash
//! are checked once per artifact, not per vector.

use serde::{Deserialize, Serialize};
use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// (name, value) pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}
