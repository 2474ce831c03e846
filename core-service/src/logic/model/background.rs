//! Background sample - reference distribution for attribution

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::forest::RandomForest;

/// Small subset of training feature rows, in layout order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSample {
    rows: Vec<[f64; FEATURE_COUNT]>,
}

impl BackgroundSample {
    pub fn new(rows: Vec<[f64; FEATURE_COUNT]>) -> Self {
        Self { rows }
    }

    pub fn from_vectors<'a>(vectors: impl IntoIterator<Item = &'a FeatureVector>) -> Self {
        Self {
            rows: vectors.into_iter().map(|v| v.values).collect(),
        }
    }

    pub fn rows(&self) -> &[[f64; FEATURE_COUNT]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Expected model output over the sample (the attribution baseline)
    pub fn expected_value(&self, model: &RandomForest) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let sum: f64 = self.rows.iter().map(|row| model.predict_row(row)).sum();
        Some(sum / self.rows.len() as f64)
    }

    pub fn all_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}
