//! Hold-out accuracy metrics

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean absolute error
    pub mae: f64,
    /// Mean squared error
    pub mse: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl Metrics {
    /// `None` when the slices are empty or their lengths differ
    pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> Option<Self> {
        if y_true.is_empty() || y_true.len() != y_pred.len() {
            return None;
        }
        let n = y_true.len() as f64;

        let mae = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).abs()).sum::<f64>() / n;
        let sse: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).powi(2)).sum();
        let mse = sse / n;

        let mean = y_true.iter().sum::<f64>() / n;
        let sst: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

        // Constant target: perfect predictions score 1, anything else 0
        let r2 = if sst == 0.0 {
            if sse == 0.0 { 1.0 } else { 0.0 }
        } else {
            1.0 - sse / sst
        };

        Some(Self { mae, mse, r2 })
    }
}
