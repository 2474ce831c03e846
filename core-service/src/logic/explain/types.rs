use serde::{Deserialize, Serialize};

/// Additive contribution of one feature to one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapContribution {
    pub feature: String,
    pub shap_value: f64,
    pub actual_value: f64, // input value the contribution refers to
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Expected model output over the background sample
    pub base_value: f64,
    /// One entry per feature, in layout order
    pub contributions: Vec<ShapContribution>,
}

impl Explanation {
    pub fn contribution_sum(&self) -> f64 {
        self.contributions.iter().map(|c| c.shap_value).sum()
    }

    /// base + Σ contributions; matches the model output up to float error
    pub fn reconstructed_prediction(&self) -> f64 {
        self.base_value + self.contribution_sum()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExplainError {
    #[error("Background sample is empty")]
    EmptyBackground,

    #[error("Model expects {expected} features, input has {found}")]
    DimensionMismatch { expected: usize, found: usize },
}
