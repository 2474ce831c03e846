//! Explain Module - per-feature attribution of a prediction
//!
//! `Explainer` is the seam; `TreeExplainer` is the default algorithm
//! (interventional Tree SHAP against the training background sample).

pub mod types;
pub mod engine;

pub use types::{ExplainError, Explanation, ShapContribution};
pub use engine::{Explainer, TreeExplainer};
