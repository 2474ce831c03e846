//! Recommendation Synthesizer
//!
//! Turns an explanation into operator guidance. Contributions are ranked by
//! magnitude; for each of the top K the suggested action is the opposite of
//! the contribution's sign (a feature that pushed strength up is a lever for
//! pulling it down, and vice versa).
//!
//! This is a heuristic read of a local additive explanation. It says which
//! inputs moved *this* prediction, not what will happen if an operator
//! changes them; process interactions can make the effect of a change differ.

use serde::{Deserialize, Serialize};

use crate::logic::explain::ShapContribution;
use crate::logic::features::{feature_index, FEATURE_COUNT};

pub const DEFAULT_TOP_K: usize = 3;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Positive contribution → Decrease, otherwise Increase
    pub fn for_contribution(shap_value: f64) -> Self {
        if shap_value > 0.0 {
            Direction::Decrease
        } else {
            Direction::Increase
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Direction::Increase => "Increase",
            Direction::Decrease => "Decrease",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub feature: String,
    pub direction: Direction,
    pub shap_value: f64,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.direction.verb(), self.feature)
    }
}

// ============================================================================
// RANKING
// ============================================================================

/// Contributions by |value| descending. Equal magnitudes keep schema order;
/// unknown feature names sort after schema features, then by input position.
pub fn rank_contributions(contributions: &[ShapContribution]) -> Vec<&ShapContribution> {
    let mut ranked: Vec<(usize, &ShapContribution)> = contributions
        .iter()
        .enumerate()
        .map(|(position, c)| (feature_index(&c.feature).unwrap_or(FEATURE_COUNT + position), c))
        .collect();

    ranked.sort_by(|(ia, a), (ib, b)| {
        b.shap_value
            .abs()
            .total_cmp(&a.shap_value.abs())
            .then(ia.cmp(ib))
    });

    ranked.into_iter().map(|(_, c)| c).collect()
}

pub fn recommend(contributions: &[ShapContribution], top_k: usize) -> Vec<Recommendation> {
    rank_contributions(contributions)
        .into_iter()
        .take(top_k)
        .map(|c| Recommendation {
            feature: c.feature.clone(),
            direction: Direction::for_contribution(c.shap_value),
            shap_value: c.shap_value,
        })
        .collect()
}

pub fn top_features(recommendations: &[Recommendation]) -> Vec<String> {
    recommendations.iter().map(|r| r.feature.clone()).collect()
}

// ============================================================================
// TARGET GAP
// ============================================================================

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// `target - predicted`, rounded to 4 decimals; None without a target
pub fn delta_to_target(target: Option<f64>, predicted: f64) -> Option<f64> {
    target.map(|t| round4(t - predicted))
}

// ============================================================================
// TESTS
// ============================================================================
