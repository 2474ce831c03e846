//! Random Forest Regressor
//!
//! Bagged ensemble of CART trees. Every tree sees a bootstrap draw of the
//! training rows and considers all features at each split. Prediction is the
//! mean of the tree outputs.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use super::tree::{RegressionTree, TreeParams};

/// Ensemble growth parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub seed: u64,
    pub tree: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            seed: 7,
            tree: TreeParams::default(),
        }
    }
}

/// Trained ensemble. Immutable once fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Fit on an `n x n_features` matrix. Bootstrap draws come from one
    /// seeded generator, so identical inputs give identical forests.
    pub fn fit(x: ArrayView2<f64>, y: &[f64], params: &ForestParams) -> Self {
        let n = x.nrows();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators.max(1) {
            let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            trees.push(RegressionTree::fit(x, y, &bootstrap, &params.tree));
        }

        log::debug!(
            "Fitted forest: {} trees on {} rows, max depth {}",
            trees.len(),
            n,
            trees.iter().map(RegressionTree::depth).max().unwrap_or(0)
        );

        Self {
            n_features: x.ncols(),
            trees,
        }
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn predict_row(&self, x: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(x)).sum();
        sum / self.trees.len() as f64
    }

    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.predict_row(features.as_slice())
    }

    pub fn predict_matrix(&self, x: ArrayView2<f64>) -> Vec<f64> {
        x.rows()
            .into_iter()
            .map(|row| match row.as_slice() {
                Some(slice) => self.predict_row(slice),
                None => self.predict_row(&row.to_vec()),
            })
            .collect()
    }

    /// Reject deserialized models that could panic at prediction time
    pub fn is_well_formed(&self) -> bool {
        self.n_features == FEATURE_COUNT
            && !self.trees.is_empty()
            && self.trees.iter().all(|t| t.is_well_formed(self.n_features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn linear_data(n: usize) -> (Array2<f64>, Vec<f64>) {
        let x = Array2::from_shape_fn((n, 2), |(r, c)| if c == 0 { r as f64 } else { 1.0 });
        let y = (0..n).map(|r| 2.0 * r as f64).collect();
        (x, y)
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = linear_data(40);
        let params = ForestParams { n_estimators: 10, ..Default::default() };
        let a = RandomForest::fit(x.view(), &y, &params);
        let b = RandomForest::fit(x.view(), &y, &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_forest() {
        let (x, y) = linear_data(40);
        let a = RandomForest::fit(x.view(), &y, &ForestParams { n_estimators: 5, seed: 1, ..Default::default() });
        let b = RandomForest::fit(x.view(), &y, &ForestParams { n_estimators: 5, seed: 2, ..Default::default() });
        assert_ne!(a, b);
    }

    #[test]
    fn test_prediction_tracks_trend() {
        let (x, y) = linear_data(60);
        let forest = RandomForest::fit(x.view(), &y, &ForestParams { n_estimators: 25, ..Default::default() });
        assert_eq!(forest.trees().len(), 25);

        let low = forest.predict_row(&[5.0, 1.0]);
        let high = forest.predict_row(&[50.0, 1.0]);
        assert!(high > low);
        assert!((high - 100.0).abs() < 10.0, "high = {high}");
    }

    #[test]
    fn test_predict_matrix_matches_rows() {
        let (x, y) = linear_data(20);
        let forest = RandomForest::fit(x.view(), &y, &ForestParams { n_estimators: 4, ..Default::default() });
        let batch = forest.predict_matrix(x.view());
        for (r, value) in batch.iter().enumerate() {
            assert_eq!(*value, forest.predict_row(&[r as f64, 1.0]));
        }
    }
}
