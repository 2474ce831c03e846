use super::types::{ExplainError, Explanation, ShapContribution};
use crate::logic::features::{feature_name, FeatureVector};
use crate::logic::model::{BackgroundSample, Node, RandomForest, RegressionTree};

// ============================================================================
// EXPLAINER TRAIT
// ============================================================================

/// Pluggable attribution algorithm.
///
/// Ranking and recommendations only consume `Explanation`, so any additive
/// method can be swapped in here.
pub trait Explainer: Send + Sync {
    fn explain(
        &self,
        model: &RandomForest,
        background: &BackgroundSample,
        input: &FeatureVector,
    ) -> Result<Explanation, ExplainError>;
}

// ============================================================================
// INTERVENTIONAL TREE SHAP
// ============================================================================

/// Exact Shapley values of `v(S) = f(x_S, z_rest)` per background row `z`,
/// averaged over the background and over trees.
///
/// Per (tree, z) the walk tracks, for every feature met on the path where
/// x and z disagree, whether the coalition takes x's branch or z's. A leaf
/// reached with `a` x-side and `b` z-side features gives each x-side feature
/// `value * (a-1)! b! / (a+b)!` and each z-side one `-value * a! (b-1)! / (a+b)!`.
/// Contributions therefore sum to `f(x) - f(z)` exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeExplainer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Open,
    Input,
    Reference,
}

struct PathWalk<'a> {
    nodes: &'a [Node],
    x: &'a [f64],
    z: &'a [f64],
    sides: Vec<Side>,
    factorial: &'a [f64],
    phi: &'a mut [f64],
}

impl PathWalk<'_> {
    /// a! b! / (a + b + 1)!
    fn weight(&self, a: usize, b: usize) -> f64 {
        self.factorial[a] * self.factorial[b] / self.factorial[a + b + 1]
    }

    fn walk(&mut self, index: usize, n_input: usize, n_reference: usize) {
        match self.nodes[index] {
            Node::Leaf { value } => {
                if n_input + n_reference == 0 {
                    return;
                }
                let gain = if n_input > 0 { value * self.weight(n_input - 1, n_reference) } else { 0.0 };
                let loss = if n_reference > 0 { value * self.weight(n_input, n_reference - 1) } else { 0.0 };
                for (feature, side) in self.sides.iter().enumerate() {
                    match side {
                        Side::Input => self.phi[feature] += gain,
                        Side::Reference => self.phi[feature] -= loss,
                        Side::Open => {}
                    }
                }
            }
            Node::Split { feature, threshold, left, right } => {
                let x_child = RegressionTree::child_for(self.x, feature, threshold, left, right);
                let z_child = RegressionTree::child_for(self.z, feature, threshold, left, right);

                let side = self.sides[feature];
                match side {
                    Side::Input => self.walk(x_child, n_input, n_reference),
                    Side::Reference => self.walk(z_child, n_input, n_reference),
                    Side::Open if x_child == z_child => self.walk(x_child, n_input, n_reference),
                    Side::Open => {
                        self.sides[feature] = Side::Input;
                        self.walk(x_child, n_input + 1, n_reference);
                        self.sides[feature] = Side::Reference;
                        self.walk(z_child, n_input, n_reference + 1);
                        self.sides[feature] = Side::Open;
                    }
                }
            }
        }
    }
}

impl TreeExplainer {
    pub fn new() -> Self {
        Self
    }

    /// Attribution of `f(x) - f(z)` for a single tree and reference row
    fn explain_pair(tree: &RegressionTree, x: &[f64], z: &[f64], factorial: &[f64], phi: &mut [f64]) {
        let mut walk = PathWalk {
            nodes: tree.nodes(),
            x,
            z,
            sides: vec![Side::Open; x.len()],
            factorial,
            phi,
        };
        walk.walk(0, 0, 0);
    }
}

impl Explainer for TreeExplainer {
    fn explain(
        &self,
        model: &RandomForest,
        background: &BackgroundSample,
        input: &FeatureVector,
    ) -> Result<Explanation, ExplainError> {
        let x = input.as_slice();
        if x.len() != model.n_features() {
            return Err(ExplainError::DimensionMismatch {
                expected: model.n_features(),
                found: x.len(),
            });
        }
        let base_value = background
            .expected_value(model)
            .ok_or(ExplainError::EmptyBackground)?;

        let n_features = x.len();
        let factorial: Vec<f64> = std::iter::once(1.0)
            .chain((1..=n_features + 1).scan(1.0, |acc, k| {
                *acc *= k as f64;
                Some(*acc)
            }))
            .collect();

        let mut phi = vec![0.0; n_features];
        for tree in model.trees() {
            for z in background.rows() {
                Self::explain_pair(tree, x, z, &factorial, &mut phi);
            }
        }

        let scale = (model.trees().len() * background.len()) as f64;
        let contributions = phi
            .into_iter()
            .enumerate()
            .map(|(i, value)| ShapContribution {
                feature: feature_name(i).unwrap_or("unknown").to_string(),
                shap_value: value / scale,
                actual_value: x[i],
            })
            .collect();

        Ok(Explanation { base_value, contributions })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FEATURE_COUNT;
    use crate::logic::model::{ForestParams, TreeParams};
    use ndarray::Array2;

    /// y = 2·kiln_temp + 5·blaine on a small grid, other features constant
    fn two_feature_forest() -> (RandomForest, BackgroundSample) {
        let mut rows = Vec::new();
        for k in 0..6 {
            for b in 0..6 {
                let mut row = [1.0; FEATURE_COUNT];
                row[5] = k as f64;
                row[9] = b as f64;
                rows.push(row);
            }
        }
        let x = Array2::from_shape_fn((rows.len(), FEATURE_COUNT), |(r, c)| rows[r][c]);
        let y: Vec<f64> = rows.iter().map(|r| 2.0 * r[5] + 5.0 * r[9]).collect();
        let params = ForestParams { n_estimators: 8, seed: 3, tree: TreeParams::default() };
        let forest = RandomForest::fit(x.view(), &y, &params);
        let background = BackgroundSample::new(rows.into_iter().step_by(3).collect());
        (forest, background)
    }

    fn input(kiln: f64, blaine: f64) -> FeatureVector {
        let mut values = [1.0; FEATURE_COUNT];
        values[5] = kiln;
        values[9] = blaine;
        FeatureVector::from_values(values)
    }

    #[test]
    fn test_additivity() {
        let (forest, background) = two_feature_forest();
        for (k, b) in [(0.0, 0.0), (5.0, 5.0), (2.0, 4.0), (4.5, 0.5)] {
            let x = input(k, b);
            let explanation = TreeExplainer.explain(&forest, &background, &x).unwrap();
            let predicted = forest.predict(&x);
            assert!(
                (explanation.reconstructed_prediction() - predicted).abs() < 1e-9,
                "base {} + sum {} != {}",
                explanation.base_value,
                explanation.contribution_sum(),
                predicted
            );
        }
    }

    #[test]
    fn test_unused_features_get_zero() {
        let (forest, background) = two_feature_forest();
        let explanation = TreeExplainer.explain(&forest, &background, &input(5.0, 0.0)).unwrap();
        for c in &explanation.contributions {
            if c.feature != "kiln_temp" && c.feature != "blaine" {
                assert_eq!(c.shap_value, 0.0, "{} should be inert", c.feature);
            }
        }
    }

    #[test]
    fn test_sign_follows_effect() {
        let (forest, background) = two_feature_forest();
        let explanation = TreeExplainer.explain(&forest, &background, &input(5.0, 0.0)).unwrap();
        let value = |name: &str| {
            explanation.contributions.iter().find(|c| c.feature == name).unwrap().shap_value
        };
        assert!(value("kiln_temp") > 0.0);
        assert!(value("blaine") < 0.0);
    }

    #[test]
    fn test_contributions_in_layout_order_with_actual_values() {
        let (forest, background) = two_feature_forest();
        let x = input(3.0, 2.0);
        let explanation = TreeExplainer.explain(&forest, &background, &x).unwrap();
        assert_eq!(explanation.contributions.len(), FEATURE_COUNT);
        for (i, c) in explanation.contributions.iter().enumerate() {
            assert_eq!(c.feature, feature_name(i).unwrap());
            assert_eq!(c.actual_value, x.values[i]);
        }
    }

    #[test]
    fn test_single_tree_matches_hand_computed_shapley() {
        // f = 1 if (x0 > 0.5 and x1 > 0.5) else 0, x = (1,1), z = (0,0)
        // v(∅)=0, v({0})=0, v({1})=0, v({0,1})=1 → φ0 = φ1 = 0.5
        let x = ndarray::array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let y = [0.0, 0.0, 0.0, 1.0];
        let tree = RegressionTree::fit(x.view(), &y, &[0, 1, 2, 3], &TreeParams::default());

        let factorial = [1.0, 1.0, 2.0, 6.0];
        let mut phi = [0.0; 2];
        TreeExplainer::explain_pair(&tree, &[1.0, 1.0], &[0.0, 0.0], &factorial, &mut phi);
        assert!((phi[0] - 0.5).abs() < 1e-12);
        assert!((phi[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_background_is_error() {
        let (forest, _) = two_feature_forest();
        let err = TreeExplainer
            .explain(&forest, &BackgroundSample::default(), &input(1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, ExplainError::EmptyBackground);
    }
}
