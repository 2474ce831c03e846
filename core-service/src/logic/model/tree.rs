//! Regression Tree (CART, squared-error criterion)
//!
//! Nodes live in a flat arena; index 0 is the root. A sample goes left when
//! `x[feature] <= threshold`.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// None = grow until leaves are pure
    pub max_depth: Option<usize>,
    /// A node with fewer samples becomes a leaf
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

// ============================================================================
// PREDICTION
// ============================================================================

impl RegressionTree {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Index of the child a sample follows at a split node
    #[inline]
    pub fn child_for(x: &[f64], feature: usize, threshold: f64, left: usize, right: usize) -> usize {
        if x[feature] <= threshold { left } else { right }
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { value } => return value,
                Node::Split { feature, threshold, left, right } => {
                    index = Self::child_for(x, feature, threshold, left, right);
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        walk(&self.nodes, 0)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Structural sanity check used when loading persisted models
    pub fn is_well_formed(&self, feature_count: usize) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        self.nodes.iter().enumerate().all(|(i, node)| match *node {
            Node::Leaf { value } => value.is_finite(),
            // Children are always allocated after their parent, so this also rules out cycles
            Node::Split { feature, threshold, left, right } => {
                feature < feature_count
                    && threshold.is_finite()
                    && left > i
                    && right > i
                    && left < self.nodes.len()
                    && right < self.nodes.len()
            }
        })
    }
}

// ============================================================================
// TRAINING
// ============================================================================

impl RegressionTree {
    /// Grow a tree on the given sample indices (duplicates allowed, as with
    /// bootstrap draws).
    pub fn fit(x: ArrayView2<f64>, y: &[f64], indices: &[usize], params: &TreeParams) -> Self {
        let mut nodes = vec![Node::Leaf { value: 0.0 }];
        let mut stack: Vec<(usize, Vec<usize>, usize)> = vec![(0, indices.to_vec(), 0)];

        while let Some((slot, samples, depth)) = stack.pop() {
            let value = mean(y, &samples);

            let may_split = samples.len() >= params.min_samples_split.max(2)
                && params.max_depth.map_or(true, |max| depth < max);
            let split = if may_split { best_split(x, y, &samples) } else { None };

            let Some(split) = split else {
                nodes[slot] = Node::Leaf { value };
                continue;
            };

            let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
                .iter()
                .partition(|&&i| x[[i, split.feature]] <= split.threshold);

            let left = nodes.len();
            let right = left + 1;
            nodes.push(Node::Leaf { value: 0.0 });
            nodes.push(Node::Leaf { value: 0.0 });
            nodes[slot] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };

            stack.push((right, right_samples, depth + 1));
            stack.push((left, left_samples, depth + 1));
        }

        Self { nodes }
    }
}

fn mean(y: &[f64], samples: &[usize]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&i| y[i]).sum::<f64>() / samples.len() as f64
}

/// Best squared-error split over every feature.
///
/// Maximizes `sum_l²/n_l + sum_r²/n_r`, which is equivalent to minimizing
/// the children's total SSE. Returns None for pure or unsplittable nodes.
fn best_split(x: ArrayView2<f64>, y: &[f64], samples: &[usize]) -> Option<SplitCandidate> {
    let n = samples.len();
    let first = y[samples[0]];
    if samples.iter().all(|&i| y[i] == first) {
        return None;
    }

    let total_sum: f64 = samples.iter().map(|&i| y[i]).sum();
    let parent_score = total_sum * total_sum / n as f64;
    let min_gain = 1e-12 * parent_score.abs().max(1.0);

    let mut best: Option<SplitCandidate> = None;
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n);

    for feature in 0..x.ncols() {
        pairs.clear();
        pairs.extend(samples.iter().map(|&i| (x[[i, feature]], y[i])));
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        for k in 1..n {
            left_sum += pairs[k - 1].1;
            let (lo, hi) = (pairs[k - 1].0, pairs[k].0);
            if lo >= hi {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let score = left_sum * left_sum / k as f64 + right_sum * right_sum / (n - k) as f64;

            if score <= parent_score + min_gain {
                continue;
            }
            if best.as_ref().map_or(true, |b| score > b.score) {
                let mut threshold = lo + (hi - lo) / 2.0;
                // Midpoint can round up to `hi` for adjacent floats
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(SplitCandidate { feature, threshold, score });
            }
        }
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================
