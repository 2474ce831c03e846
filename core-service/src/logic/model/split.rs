//! Reproducible row sampling: train/test split and subsampling.

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;

/// Row indices of the two partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with `seed`, put the first `ceil(n * test_ratio)` rows in
/// the test partition. Both sides keep at least one row; callers must
/// guarantee `n >= 2`.
pub fn train_test_split(n: usize, test_ratio: f64, seed: u64) -> TrainTestSplit {
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let test_len = ((n as f64) * test_ratio).ceil() as usize;
    let test_len = test_len.clamp(1, n.saturating_sub(1).max(1));

    let train = order.split_off(test_len);
    TrainTestSplit { train, test: order }
}

/// Pick `min(k, rows.len())` distinct entries of `rows` without replacement.
pub fn sample_rows(rows: &[usize], k: usize, seed: u64) -> Vec<usize> {
    let k = k.min(rows.len());
    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, rows.len(), k)
        .into_iter()
        .map(|i| rows[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let split = train_test_split(10, 0.2, 7);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let split = train_test_split(11, 0.2, 7);
        assert_eq!(split.test.len(), 3);
    }

    #[test]
    fn test_split_is_partition() {
        let split = train_test_split(25, 0.2, 7);
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_reproducible() {
        assert_eq!(train_test_split(50, 0.2, 7), train_test_split(50, 0.2, 7));
        assert_ne!(train_test_split(50, 0.2, 7), train_test_split(50, 0.2, 8));
    }

    #[test]
    fn test_tiny_split_keeps_both_sides() {
        let split = train_test_split(2, 0.2, 7);
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.train.len(), 1);
    }

    #[test]
    fn test_sample_rows() {
        let rows: Vec<usize> = (100..130).collect();
        let picked = sample_rows(&rows, 10, 7);
        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|r| rows.contains(r)));
        let mut unique = picked.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert_eq!(picked, sample_rows(&rows, 10, 7));

        assert_eq!(sample_rows(&rows, 500, 7).len(), rows.len());
    }
}
