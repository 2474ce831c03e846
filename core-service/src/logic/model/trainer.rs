//! Model Trainer
//!
//! dataset → 80/20 split → forest → hold-out metrics → background sample →
//! preview sample → Artifact. Every random step is seeded, so the same
//! dataset and config always produce the same model, metrics and background.

use ndarray::Axis;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logic::artifact::{Artifact, ArtifactMeta};
use crate::logic::dataset::TrainingDataset;

use super::background::BackgroundSample;
use super::forest::{ForestParams, RandomForest};
use super::metrics::Metrics;
use super::split::{sample_rows, train_test_split};
use super::tree::TreeParams;

/// Need one row on each side of the split
pub const MIN_TRAINING_ROWS: usize = 2;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub n_estimators: usize,
    pub seed: u64,
    /// Share of rows held out for evaluation
    pub test_ratio: f64,
    /// Upper bound on background rows kept for attribution
    pub background_size: usize,
    /// Upper bound on preview rows shown to users
    pub preview_size: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            seed: 7,
            test_ratio: 0.2,
            background_size: 200,
            preview_size: 6,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl TrainingConfig {
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_estimators: self.n_estimators,
            seed: self.seed,
            tree: TreeParams {
                max_depth: self.max_depth,
                min_samples_split: self.min_samples_split,
            },
        }
    }
}

// ============================================================================
// TRAIN
// ============================================================================

pub fn train(dataset: &TrainingDataset, config: &TrainingConfig) -> Result<Artifact> {
    let n = dataset.len();
    if n < MIN_TRAINING_ROWS {
        return Err(Error::DataFormat(format!(
            "Dataset needs at least {MIN_TRAINING_ROWS} rows to train, got {n}"
        )));
    }
    if let Some(bad) = dataset.rows().iter().position(|r| !r.is_finite()) {
        return Err(Error::DataFormat(format!("row {} contains a non-finite value", bad + 1)));
    }
    if !(config.test_ratio > 0.0 && config.test_ratio < 1.0) {
        return Err(Error::DataFormat(format!(
            "test_ratio must be in (0, 1), got {}",
            config.test_ratio
        )));
    }

    let x = dataset.feature_matrix();
    let y = dataset.targets();

    let split = train_test_split(n, config.test_ratio, config.seed);
    let x_train = x.select(Axis(0), &split.train);
    let y_train: Vec<f64> = split.train.iter().map(|&i| y[i]).collect();
    let x_test = x.select(Axis(0), &split.test);
    let y_test: Vec<f64> = split.test.iter().map(|&i| y[i]).collect();

    log::info!(
        "Training forest ({} trees, seed {}) on {} rows, holding out {}",
        config.n_estimators,
        config.seed,
        split.train.len(),
        split.test.len()
    );

    let model = RandomForest::fit(x_train.view(), &y_train, &config.forest_params());
    let predictions = model.predict_matrix(x_test.view());
    let metrics = Metrics::evaluate(&y_test, &predictions)
        .ok_or_else(|| Error::DataFormat("hold-out split produced no predictions".to_string()))?;

    let background = BackgroundSample::from_vectors(
        sample_rows(&split.train, config.background_size, config.seed)
            .into_iter()
            .map(|i| &dataset.rows()[i].features),
    );

    let all_rows: Vec<usize> = (0..n).collect();
    let sample_data = sample_rows(&all_rows, config.preview_size, config.seed)
        .into_iter()
        .map(|i| dataset.rows()[i].to_preview())
        .collect();

    log::info!(
        "Training complete: MAE {:.4}, MSE {:.4}, R2 {:.4}, background {} rows",
        metrics.mae,
        metrics.mse,
        metrics.r2,
        background.len()
    );

    Ok(Artifact {
        meta: ArtifactMeta::new(split.train.len(), split.test.len(), config),
        model,
        background,
        metrics,
        sample_data,
    })
}
