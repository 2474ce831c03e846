//! Prediction Service - owns the current model and runs both pipelines
//!
//! # Lifecycle
//! absent (cold start) → populated by training or by loading a stored
//! artifact → replaced wholesale by the next retrain.
//!
//! # Concurrency
//! The current model is an immutable `Arc<ModelState>` behind a RwLock.
//! Predictions clone the Arc and release the lock immediately, so they
//! always see one consistent model + background pair. Training is
//! serialized by `train_lock`; the new state is built and persisted before
//! a single write swaps it in.


use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logic::artifact::{Artifact, ArtifactMeta, ArtifactStore, StoredPayload};
use crate::logic::dataset::{parse_csv, PreviewRow, TrainingDataset};
use crate::logic::explain::{Explainer, Explanation, TreeExplainer};
use crate::logic::features::ProcessInputs;
use crate::logic::model::{self, BackgroundSample, Metrics, RandomForest, TrainingConfig};
use crate::logic::quality::{classify_with, GapResolution, QualityAssessment};
use crate::logic::recommend::{self, delta_to_target, Recommendation, DEFAULT_TOP_K};

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub training: TrainingConfig,
    /// Number of features turned into recommendations
    pub top_k: usize,
    pub gap_resolution: GapResolution,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            training: TrainingConfig::default(),
            top_k: DEFAULT_TOP_K,
            gap_resolution: GapResolution::default(),
        }
    }
}

// ============================================================================
// MODEL STATE (immutable snapshot)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ModelState {
    pub model: RandomForest,
    /// None for model-only artifacts: predictions still work, no explanation
    pub background: Option<BackgroundSample>,
    pub metrics: Option<Metrics>,
    pub sample_data: Option<Vec<PreviewRow>>,
    pub meta: Option<ArtifactMeta>,
}

impl From<Artifact> for ModelState {
    fn from(artifact: Artifact) -> Self {
        Self {
            model: artifact.model,
            background: Some(artifact.background),
            metrics: Some(artifact.metrics),
            sample_data: Some(artifact.sample_data),
            meta: Some(artifact.meta),
        }
    }
}

impl From<StoredPayload> for ModelState {
    fn from(payload: StoredPayload) -> Self {
        match payload {
            StoredPayload::Bundle(artifact) => artifact.into(),
            StoredPayload::ModelOnly { model } => Self {
                model,
                background: None,
                metrics: None,
                sample_data: None,
                meta: None,
            },
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

#[derive(Debug, Clone)]
pub struct Prediction {
    /// Raw model output (unrounded)
    pub strength: f64,
    pub quality: QualityAssessment,
    pub delta_to_target: Option<f64>,
    /// None when no background is loaded or attribution failed
    pub explanation: Option<Explanation>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ready,
    WaitingForData,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Ready => "ready",
            HealthStatus::WaitingForData => "waiting_for_data",
        }
    }
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct PredictionService {
    store: ArtifactStore,
    config: ServiceConfig,
    explainer: Box<dyn Explainer>,
    current: RwLock<Option<Arc<ModelState>>>,
    train_lock: Mutex<()>,
}

impl PredictionService {
    /// Empty service; nothing is read from the store
    pub fn new(store: ArtifactStore, config: ServiceConfig) -> Self {
        Self {
            store,
            config,
            explainer: Box::new(TreeExplainer::new()),
            current: RwLock::new(None),
            train_lock: Mutex::new(()),
        }
    }

    /// Service initialized from the stored artifact, if a usable one exists
    pub fn open(store: ArtifactStore, config: ServiceConfig) -> Self {
        let service = Self::new(store, config);
        service.reload();
        service
    }

    pub fn with_explainer(mut self, explainer: Box<dyn Explainer>) -> Self {
        self.explainer = explainer;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Re-read the store. A missing or unusable artifact clears the model.
    pub fn reload(&self) -> bool {
        let _guard = self.train_lock.lock();
        let state = self.store.load().map(|payload| Arc::new(ModelState::from(payload)));
        let loaded = state.is_some();
        *self.current.write() = state;
        loaded
    }

    pub fn snapshot(&self) -> Option<Arc<ModelState>> {
        self.current.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn health(&self) -> HealthStatus {
        if self.is_ready() {
            HealthStatus::Ready
        } else {
            HealthStatus::WaitingForData
        }
    }

    // ------------------------------------------------------------------------
    // Inference
    // ------------------------------------------------------------------------

    /// validate → resolve lsf → predict → classify → explain → recommend
    pub fn predict(&self, inputs: &ProcessInputs, target_strength: Option<f64>) -> Result<Prediction> {
        let state = self.snapshot().ok_or(Error::ModelNotReady)?;
        let features = inputs.resolve()?;

        let strength = state.model.predict(&features);
        let quality = classify_with(strength, self.config.gap_resolution);

        let explanation = state.background.as_ref().and_then(|background| {
            match self.explainer.explain(&state.model, background, &features) {
                Ok(explanation) => Some(explanation),
                Err(e) => {
                    log::warn!("Attribution skipped: {}", e);
                    None
                }
            }
        });

        let recommendations = explanation
            .as_ref()
            .map(|e| recommend::recommend(&e.contributions, self.config.top_k))
            .unwrap_or_default();

        log::debug!(
            "Predicted {:.4} ({}), {} recommendations",
            strength,
            quality.band,
            recommendations.len()
        );

        Ok(Prediction {
            strength,
            quality,
            delta_to_target: delta_to_target(target_strength, strength),
            explanation,
            recommendations,
        })
    }

    // ------------------------------------------------------------------------
    // Training
    // ------------------------------------------------------------------------

    /// Train, persist, then swap. On any error the current model is kept.
    pub fn train(&self, dataset: &TrainingDataset) -> Result<Arc<ModelState>> {
        let _guard = self.train_lock.lock();

        let artifact = model::train(dataset, &self.config.training)?;
        self.store.save(&artifact)?;

        let state = Arc::new(ModelState::from(artifact));
        *self.current.write() = Some(Arc::clone(&state));
        Ok(state)
    }

    pub fn train_from_csv(&self, bytes: &[u8]) -> Result<Arc<ModelState>> {
        let dataset = parse_csv(bytes)?;
        self.train(&dataset)
    }
}
