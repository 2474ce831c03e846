use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::dataset::PreviewRow;
use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use crate::logic::model::{BackgroundSample, Metrics, RandomForest, TrainingConfig};

// ============================================================================
// ARTIFACT (one training run, persisted as a unit)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub train_rows: usize,
    pub test_rows: usize,
    pub n_estimators: usize,
    pub seed: u64,
    pub feature_version: u8,
    pub layout_hash: u32,
}

impl ArtifactMeta {
    pub fn new(train_rows: usize, test_rows: usize, config: &TrainingConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            trained_at: Utc::now(),
            train_rows,
            test_rows,
            n_estimators: config.n_estimators,
            seed: config.seed,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub meta: ArtifactMeta,
    pub model: RandomForest,
    pub background: BackgroundSample,
    pub metrics: Metrics,
    pub sample_data: Vec<PreviewRow>,
}

// ============================================================================
// STORED PAYLOAD (tagged shape at the storage boundary)
// ============================================================================

/// What a persisted file may contain.
///
/// `ModelOnly` is the bare-model shape written before bundles existed:
/// predictions work, explanations and metrics are unavailable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredPayload {
    Bundle(Artifact),
    ModelOnly { model: RandomForest },
}

/// Borrowing twin of `StoredPayload` for writes
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(super) enum PayloadRef<'a> {
    Bundle(&'a Artifact),
    ModelOnly { model: &'a RandomForest },
}

impl StoredPayload {
    pub fn model(&self) -> &RandomForest {
        match self {
            StoredPayload::Bundle(artifact) => &artifact.model,
            StoredPayload::ModelOnly { model } => model,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StoredPayload::Bundle(_) => "bundle",
            StoredPayload::ModelOnly { .. } => "model_only",
        }
    }
}

// ============================================================================
// ON-DISK ENVELOPE
// ============================================================================

/// Bump when the envelope or payload encoding changes incompatibly
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ArtifactFile {
    pub format_version: u32,
    pub feature_version: u8,
    pub layout_hash: u32,
    /// SHA-256 (hex) of `payload`
    pub checksum: String,
    /// JSON-encoded `StoredPayload`
    pub payload: String,
}
