use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::features::layout::{layout_hash, FEATURE_COUNT, FEATURE_VERSION};
use crate::logic::service::PredictionService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,

    pub artifact_path: String,
    pub model: ModelStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub explainable: bool, // false for bare-model artifacts
    pub artifact_id: Option<Uuid>,
    pub trained_at: Option<DateTime<Utc>>,
    pub train_rows: Option<usize>,
    pub test_rows: Option<usize>,
    pub n_estimators: Option<usize>,
}

pub fn engine_status(service: &PredictionService) -> EngineStatus {
    let state = service.snapshot();
    let meta = state.as_ref().and_then(|s| s.meta.as_ref());

    EngineStatus {
        feature_version: FEATURE_VERSION,
        layout_hash: layout_hash(),
        feature_count: FEATURE_COUNT,
        artifact_path: service.store().path().display().to_string(),
        model: ModelStatus {
            loaded: state.is_some(),
            explainable: state.as_ref().is_some_and(|s| s.background.is_some()),
            artifact_id: meta.map(|m| m.id),
            trained_at: meta.map(|m| m.trained_at),
            train_rows: meta.map(|m| m.train_rows),
            test_rows: meta.map(|m| m.test_rows),
            n_estimators: state.as_ref().map(|s| s.model.trees().len()),
        },
    }
}
