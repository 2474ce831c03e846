//! Inference handler

use axum::{extract::State, Json};
use silo_quality_core::api::{self, PredictionResponse, SimulationInputs};

use crate::{AppResult, AppState};

/// Predict strength for one set of readings, with attribution and suggestions
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<SimulationInputs>,
) -> AppResult<Json<PredictionResponse>> {
    let service = state.service.clone();
    let response = tokio::task::spawn_blocking(move || api::predict(&service, &req)).await??;

    tracing::debug!(
        strength = response.predicted_strength,
        severity = %response.quality_severity,
        "Prediction served"
    );

    Ok(Json(response))
}
