//! Health check handler

use axum::{extract::State, Json};
use silo_quality_core::api::{self, EngineStatus, HealthResponse};

use crate::AppState;

/// "ready" once a model is loaded, "waiting_for_data" before
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(api::health(&state.service))
}

/// Feature layout and loaded-model details
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(api::engine_status(&state.service))
}
