//! Config introspection handler

use axum::{extract::State, Json};
use silo_quality_core::api::{self, ConfigResponse};

use crate::AppState;

/// Schema, slider bounds, readiness, last metrics and data preview
pub async fn get(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(api::get_config(&state.service))
}
