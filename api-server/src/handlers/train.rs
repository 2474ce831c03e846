//! Training handler

use axum::{
    extract::{Multipart, State},
    Json,
};
use silo_quality_core::api::{self, TrainResponse};

use crate::{AppError, AppResult, AppState};

/// Multipart form field carrying the CSV
const FILE_FIELD: &str = "file";

/// Retrain from an uploaded CSV and swap the live model
pub async fn train(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<TrainResponse>> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(AppError::BadRequest("Please upload a CSV file.".to_string()));
        }

        upload = Some((file_name, field.bytes().await?));
        break;
    }

    let (file_name, bytes) = upload
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{FILE_FIELD}' field")))?;

    tracing::info!(file = %file_name, bytes = bytes.len(), "Training upload received");

    let service = state.service.clone();
    let response = tokio::task::spawn_blocking(move || api::train_csv(&service, &bytes)).await??;

    tracing::info!(
        rows_previewed = response.sample_data.len(),
        r2 = ?response.metrics.map(|m| m.r2),
        "Model retrained"
    );

    Ok(Json(response))
}
