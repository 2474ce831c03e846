//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad upload or request body
    #[error("{0}")]
    BadRequest(String),

    /// Error raised by the prediction core
    #[error(transparent)]
    Core(#[from] silo_quality_core::Error),

    /// Blocking task panicked or was cancelled
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Core(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Core(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            match &self {
                AppError::Core(_) => "Model storage error".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("worker task failed: {err}"))
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid multipart upload: {}", err.body_text()))
    }
}
