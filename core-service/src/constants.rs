//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the core and the API server.

use std::path::PathBuf;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Silo Quality Predictor";

/// Directory under the platform data dir holding the artifact
pub const APP_DIR_NAME: &str = "silo-quality";

/// Artifact file name inside `APP_DIR_NAME`
pub const DEFAULT_ARTIFACT_FILE: &str = "quality_model.json";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Default upload limit for training CSVs (bytes)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Artifact path from `ARTIFACT_PATH`, or None to use the platform default
pub fn get_artifact_path() -> Option<PathBuf> {
    std::env::var("ARTIFACT_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Get HTTP port from environment or use default
pub fn get_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get upload limit from environment or use default
pub fn get_max_upload_bytes() -> usize {
    std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
}
