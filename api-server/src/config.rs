//! Configuration module

use std::env;
use std::path::PathBuf;

use silo_quality_core::constants;
use silo_quality_core::logic::artifact::get_default_artifact_path;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Where the trained model bundle lives
    pub artifact_path: PathBuf,

    /// Largest accepted training upload (bytes)
    pub max_upload_bytes: usize,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: constants::get_port(),

            artifact_path: constants::get_artifact_path()
                .unwrap_or_else(get_default_artifact_path),

            max_upload_bytes: constants::get_max_upload_bytes(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
