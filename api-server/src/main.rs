//! Silo Quality API Server
//!
//! HTTP front end for the prediction core.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    SILO QUALITY API                       │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────────────┐ │
//! │  │  Router   │──▶│  PredictionService (spawn_blocking)  │ │
//! │  │  (Axum)   │   │  forest + Tree SHAP + suggestions    │ │
//! │  └───────────┘   └──────────────────┬───────────────────┘ │
//! │                                     ▼                     │
//! │                          ┌────────────────────┐           │
//! │                          │  artifact (.json)  │           │
//! │                          └────────────────────┘           │
//! └───────────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use silo_quality_core::constants::{APP_NAME, APP_VERSION};
use silo_quality_core::logic::artifact::ArtifactStore;
use silo_quality_core::{PredictionService, ServiceConfig};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "silo_quality_api=debug,silo_quality_core=info,tower_http=debug".into());
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("{} v{} starting ({})", APP_NAME, APP_VERSION, config.environment);
    tracing::info!("Artifact: {}", config.artifact_path.display());

    // Load the last trained model, if any
    let store = ArtifactStore::new(config.artifact_path.clone());
    let service = tokio::task::spawn_blocking(move || PredictionService::open(store, ServiceConfig::default())).await?;
    tracing::info!("Model status: {}", service.health().as_str());

    // Build application state
    let state = AppState {
        service: Arc::new(service),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/status", get(handlers::health::status))
        .route("/config", get(handlers::config::get))
        .route("/predict", post(handlers::predict::predict))
        .route(
            "/train",
            post(handlers::train::train).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
