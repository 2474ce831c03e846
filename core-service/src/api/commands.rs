//! Service Commands - request/response shapes for clients
//!
//! Thin adapters over `PredictionService`. The HTTP server calls these and
//! serializes the results; nothing here touches the transport.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logic::dataset::PreviewRow;
use crate::logic::explain::ShapContribution;
use crate::logic::features::{slider_config, ProcessInputs, SliderSetting, FEATURE_LAYOUT, TARGET_NAME, TARGET_UNITS};
use crate::logic::model::Metrics;
use crate::logic::recommend::{round4, top_features};
use crate::logic::service::PredictionService;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Inference request: the ten raw readings, optional lsf override and an
/// optional strength target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    #[serde(flatten)]
    pub inputs: ProcessInputs,
    #[serde(default)]
    pub target_strength: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_strength: f64,
    pub strength_units: String,
    pub quality_label: String,
    pub quality_severity: String,
    pub quality_color: String,
    pub delta_to_target: Option<f64>,
    pub shap_base_value: Option<f64>,
    /// Layout order
    pub shap_contributions: Vec<ShapContribution>,
    /// Ranked by |contribution|
    pub top_features: Vec<String>,
    /// "Increase kiln_temp", "Decrease blaine", ...
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainResponse {
    pub message: String,
    /// Hold-out metrics of the new model
    pub metrics: Option<Metrics>,
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub sample_data: Vec<PreviewRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub features: Vec<String>,
    pub target: String,
    pub slider_config: BTreeMap<String, SliderSetting>,
    pub dataset_ready: bool,
    pub metrics: Option<Metrics>,
    pub sample_data: Option<Vec<PreviewRow>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

fn feature_names() -> Vec<String> {
    FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn health(service: &PredictionService) -> HealthResponse {
    HealthResponse {
        status: service.health().as_str().to_string(),
    }
}

pub fn get_config(service: &PredictionService) -> ConfigResponse {
    let state = service.snapshot();
    ConfigResponse {
        features: feature_names(),
        target: TARGET_NAME.to_string(),
        slider_config: slider_config(),
        dataset_ready: state.is_some(),
        metrics: state.as_ref().and_then(|s| s.metrics),
        sample_data: state.and_then(|s| s.sample_data.clone()),
    }
}

pub fn predict(service: &PredictionService, request: &SimulationInputs) -> Result<PredictionResponse> {
    let prediction = service.predict(&request.inputs, request.target_strength)?;

    let (shap_base_value, shap_contributions) = match prediction.explanation {
        Some(explanation) => (Some(explanation.base_value), explanation.contributions),
        None => (None, Vec::new()),
    };

    Ok(PredictionResponse {
        predicted_strength: round4(prediction.strength),
        strength_units: TARGET_UNITS.to_string(),
        quality_label: prediction.quality.label.to_string(),
        quality_severity: prediction.quality.band.as_str().to_string(),
        quality_color: prediction.quality.color.to_string(),
        delta_to_target: prediction.delta_to_target,
        shap_base_value,
        shap_contributions,
        top_features: top_features(&prediction.recommendations),
        suggestions: prediction.recommendations.iter().map(|r| r.to_string()).collect(),
    })
}

pub fn train_csv(service: &PredictionService, bytes: &[u8]) -> Result<TrainResponse> {
    let state = service.train_from_csv(bytes)?;

    Ok(TrainResponse {
        message: "Model trained successfully.".to_string(),
        metrics: state.metrics,
        feature_names: feature_names(),
        target_name: TARGET_NAME.to_string(),
        sample_data: state.sample_data.clone().unwrap_or_default(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::logic::artifact::ArtifactStore;
    use crate::logic::model::TrainingConfig;
    use crate::logic::service::ServiceConfig;
    use crate::test_support::{kiln_linear_dataset, nominal_inputs, to_csv};

    fn service(dir: &tempfile::TempDir) -> PredictionService {
        let config = ServiceConfig {
            training: TrainingConfig { n_estimators: 25, ..TrainingConfig::default() },
            ..ServiceConfig::default()
        };
        PredictionService::new(ArtifactStore::new(dir.path().join("model.json")), config)
    }

    fn request(kiln_temp: f64, target: Option<f64>) -> SimulationInputs {
        let mut inputs = nominal_inputs();
        inputs.kiln_temp = kiln_temp;
        SimulationInputs { inputs, target_strength: target }
    }

    #[test]
    fn test_health_and_config_before_training() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        assert_eq!(health(&service).status, "waiting_for_data");

        let config = get_config(&service);
        assert!(!config.dataset_ready);
        assert_eq!(config.features.len(), 11);
        assert_eq!(config.target, "strength_28d");
        assert!(config.slider_config.contains_key("kiln_temp"));
        assert!(!config.slider_config.contains_key("lsf"));
        assert!(config.metrics.is_none());
        assert!(config.sample_data.is_none());
    }

    #[test]
    fn test_predict_before_training_is_client_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = predict(&service(&dir), &request(1425.0, None)).unwrap_err();
        assert!(matches!(err, Error::ModelNotReady));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_train_then_predict() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let trained = train_csv(&service, to_csv(&kiln_linear_dataset(100, 8)).as_bytes()).unwrap();
        assert_eq!(trained.message, "Model trained successfully.");
        assert_eq!(trained.feature_names.len(), 11);
        assert_eq!(trained.target_name, "strength_28d");
        assert_eq!(trained.sample_data.len(), 6);
        let metrics = trained.metrics.unwrap();
        assert!(metrics.r2 > 0.8, "r2 = {}", metrics.r2);

        assert_eq!(health(&service).status, "ready");
        let config = get_config(&service);
        assert!(config.dataset_ready);
        assert_eq!(config.metrics, Some(metrics));

        let response = predict(&service, &request(1490.0, Some(4.5))).unwrap();
        assert_eq!(response.strength_units, "MPa");
        assert_eq!(response.predicted_strength, round4(response.predicted_strength));
        assert_eq!(response.shap_contributions.len(), 11);
        assert_eq!(response.shap_contributions[0].feature, "limestone_pct");
        assert_eq!(response.top_features.len(), 3);
        assert_eq!(response.top_features[0], "kiln_temp");
        assert_eq!(response.suggestions[0], "Decrease kiln_temp");
        assert!(response.shap_base_value.is_some());
        assert!(response.delta_to_target.is_some());
    }

    #[test]
    fn test_simulation_inputs_json() {
        let json = r#"{
            "limestone_pct": 80, "silica_pct": 5, "al2o3_pct": 2, "fe2o3_pct": 2,
            "kiln_temp": 1425, "fuel_rate": 4.5, "o2": 4.5, "cooling_rate": 3.2,
            "blaine": 320, "mill_power": 2200, "target_strength": 4.2
        }"#;
        let request: SimulationInputs = serde_json::from_str(json).unwrap();
        assert_eq!(request.inputs.lsf, None);
        assert_eq!(request.target_strength, Some(4.2));
        assert_eq!(request.inputs.kiln_temp, 1425.0);

        // Missing field is rejected
        assert!(serde_json::from_str::<SimulationInputs>(r#"{"limestone_pct": 80}"#).is_err());
    }
}
