//! Logic Module - prediction, attribution and guidance engines
//!
//! ## Architecture
//! - `features/` - schema, input vector, derived lsf
//! - `quality/` - strength → quality band
//! - `dataset/` - CSV ingestion and training rows
//! - `model/` - random forest, trainer, background sample
//! - `explain/` - per-feature attribution (Tree SHAP)
//! - `recommend/` - ranking and operator suggestions
//! - `artifact/` - versioned on-disk bundle
//! - `service/` - owns the live model and runs both pipelines

pub mod features;
pub mod quality;
pub mod dataset;
pub mod model;
pub mod explain;
pub mod recommend;
pub mod artifact;
pub mod service;
