//! Silo Quality Core
//!
//! Predicts 28-day cement strength from raw-meal, kiln and grinding readings,
//! explains each prediction per feature and turns the explanation into
//! operator guidance. The model is trained from uploaded CSV data and kept
//! as a single versioned artifact on disk.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, Result};
pub use logic::service::{PredictionService, ServiceConfig};
