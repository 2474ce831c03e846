//! Quality Module
//!
//! Maps a predicted 28-day strength onto a discrete quality band.
//!
//! ## Structure
//! - `types`: QualityBand, GapResolution, QualityAssessment
//! - `classifier`: thresholds and banding logic

pub mod types;
pub mod classifier;

pub use types::{GapResolution, QualityAssessment, QualityBand};
pub use classifier::{band_for, classify, classify_with};
