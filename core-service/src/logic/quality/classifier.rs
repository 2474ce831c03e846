//! Quality Classifier
//!
//! Only the banding logic. Input: predicted strength. Output: QualityAssessment.

use super::types::{GapResolution, QualityAssessment, QualityBand};

// ============================================================================
// THRESHOLDS (MPa-scale predicted strength)
// ============================================================================

/// Below this = Low
pub const STANDARD_MIN: f64 = 3.0;

/// Below this = Standard
pub const GOOD_MIN: f64 = 3.5;

/// Lower edge of the legacy explicit High band
pub const LEGACY_HIGH_MIN: f64 = 4.0;

/// At or above this = Very High
pub const EXCELLENT_MIN: f64 = 4.5;

// ============================================================================
// CLASSIFY
// ============================================================================

/// Band a prediction using the default gap resolution
pub fn classify(strength: f64) -> QualityAssessment {
    classify_with(strength, GapResolution::default())
}

/// Total over f64: NaN is treated as Low.
pub fn classify_with(strength: f64, gap: GapResolution) -> QualityAssessment {
    band_for(strength, gap).into()
}

pub fn band_for(strength: f64, gap: GapResolution) -> QualityBand {
    if strength.is_nan() || strength < STANDARD_MIN {
        return QualityBand::Low;
    }
    if strength < GOOD_MIN {
        return QualityBand::Standard;
    }

    let high_min = match gap {
        GapResolution::BridgeToHigh => GOOD_MIN,
        GapResolution::LegacyFallthrough => LEGACY_HIGH_MIN,
    };

    if strength >= high_min && strength < EXCELLENT_MIN {
        QualityBand::High
    } else {
        QualityBand::VeryHigh
    }
}

// ============================================================================
// TESTS
// ============================================================================
