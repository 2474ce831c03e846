//! Quality Types
//!
//! Bands for predicted 28-day strength. No logic, only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// QUALITY BAND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    /// Substandard, batch needs attention
    Low,
    Standard,
    High,
    VeryHigh,
}

impl QualityBand {
    pub const ALL: [QualityBand; 4] = [
        QualityBand::Low,
        QualityBand::Standard,
        QualityBand::High,
        QualityBand::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityBand::Low => "low",
            QualityBand::Standard => "standard",
            QualityBand::High => "high",
            QualityBand::VeryHigh => "very_high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityBand::Low => "Low / Substandard",
            QualityBand::Standard => "Standard / Acceptable",
            QualityBand::High => "High / Good Quality",
            QualityBand::VeryHigh => "Very High / Excellent Quality",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            QualityBand::Low => "red",
            QualityBand::Standard => "orange",
            QualityBand::High => "green",
            QualityBand::VeryHigh => "darkgreen",
        }
    }
}

impl std::fmt::Display for QualityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// GAP RESOLUTION
// ============================================================================

/// How predictions in `[3.5, 4.0)` are banded.
///
/// The legacy rule set has explicit conditions for `< 3.0`, `[3.0, 3.5)` and
/// `[4.0, 4.5)`; everything else, including `[3.5, 4.0)`, fell through to the
/// "Very High" catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapResolution {
    /// `[3.5, 4.5)` is one High / Good band
    #[default]
    BridgeToHigh,
    /// Reproduce the legacy fall-through: `[3.5, 4.0)` → Very High
    LegacyFallthrough,
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Classifier output attached to every prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityAssessment {
    pub band: QualityBand,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<QualityBand> for QualityAssessment {
    fn from(band: QualityBand) -> Self {
        Self {
            band,
            label: band.label(),
            color: band.color(),
        }
    }
}
