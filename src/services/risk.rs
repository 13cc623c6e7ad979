// Risk Normalization
// Turns a one-sided classifier confidence into the two-sided AI/human
// probability split shown by the scanner and scored by the challenge game.

use crate::models::{NormalizedRisk, RiskLevel, ScanResult, Significance};

/// Probability level above which a side of the split is considered visually
/// meaningful. Below it the side is still part of the numeric pair; only the
/// probability bar omits it.
pub const SIGNIFICANCE_THRESHOLD: f64 = 15.0;

/// Derive the AI/human probability pair from a classifier result.
///
/// High and Medium risk mean the reported confidence sits on the AI side;
/// Low means it sits on the human side. The two sides always sum to 100.
pub fn normalize(result: &ScanResult) -> NormalizedRisk {
    let ai_probability = if result.risk_level.is_adverse() {
        result.confidence
    } else {
        100.0 - result.confidence
    };

    NormalizedRisk {
        ai_probability,
        human_probability: 100.0 - ai_probability,
    }
}

/// Presentation gate for one side of the split.
pub fn classify_significance(probability: f64) -> Significance {
    if probability > SIGNIFICANCE_THRESHOLD {
        Significance::Significant
    } else {
        Significance::Negligible
    }
}

/// Display style for a risk level.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RiskStyle {
    pub color_tag: &'static str,
    pub label: &'static str,
}

/// Total over the closed risk enum; there is no fallback arm because an
/// unrecognized level never deserializes in the first place.
pub fn risk_style(level: RiskLevel) -> RiskStyle {
    match level {
        RiskLevel::High => RiskStyle { color_tag: "red", label: "High" },
        RiskLevel::Medium => RiskStyle { color_tag: "yellow", label: "Medium" },
        RiskLevel::Low => RiskStyle { color_tag: "emerald", label: "Low" },
    }
}
