//! Risk Classifier (Fusion)
//!
//! Maps a final severity into a risk level, a footprint radius and a
//! confidence score. Pure and deterministic - every output is derived from
//! the same severity value within one call.

use super::rules::{
    BASE_RADIUS_KM, CONFIDENCE_SATURATION_SEVERITY, HIGH_THRESHOLD, MODERATE_THRESHOLD,
    RADIUS_SEVERITY_CEILING, RADIUS_SEVERITY_FLOOR,
};
use super::types::{Classification, RiskLevel};

/// Severity -> risk level. Boundary values belong to the higher tier:
/// exactly 0.7 is MODERATE, exactly 1.3 is HIGH.
pub fn classify_level(severity: f64) -> RiskLevel {
    if severity < MODERATE_THRESHOLD {
        RiskLevel::Low
    } else if severity < HIGH_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

/// Full classification: level, radius and confidence from one severity.
pub fn classify(severity: f64) -> Classification {
    Classification {
        risk_level: classify_level(severity),
        radius_km: BASE_RADIUS_KM
            * severity.clamp(RADIUS_SEVERITY_FLOOR, RADIUS_SEVERITY_CEILING),
        confidence: (severity / CONFIDENCE_SATURATION_SEVERITY).clamp(0.0, 1.0),
    }
}
