//! Signal Normalizer
//!
//! Maps raw rainfall/river signals into bounded dimensionless factors and
//! fuses them into a single severity score. Total over all inputs: NaN and
//! negative values are sanitized here so nothing downstream has to care.

use super::rules::{
    ACCUMULATION_REFERENCE_MM, ACCUMULATION_WEIGHT, FACTOR_CEILING, INTENSITY_REFERENCE_MM_H,
    INTENSITY_WEIGHT, RIVER_REFERENCE_M3_S, RIVER_WEIGHT,
};
use super::types::{SignalScores, SignalSet};

/// Normalize one raw signal against its reference value into [0, 2].
fn factor(raw: f64, reference: f64) -> f64 {
    let raw = if raw.is_nan() { 0.0 } else { raw };
    (raw / reference).clamp(0.0, FACTOR_CEILING)
}

/// Normalize the raw signal set into dimensionless factors.
pub fn normalize(signals: &SignalSet) -> SignalScores {
    SignalScores {
        intensity: factor(signals.intensity_1h, INTENSITY_REFERENCE_MM_H),
        accumulation: factor(signals.accumulation_24h, ACCUMULATION_REFERENCE_MM),
        river: factor(signals.river_discharge, RIVER_REFERENCE_M3_S),
    }
}

/// Weighted fusion of normalized factors into a severity score.
pub fn fuse(scores: &SignalScores) -> f64 {
    INTENSITY_WEIGHT * scores.intensity
        + ACCUMULATION_WEIGHT * scores.accumulation
        + RIVER_WEIGHT * scores.river
}

/// Convenience: raw signals straight to pre-memory severity.
pub fn compute_severity(signals: &SignalSet) -> f64 {
    fuse(&normalize(signals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values_map_to_one() {
        let signals = SignalSet {
            intensity_1h: 20.0,
            accumulation_24h: 80.0,
            river_discharge: 800.0,
            ..Default::default()
        };
        let scores = normalize(&signals);
        assert!((scores.intensity - 1.0).abs() < 1e-12);
        assert!((scores.accumulation - 1.0).abs() < 1e-12);
        assert!((scores.river - 1.0).abs() < 1e-12);
        assert!((fuse(&scores) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_factors_clamp_at_two() {
        let signals = SignalSet {
            intensity_1h: 500.0,
            accumulation_24h: 10_000.0,
            river_discharge: f64::INFINITY,
            ..Default::default()
        };
        let scores = normalize(&signals);
        assert_eq!(scores.intensity, 2.0);
        assert_eq!(scores.accumulation, 2.0);
        assert_eq!(scores.river, 2.0);
        // Max possible severity is 2.0 with weights summing to 1.0
        assert!((compute_severity(&signals) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_and_nan_inputs_sanitize_to_zero() {
        let signals = SignalSet {
            intensity_1h: -14.0,
            accumulation_24h: f64::NAN,
            river_discharge: 0.0,
            ..Default::default()
        };
        let scores = normalize(&signals);
        assert_eq!(scores.intensity, 0.0);
        assert_eq!(scores.accumulation, 0.0);
        assert_eq!(compute_severity(&signals), 0.0);
    }

    #[test]
    fn test_spec_worked_example() {
        // 28 mm/h, 90 mm, 500 m³/s => 0.4*1.4 + 0.3*1.125 + 0.3*0.625 = 1.085
        let signals = SignalSet {
            intensity_1h: 28.0,
            accumulation_24h: 90.0,
            river_discharge: 500.0,
            ..Default::default()
        };
        assert!((compute_severity(&signals) - 1.085).abs() < 1e-9);
    }
}
