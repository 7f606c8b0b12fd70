//! Predictor
//!
//! Projects a short-term risk escalation from forecast rainfall. Gated on
//! classifier confidence: below the threshold no prediction is issued at
//! all. Window selection is longest-first so a wet 24h outlook wins over a
//! merely damp 6h one.

use chrono::{DateTime, Duration, Utc};

use super::rules::{
    DRAIN_DECAY_RATE, FORECAST_RAIN_12H_MIN, FORECAST_RAIN_24H_MIN, FORECAST_RAIN_6H_MIN,
    MIN_DRAIN_DECAY, PREDICTION_CONFIDENCE_MIN, SPREAD_PER_MM_INTENSITY, SPREAD_PER_MM_RAIN,
};
use super::types::{Classification, Prediction, PredictionWindow, SignalSet};

/// Compute the escalation forecast, or `None` when confidence is too low or
/// no forecast window crosses its rain threshold.
pub fn predict(
    current: &Classification,
    signals: &SignalSet,
    now: DateTime<Utc>,
) -> Option<Prediction> {
    if current.confidence < PREDICTION_CONFIDENCE_MIN {
        return None;
    }

    let (forecast_rain, window) = if signals.forecast_rain_24h >= FORECAST_RAIN_24H_MIN {
        (signals.forecast_rain_24h, PredictionWindow::Hours24)
    } else if signals.forecast_rain_12h >= FORECAST_RAIN_12H_MIN {
        (signals.forecast_rain_12h, PredictionWindow::Hours12)
    } else if signals.forecast_rain_6h >= FORECAST_RAIN_6H_MIN {
        (signals.forecast_rain_6h, PredictionWindow::Hours6)
    } else {
        return None;
    };

    let decay = (1.0 - DRAIN_DECAY_RATE).max(MIN_DRAIN_DECAY);
    let spread_km = forecast_rain * SPREAD_PER_MM_RAIN * decay
        + signals.forecast_max_intensity_1h * SPREAD_PER_MM_INTENSITY * decay;

    Some(Prediction {
        predicted_risk: current.risk_level.escalate(),
        // Never predict shrinkage
        predicted_radius_km: current.radius_km.max(current.radius_km + spread_km),
        window,
        expires_at: now + Duration::hours(window.hours()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::RiskLevel;

    fn current(risk_level: RiskLevel, radius_km: f64, confidence: f64) -> Classification {
        Classification {
            risk_level,
            radius_km,
            confidence,
        }
    }

    #[test]
    fn test_low_confidence_gates_everything() {
        let signals = SignalSet {
            forecast_rain_24h: 500.0,
            forecast_max_intensity_1h: 80.0,
            ..Default::default()
        };
        let c = current(RiskLevel::High, 6.0, 0.54);
        assert!(predict(&c, &signals, Utc::now()).is_none());
    }

    #[test]
    fn test_no_window_crossed_returns_none() {
        let signals = SignalSet {
            forecast_rain_6h: 24.9,
            forecast_rain_12h: 39.9,
            forecast_rain_24h: 59.9,
            ..Default::default()
        };
        let c = current(RiskLevel::Moderate, 4.0, 0.9);
        assert!(predict(&c, &signals, Utc::now()).is_none());
    }

    #[test]
    fn test_longest_window_wins() {
        let signals = SignalSet {
            forecast_rain_6h: 30.0,
            forecast_rain_12h: 60.0,
            forecast_rain_24h: 90.0,
            ..Default::default()
        };
        let c = current(RiskLevel::Moderate, 4.0, 0.8);
        let p = predict(&c, &signals, Utc::now()).unwrap();
        assert_eq!(p.window, PredictionWindow::Hours24);
    }

    #[test]
    fn test_spread_math() {
        // Reference vector: radius 4, MODERATE, conf 0.8, 24h rain 90mm,
        // max intensity 22mm/h. spread = 90*0.015*0.75 + 22*0.04*0.75
        let signals = SignalSet {
            forecast_rain_6h: 30.0,
            forecast_rain_12h: 60.0,
            forecast_rain_24h: 90.0,
            forecast_max_intensity_1h: 22.0,
            ..Default::default()
        };
        let now = Utc::now();
        let c = current(RiskLevel::Moderate, 4.0, 0.8);
        let p = predict(&c, &signals, now).unwrap();
        assert!((p.predicted_radius_km - (4.0 + 1.0125 + 0.66)).abs() < 1e-9);
        assert_eq!(p.predicted_risk, RiskLevel::High);
        assert_eq!(p.expires_at, now + Duration::hours(24));
    }

    #[test]
    fn test_shorter_windows_selected_in_order() {
        let c = current(RiskLevel::Low, 3.0, 0.7);
        let twelve = SignalSet {
            forecast_rain_12h: 45.0,
            ..Default::default()
        };
        assert_eq!(
            predict(&c, &twelve, Utc::now()).unwrap().window,
            PredictionWindow::Hours12
        );
        let six = SignalSet {
            forecast_rain_6h: 25.0,
            ..Default::default()
        };
        assert_eq!(
            predict(&c, &six, Utc::now()).unwrap().window,
            PredictionWindow::Hours6
        );
    }

    #[test]
    fn test_high_stays_high_but_radius_grows() {
        let signals = SignalSet {
            forecast_rain_24h: 70.0,
            forecast_max_intensity_1h: 10.0,
            ..Default::default()
        };
        let c = current(RiskLevel::High, 6.6, 1.0);
        let p = predict(&c, &signals, Utc::now()).unwrap();
        assert_eq!(p.predicted_risk, RiskLevel::High);
        assert!(p.predicted_radius_km > 6.6);
    }

    #[test]
    fn test_radius_never_shrinks() {
        let signals = SignalSet {
            forecast_rain_6h: 25.0,
            ..Default::default()
        };
        let c = current(RiskLevel::Low, 3.0, 0.6);
        let p = predict(&c, &signals, Utc::now()).unwrap();
        assert!(p.predicted_radius_km >= c.radius_km);
    }
}
