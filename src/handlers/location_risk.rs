//! Location risk handler
//!
//! Answers "is this point inside any known flood footprint right now?"
//! against the persisted states - no live provider calls. A point can be
//! inside the current radius or inside an unexpired predicted radius; the
//! worst effective risk across matching districts wins. When the point is
//! inside no footprint, the nearest district's state is returned as context.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::geometry::haversine_km;
use crate::engine::RiskLevel;
use crate::error::AppResult;
use crate::models::RiskStateRecord;
use crate::AppState;

use super::validate_coordinates;

/// Only districts within this many km are considered at all.
const DEFAULT_SCAN_RADIUS_KM: f64 = 25.0;

#[derive(Debug, Deserialize)]
pub struct CheckLocationRequest {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_scan_radius")]
    pub radius_km: f64,
}

fn default_scan_radius() -> f64 {
    DEFAULT_SCAN_RADIUS_KM
}

#[derive(Debug, Serialize)]
pub struct CheckLocationResponse {
    pub is_in_danger: bool,
    pub status: String,
    pub nearest_district: Option<String>,
    pub current_risk: Option<RiskLevel>,
    pub predicted_risk: Option<RiskLevel>,
    pub prediction_window_hours: Option<i32>,
    pub confidence: f64,
    pub current_radius_km: Option<f64>,
}

pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckLocationRequest>,
) -> AppResult<Json<CheckLocationResponse>> {
    validate_coordinates(request.lat, request.lng)?;

    let records = RiskStateRecord::list(&state.pool).await?;
    let now = Utc::now();

    let mut best: Option<(&RiskStateRecord, RiskLevel)> = None;
    let mut nearest: Option<(&RiskStateRecord, f64)> = None;

    for record in &records {
        let distance_km =
            haversine_km(request.lat, request.lng, record.center_lat, record.center_lng);

        if nearest.map_or(true, |(_, d)| distance_km < d) {
            nearest = Some((record, distance_km));
        }

        if distance_km > request.radius_km {
            continue;
        }

        let Some(effective) = effective_risk(record, distance_km, now) else {
            continue;
        };

        if best.map_or(true, |(_, level)| effective.rank() > level.rank()) {
            best = Some((record, effective));
        }
    }

    if let Some((record, effective)) = best {
        return Ok(Json(CheckLocationResponse {
            is_in_danger: effective == RiskLevel::High,
            status: effective.to_string(),
            nearest_district: Some(record.district_id.clone()),
            current_risk: Some(record.level()),
            predicted_risk: record.predicted_level(),
            prediction_window_hours: record.prediction_window_hours,
            confidence: record.confidence,
            current_radius_km: Some(record.radius_km),
        }));
    }

    // Outside every footprint: SAFE, with the nearest district as context
    let response = match nearest {
        Some((record, _)) => CheckLocationResponse {
            is_in_danger: false,
            status: "SAFE".to_string(),
            nearest_district: Some(record.district_id.clone()),
            current_risk: Some(record.level()),
            predicted_risk: record.predicted_level(),
            prediction_window_hours: record.prediction_window_hours,
            confidence: record.confidence,
            current_radius_km: Some(record.radius_km),
        },
        None => CheckLocationResponse {
            is_in_danger: false,
            status: "SAFE".to_string(),
            nearest_district: None,
            current_risk: None,
            predicted_risk: None,
            prediction_window_hours: None,
            confidence: 0.0,
            current_radius_km: None,
        },
    };

    Ok(Json(response))
}

/// Risk that applies to a point `distance_km` from the district center, or
/// `None` when the point is inside neither the current nor an unexpired
/// predicted footprint. Inside the predicted footprint the predicted level
/// applies; otherwise the current one.
pub(crate) fn effective_risk(
    record: &RiskStateRecord,
    distance_km: f64,
    now: DateTime<Utc>,
) -> Option<RiskLevel> {
    let inside_current = distance_km <= record.radius_km;

    let inside_predicted = match (record.predicted_radius_km, record.prediction_expires_at) {
        (Some(predicted_radius), Some(expires_at)) => {
            expires_at > now && distance_km <= predicted_radius
        }
        _ => false,
    };

    if !inside_current && !inside_predicted {
        return None;
    }

    if inside_predicted {
        if let Some(predicted) = record.predicted_level() {
            return Some(predicted);
        }
    }

    Some(record.level())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(radius_km: f64, risk: &str) -> RiskStateRecord {
        RiskStateRecord {
            district_id: "chennai".to_string(),
            center_lat: 13.0827,
            center_lng: 80.2707,
            severity: 1.0,
            risk_level: risk.to_string(),
            radius_km,
            confidence: 0.7,
            predicted_risk: None,
            predicted_radius_km: None,
            prediction_window_hours: None,
            prediction_expires_at: None,
            last_flooded_at: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_outside_both_footprints() {
        let r = record(3.0, "MODERATE");
        assert_eq!(effective_risk(&r, 10.0, Utc::now()), None);
    }

    #[test]
    fn test_inside_current_uses_current_risk() {
        let r = record(3.0, "MODERATE");
        assert_eq!(effective_risk(&r, 2.0, Utc::now()), Some(RiskLevel::Moderate));
    }

    #[test]
    fn test_inside_prediction_uses_predicted_risk() {
        let now = Utc::now();
        let mut r = record(3.0, "MODERATE");
        r.predicted_risk = Some("HIGH".to_string());
        r.predicted_radius_km = Some(5.0);
        r.prediction_expires_at = Some(now + Duration::hours(6));
        // Between the current and predicted radii
        assert_eq!(effective_risk(&r, 4.0, now), Some(RiskLevel::High));
    }

    #[test]
    fn test_expired_prediction_is_ignored() {
        let now = Utc::now();
        let mut r = record(3.0, "MODERATE");
        r.predicted_risk = Some("HIGH".to_string());
        r.predicted_radius_km = Some(5.0);
        r.prediction_expires_at = Some(now - Duration::minutes(1));
        assert_eq!(effective_risk(&r, 4.0, now), None);
        // Still inside the current radius though
        assert_eq!(effective_risk(&r, 2.5, now), Some(RiskLevel::Moderate));
    }
}
