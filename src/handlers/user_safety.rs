//! User safety handler
//!
//! Live on-demand assessment at an arbitrary searched coordinate. This path
//! fetches fresh provider data and runs the engine with an ad-hoc location:
//! no prior state, no structural bias - searched points have no history.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::{self, LocationRef, Prediction, RiskLevel};
use crate::error::AppResult;
use crate::models::district;
use crate::models::District;
use crate::AppState;

use super::validate_coordinates;

#[derive(Debug, Deserialize)]
pub struct SafetyCheckRequest {
    pub lat: f64,
    pub lng: f64,
}

/// User-facing safety verdict derived from the risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyStatus {
    Safe,
    Moderate,
    Danger,
}

impl SafetyStatus {
    pub fn from_risk(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => SafetyStatus::Safe,
            RiskLevel::Moderate => SafetyStatus::Moderate,
            RiskLevel::High => SafetyStatus::Danger,
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "You are safe at your current location.",
            SafetyStatus::Moderate => "Moderate flood risk detected nearby. Stay alert.",
            SafetyStatus::Danger => {
                "High flood risk detected at your location. Move to higher ground."
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SafetyCheckResponse {
    pub status: SafetyStatus,
    pub message: &'static str,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub radius_km: f64,
    pub nearest_district: Option<String>,
    pub prediction: Option<Prediction>,
}

pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<SafetyCheckRequest>,
) -> AppResult<Json<SafetyCheckResponse>> {
    validate_coordinates(request.lat, request.lng)?;

    let (weather, discharge) = tokio::try_join!(
        state.weather.fetch_rainfall(request.lat, request.lng),
        state.river.fetch_discharge(request.lat, request.lng),
    )?;

    let signals = weather.signal_set(discharge);
    let assessment = engine::assess(&signals, None, &LocationRef::AdHoc, &state.zones, Utc::now());

    let districts = District::list_active(&state.pool).await?;
    let nearest_district =
        district::nearest(&districts, request.lat, request.lng).map(|d| d.name.clone());

    let status = SafetyStatus::from_risk(assessment.risk_level);

    tracing::info!(
        lat = request.lat,
        lng = request.lng,
        risk = %assessment.risk_level,
        "safety check served"
    );

    Ok(Json(SafetyCheckResponse {
        status,
        message: status.advisory(),
        risk_level: assessment.risk_level,
        confidence: assessment.confidence,
        radius_km: assessment.radius_km,
        nearest_district,
        prediction: assessment.prediction,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SafetyStatus::from_risk(RiskLevel::Low), SafetyStatus::Safe);
        assert_eq!(
            SafetyStatus::from_risk(RiskLevel::Moderate),
            SafetyStatus::Moderate
        );
        assert_eq!(SafetyStatus::from_risk(RiskLevel::High), SafetyStatus::Danger);
    }

    #[test]
    fn test_danger_advisory_mentions_higher_ground() {
        assert!(SafetyStatus::Danger.advisory().contains("higher ground"));
    }
}
