//! Scheduled flood update job
//!
//! Drives the engine on an interval: for every active district, fetch fresh
//! weather/river signals, run the assessment against the persisted prior
//! state, and store the superseding state plus its display footprint.
//!
//! Districts are independent - a failure for one is logged and skipped, and
//! the engine itself never blocks, so per-district work could be fanned out
//! further if the district list grows.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::engine::{self, geometry, LocationRef, RiskLevel};
use crate::error::AppResult;
use crate::models::{District, FloodGeometry, RiskStateRecord};
use crate::AppState;

/// Vertices in the stored display polygon.
const FOOTPRINT_POINTS: usize = 64;

/// Spawn the periodic update task. The first cycle runs immediately.
pub fn spawn(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(state.config.update_interval_secs));

        loop {
            ticker.tick().await;
            if let Err(err) = run_update_cycle(&state).await {
                tracing::error!("flood update cycle failed: {err}");
            }
        }
    })
}

/// One full pass over all active districts.
pub async fn run_update_cycle(state: &AppState) -> AppResult<()> {
    let districts = District::list_active(&state.pool).await?;
    tracing::debug!("flood update cycle: {} districts", districts.len());

    for district in &districts {
        if let Err(err) = update_district(state, district).await {
            tracing::warn!(district = %district.id, "district update failed: {err}");
        }
    }

    Ok(())
}

/// Fetch, assess and persist one district.
async fn update_district(state: &AppState, district: &District) -> AppResult<()> {
    let (weather, discharge) = tokio::try_join!(
        state
            .weather
            .fetch_rainfall(district.center_lat, district.center_lng),
        state
            .river
            .fetch_discharge(district.center_lat, district.center_lng),
    )?;

    let signals = weather.signal_set(discharge);
    let previous = RiskStateRecord::find(&state.pool, &district.id).await?;
    let prior = previous.as_ref().map(|record| record.prior_state());

    let now = Utc::now();
    let location = LocationRef::Monitored(district.id.clone());
    let assessment = engine::assess(&signals, prior.as_ref(), &location, &state.zones, now);

    let last_flooded_at = next_flood_marker(
        assessment.risk_level,
        previous.as_ref().and_then(|record| record.last_flooded_at),
        now,
    );

    let record = RiskStateRecord {
        district_id: district.id.clone(),
        center_lat: district.center_lat,
        center_lng: district.center_lng,
        severity: assessment.severity,
        risk_level: assessment.risk_level.to_string(),
        radius_km: assessment.radius_km,
        confidence: assessment.confidence,
        predicted_risk: assessment
            .prediction
            .map(|p| p.predicted_risk.to_string()),
        predicted_radius_km: assessment.prediction.map(|p| p.predicted_radius_km),
        prediction_window_hours: assessment.prediction.map(|p| p.window.hours() as i32),
        prediction_expires_at: assessment.prediction.map(|p| p.expires_at),
        last_flooded_at,
        updated_at: now,
    };
    record.upsert(&state.pool).await?;

    let polygon = geometry::flood_polygon(
        district.center_lat,
        district.center_lng,
        assessment.radius_km,
        FOOTPRINT_POINTS,
    );
    let bbox = geometry::bounding_box(district.center_lat, district.center_lng, assessment.radius_km);
    FloodGeometry::write(
        &state.pool,
        &district.id,
        &polygon,
        &bbox,
        assessment.risk_level,
        assessment.confidence,
        now,
    )
    .await?;

    tracing::info!(
        district = %district.id,
        severity = assessment.severity,
        risk = %assessment.risk_level,
        radius_km = assessment.radius_km,
        predicted = assessment.prediction.is_some(),
        "risk state updated"
    );

    Ok(())
}

/// HIGH observations stamp the flood marker at `now`; otherwise the previous
/// marker is carried forward unchanged. The engine only reads this field.
pub(crate) fn next_flood_marker(
    level: RiskLevel,
    previous: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if level == RiskLevel::High {
        Some(now)
    } else {
        previous
    }
}
