//! Risk state handlers
//!
//! Read access to the persisted per-district states and footprints, plus an
//! operator backfill for the flood marker.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::risk_state::decode_epoch;
use crate::models::{FloodGeometry, RiskStateRecord};
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<RiskStateRecord>>> {
    let records = RiskStateRecord::list(&state.pool).await?;
    Ok(Json(records))
}

pub async fn get(
    State(state): State<AppState>,
    Path(district_id): Path<String>,
) -> AppResult<Json<RiskStateRecord>> {
    RiskStateRecord::find(&state.pool, &district_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("risk state for '{district_id}'")))
}

pub async fn geometry(
    State(state): State<AppState>,
    Path(district_id): Path<String>,
) -> AppResult<Json<FloodGeometry>> {
    FloodGeometry::find(&state.pool, &district_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("flood geometry for '{district_id}'")))
}

#[derive(Debug, Deserialize)]
pub struct MarkFloodedRequest {
    /// Raw epoch timestamp, seconds or milliseconds - decoded at this
    /// boundary, never deeper in the system.
    pub at: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkFloodedResponse {
    pub district_id: String,
    pub last_flooded_at: chrono::DateTime<chrono::Utc>,
}

/// Backfill `last_flooded_at` for a district (e.g. a flood confirmed by
/// field reports after the fact). Feeds the 72h hysteresis floor.
pub async fn mark_flooded(
    State(state): State<AppState>,
    Path(district_id): Path<String>,
    Json(request): Json<MarkFloodedRequest>,
) -> AppResult<Json<MarkFloodedResponse>> {
    let at = decode_epoch(request.at);

    let updated = RiskStateRecord::mark_flooded(&state.pool, &district_id, at).await?;
    if !updated {
        return Err(AppError::NotFound(format!("risk state for '{district_id}'")));
    }

    tracing::info!(district = %district_id, at = %at, "flood marker backfilled");

    Ok(Json(MarkFloodedResponse {
        district_id,
        last_flooded_at: at,
    }))
}
