//! Risk state model
//!
//! The persisted output of the fusion engine, one row per district. Rows are
//! read-and-replaced on every tick; the previous row is handed to the engine
//! as an immutable snapshot, never mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::engine::{PriorState, RiskLevel};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RiskStateRecord {
    pub district_id: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub severity: f64,
    pub risk_level: String,
    pub radius_km: f64,
    pub confidence: f64,
    pub predicted_risk: Option<String>,
    pub predicted_radius_km: Option<f64>,
    pub prediction_window_hours: Option<i32>,
    pub prediction_expires_at: Option<DateTime<Utc>>,
    pub last_flooded_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl RiskStateRecord {
    /// Parsed risk level (defaults to LOW on a corrupt row rather than
    /// taking the API down).
    pub fn level(&self) -> RiskLevel {
        RiskLevel::parse(&self.risk_level).unwrap_or(RiskLevel::Low)
    }

    pub fn predicted_level(&self) -> Option<RiskLevel> {
        self.predicted_risk.as_deref().and_then(RiskLevel::parse)
    }

    /// Snapshot consumed by the engine's temporal memory step.
    pub fn prior_state(&self) -> PriorState {
        PriorState {
            severity: self.severity,
            updated_at: Some(self.updated_at),
            last_flooded_at: self.last_flooded_at,
        }
    }

    pub async fn find(pool: &PgPool, district_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, RiskStateRecord>("SELECT * FROM risk_states WHERE district_id = $1")
            .bind(district_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, RiskStateRecord>("SELECT * FROM risk_states ORDER BY district_id")
            .fetch_all(pool)
            .await
    }

    /// Replace the district's row with this snapshot.
    pub async fn upsert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO risk_states (
                district_id, center_lat, center_lng, severity, risk_level,
                radius_km, confidence, predicted_risk, predicted_radius_km,
                prediction_window_hours, prediction_expires_at,
                last_flooded_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (district_id) DO UPDATE SET
                center_lat = EXCLUDED.center_lat,
                center_lng = EXCLUDED.center_lng,
                severity = EXCLUDED.severity,
                risk_level = EXCLUDED.risk_level,
                radius_km = EXCLUDED.radius_km,
                confidence = EXCLUDED.confidence,
                predicted_risk = EXCLUDED.predicted_risk,
                predicted_radius_km = EXCLUDED.predicted_radius_km,
                prediction_window_hours = EXCLUDED.prediction_window_hours,
                prediction_expires_at = EXCLUDED.prediction_expires_at,
                last_flooded_at = EXCLUDED.last_flooded_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&self.district_id)
        .bind(self.center_lat)
        .bind(self.center_lng)
        .bind(self.severity)
        .bind(&self.risk_level)
        .bind(self.radius_km)
        .bind(self.confidence)
        .bind(&self.predicted_risk)
        .bind(self.predicted_radius_km)
        .bind(self.prediction_window_hours)
        .bind(self.prediction_expires_at)
        .bind(self.last_flooded_at)
        .bind(self.updated_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Operator backfill of the flood marker.
    pub async fn mark_flooded(
        pool: &PgPool,
        district_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE risk_states SET last_flooded_at = $2 WHERE district_id = $1")
                .bind(district_id)
                .bind(at)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Decode a raw epoch timestamp that may be in seconds or milliseconds.
///
/// Producers disagree on the unit; anything at or above 1e11 can only be
/// milliseconds (1e11 seconds is past the year 5000). This is the single
/// place raw epoch numbers are interpreted - everything past this boundary
/// is `DateTime<Utc>`.
pub fn decode_epoch(raw: i64) -> DateTime<Utc> {
    if raw.abs() >= 100_000_000_000 {
        DateTime::from_timestamp_millis(raw).unwrap_or_else(Utc::now)
    } else {
        DateTime::from_timestamp(raw, 0).unwrap_or_else(Utc::now)
    }
}
