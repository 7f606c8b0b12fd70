//! Flood geometry model
//!
//! Stores the display footprint (polygon + coarse bounding box) the
//! scheduler derives from each district's radius. Kept separate from
//! `risk_states` so the frequently polled state rows stay small.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::engine::geometry::{BoundingBox, GeoPoint};
use crate::engine::RiskLevel;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FloodGeometry {
    pub district_id: String,
    pub polygon: serde_json::Value,
    pub bbox: serde_json::Value,
    pub risk_level: String,
    pub confidence: f64,
    pub updated_at: DateTime<Utc>,
}

impl FloodGeometry {
    pub async fn find(pool: &PgPool, district_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, FloodGeometry>(
            "SELECT * FROM flood_geometry WHERE district_id = $1",
        )
        .bind(district_id)
        .fetch_optional(pool)
        .await
    }

    /// Replace the district's footprint.
    pub async fn write(
        pool: &PgPool,
        district_id: &str,
        polygon: &[GeoPoint],
        bbox: &BoundingBox,
        risk_level: RiskLevel,
        confidence: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let polygon_json =
            serde_json::to_value(polygon).unwrap_or_else(|_| serde_json::Value::Array(vec![]));
        let bbox_json =
            serde_json::to_value(bbox).unwrap_or_else(|_| serde_json::Value::Null);

        sqlx::query(
            r#"
            INSERT INTO flood_geometry (district_id, polygon, bbox, risk_level, confidence, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (district_id) DO UPDATE SET
                polygon = EXCLUDED.polygon,
                bbox = EXCLUDED.bbox,
                risk_level = EXCLUDED.risk_level,
                confidence = EXCLUDED.confidence,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(district_id)
        .bind(polygon_json)
        .bind(bbox_json)
        .bind(risk_level.as_str())
        .bind(confidence)
        .bind(updated_at)
        .execute(pool)
        .await?;

        Ok(())
    }
}
