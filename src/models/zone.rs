//! Structural zone loading
//!
//! Reads the static vulnerability table into the engine's in-memory form.
//! The table changes rarely (post-event reviews), so it is loaded once at
//! startup and shared read-only.

use sqlx::{PgPool, Row};

use crate::engine::StructuralZone;

/// Load the whole structural zone table.
pub async fn load_all(pool: &PgPool) -> Result<Vec<StructuralZone>, sqlx::Error> {
    let rows = sqlx::query("SELECT district_id, risk_multiplier, reason FROM structural_zones")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| StructuralZone {
            district_id: row.get("district_id"),
            risk_multiplier: row.get("risk_multiplier"),
            reason: row.get("reason"),
        })
        .collect())
}
