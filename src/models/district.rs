//! District model
//!
//! Monitored sampling centers. Early revisions of the system hardcoded a
//! single center; districts are now explicit rows so every computation is
//! anchored per call.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::engine::geometry::haversine_km;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct District {
    pub id: String,
    pub name: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub is_active: bool,
}

impl District {
    /// All districts the scheduler should update.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, District>(
            "SELECT * FROM districts WHERE is_active = true ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

}

/// Nearest district center to a query point, by great-circle distance.
pub fn nearest<'a>(districts: &'a [District], lat: f64, lng: f64) -> Option<&'a District> {
    districts.iter().min_by(|a, b| {
        let da = haversine_km(lat, lng, a.center_lat, a.center_lng);
        let db = haversine_km(lat, lng, b.center_lat, b.center_lng);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(id: &str, lat: f64, lng: f64) -> District {
        District {
            id: id.to_string(),
            name: id.to_string(),
            center_lat: lat,
            center_lng: lng,
            is_active: true,
        }
    }

    #[test]
    fn test_nearest_picks_closest_center() {
        let districts = vec![
            district("chennai", 13.0827, 80.2707),
            district("bangalore", 12.9716, 77.5946),
            district("delhi", 28.7041, 77.1025),
        ];
        // A point in central Bangalore
        let found = nearest(&districts, 12.95, 77.60).unwrap();
        assert_eq!(found.id, "bangalore");
    }

    #[test]
    fn test_nearest_empty_list() {
        assert!(nearest(&[], 0.0, 0.0).is_none());
    }
}
