//! Footprint Generator
//!
//! Converts a risk radius into displayable geometry: a great-circle polygon
//! for rendering and a cheap flat-Earth bounding box for coarse spatial
//! filtering. Also hosts the haversine helper the request layer uses to
//! measure user-to-district distances.

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// One polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Axis-aligned bounding box in degrees. Intentionally approximate - use
/// the polygon for display, this only for coarse filtering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Circle of `radius_km` around a center, as `point_count` vertices ordered
/// by increasing bearing from 0 to 2π (exclusive). Consumers close the ring
/// themselves when rendering.
pub fn flood_polygon(lat: f64, lon: f64, radius_km: f64, point_count: usize) -> Vec<GeoPoint> {
    let lat_rad = lat.to_radians();
    let lon_rad = lon.to_radians();
    let angular_distance = radius_km / EARTH_RADIUS_KM;

    let mut polygon = Vec::with_capacity(point_count);

    for i in 0..point_count {
        let bearing = 2.0 * std::f64::consts::PI * i as f64 / point_count as f64;

        let new_lat = (lat_rad.sin() * angular_distance.cos()
            + lat_rad.cos() * angular_distance.sin() * bearing.cos())
        .asin();

        let new_lon = lon_rad
            + (bearing.sin() * angular_distance.sin() * lat_rad.cos())
                .atan2(angular_distance.cos() - lat_rad.sin() * new_lat.sin());

        polygon.push(GeoPoint {
            lat: new_lat.to_degrees(),
            lng: new_lon.to_degrees(),
        });
    }

    polygon
}

/// Flat-Earth degree approximation: ~111 km per degree of latitude, with
/// longitude scaled by cos(lat).
pub fn bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let delta_lat = radius_km / 111.0;
    let delta_lon = radius_km / (111.0 * lat.to_radians().cos());

    BoundingBox {
        north: lat + delta_lat,
        south: lat - delta_lat,
        east: lon + delta_lon,
        west: lon - delta_lon,
    }
}

/// Great-circle distance between two points in km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHENNAI: (f64, f64) = (13.0827, 80.2707);

    #[test]
    fn test_polygon_point_count_and_order() {
        let polygon = flood_polygon(CHENNAI.0, CHENNAI.1, 3.0, 64);
        assert_eq!(polygon.len(), 64);
        // First vertex is due north of the center
        assert!(polygon[0].lat > CHENNAI.0);
        assert!((polygon[0].lng - CHENNAI.1).abs() < 1e-9);
    }

    #[test]
    fn test_four_point_polygon_at_cardinal_bearings() {
        let r = 5.0;
        let polygon = flood_polygon(CHENNAI.0, CHENNAI.1, r, 4);
        assert_eq!(polygon.len(), 4);

        // Every vertex sits at great-circle distance r from the center
        for p in &polygon {
            let dist = haversine_km(CHENNAI.0, CHENNAI.1, p.lat, p.lng);
            assert!((dist - r).abs() < 1e-6, "distance {dist} != {r}");
        }

        // Bearings 0/90/180/270: north, east, south, west
        assert!(polygon[0].lat > CHENNAI.0);
        assert!(polygon[1].lng > CHENNAI.1);
        assert!(polygon[2].lat < CHENNAI.0);
        assert!(polygon[3].lng < CHENNAI.1);
    }

    #[test]
    fn test_bounding_box_is_symmetric_and_contains_center() {
        let bbox = bounding_box(CHENNAI.0, CHENNAI.1, 3.0);
        assert!(bbox.north > CHENNAI.0 && bbox.south < CHENNAI.0);
        assert!(bbox.east > CHENNAI.1 && bbox.west < CHENNAI.1);
        assert!((bbox.north - CHENNAI.0 - (CHENNAI.0 - bbox.south)).abs() < 1e-12);
        // Longitude span widens with latitude
        assert!(bbox.east - CHENNAI.1 > bbox.north - CHENNAI.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Chennai to Bangalore is roughly 290 km
        let d = haversine_km(13.0827, 80.2707, 12.9716, 77.5946);
        assert!(d > 280.0 && d < 300.0, "got {d}");
    }

    #[test]
    fn test_haversine_zero_distance() {
        assert!(haversine_km(CHENNAI.0, CHENNAI.1, CHENNAI.0, CHENNAI.1) < 1e-9);
    }
}
