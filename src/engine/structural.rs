//! Structural Bias
//!
//! Static historical-vulnerability multiplier per monitored district.
//! This NEVER downgrades severity - it only elevates districts that are
//! historically flood-prone. Ad-hoc query points bypass the step entirely.

use serde::{Deserialize, Serialize};

use super::rules::SEVERITY_CEILING;
use super::types::LocationRef;

/// One row of the static zone table. Reference data, not real-time - it
/// should change rarely (post-event reviews, survey updates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralZone {
    pub district_id: String,
    /// >= 1.0 by contract; values below are treated as 1.0
    pub risk_multiplier: f64,
    /// Why this district carries a bias (for operators, not the engine)
    pub reason: String,
}

/// Apply the structural multiplier for the location, capped at the severity
/// ceiling so runaway multipliers cannot break classification.
pub fn apply_structural_bias(
    severity: f64,
    location: &LocationRef,
    zones: &[StructuralZone],
) -> f64 {
    let LocationRef::Monitored(district_id) = location else {
        return severity;
    };

    let Some(zone) = zones.iter().find(|z| &z.district_id == district_id) else {
        return severity;
    };

    let multiplier = zone.risk_multiplier.max(1.0);
    (severity * multiplier).min(SEVERITY_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> Vec<StructuralZone> {
        vec![
            StructuralZone {
                district_id: "chennai".to_string(),
                risk_multiplier: 1.25,
                reason: "Low elevation + past urban flooding".to_string(),
            },
            StructuralZone {
                district_id: "testville".to_string(),
                risk_multiplier: 10.0,
                reason: "Demonstration zone".to_string(),
            },
            StructuralZone {
                district_id: "highground".to_string(),
                risk_multiplier: 0.5,
                reason: "Bad data - below contract minimum".to_string(),
            },
        ]
    }

    fn monitored(id: &str) -> LocationRef {
        LocationRef::Monitored(id.to_string())
    }

    #[test]
    fn test_unknown_district_is_identity() {
        assert_eq!(
            apply_structural_bias(1.0, &monitored("nowhere"), &zones()),
            1.0
        );
    }

    #[test]
    fn test_multiplier_applies() {
        let biased = apply_structural_bias(1.0, &monitored("chennai"), &zones());
        assert!((biased - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_runaway_multiplier_caps_at_ceiling() {
        let biased = apply_structural_bias(1.085, &monitored("testville"), &zones());
        assert!((biased - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_sub_unit_multiplier_never_decreases() {
        let biased = apply_structural_bias(1.0, &monitored("highground"), &zones());
        assert!(biased >= 1.0);
    }

    #[test]
    fn test_ad_hoc_location_bypasses_bias() {
        // Searched points have no historical record; the zone table must
        // never touch them even if an id happens to collide
        assert_eq!(apply_structural_bias(1.0, &LocationRef::AdHoc, &zones()), 1.0);
    }

    #[test]
    fn test_monotone_non_decreasing() {
        let zs = zones();
        let loc = monitored("chennai");
        let mut last = 0.0;
        for s in [0.0, 0.3, 0.7, 1.3, 2.0, 2.5] {
            let biased = apply_structural_bias(s, &loc, &zs);
            assert!(biased >= s);
            assert!(biased >= last);
            last = biased;
        }
    }
}
