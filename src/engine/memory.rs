//! Temporal Memory (Hysteresis)
//!
//! Prevents flicker: a district that recently flooded must not instantly
//! report LOW once the rain stops, and an elevated severity from a prior
//! tick fades along a decay curve instead of vanishing.
//!
//! Memory only elevates - the output is never below the current severity.

use chrono::{DateTime, Utc};

use super::rules::{DECAY_HALF_LIFE_HOURS, FLOOD_PERSISTENCE_HOURS, RECENT_FLOOD_FLOOR};
use super::types::PriorState;

/// Fractional hours from `then` to `now`.
pub fn hours_between(now: DateTime<Utc>, then: DateTime<Utc>) -> f64 {
    (now - then).num_milliseconds() as f64 / 3_600_000.0
}

/// Blend the freshly computed severity with the persisted prior state.
///
/// 1. No prior state: identity.
/// 2. Flood within the persistence window: hard floor at 0.8.
/// 3. Prior severity decays with a 24h half-life; the decayed value wins if
///    it is still above everything else.
pub fn apply_memory(
    previous: Option<&PriorState>,
    current_severity: f64,
    now: DateTime<Utc>,
) -> f64 {
    let Some(prev) = previous else {
        return current_severity;
    };

    let mut severity = current_severity;

    if let Some(flooded_at) = prev.last_flooded_at {
        // Clock skew can put the marker in the future; treat that as "just now"
        let flooded_hours = hours_between(now, flooded_at).max(0.0);
        if flooded_hours < FLOOD_PERSISTENCE_HOURS {
            severity = severity.max(RECENT_FLOOD_FLOOR);
        }
    }

    if prev.severity > 0.0 {
        if let Some(updated_at) = prev.updated_at {
            let elapsed = hours_between(now, updated_at).max(0.0);
            let decay = (-std::f64::consts::LN_2 * elapsed / DECAY_HALF_LIFE_HOURS).exp();
            severity = severity.max(prev.severity * decay);
        }
    }

    severity
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn prior(severity: f64, updated_hours_ago: i64) -> PriorState {
        PriorState {
            severity,
            updated_at: Some(Utc::now() - Duration::hours(updated_hours_ago)),
            last_flooded_at: None,
        }
    }

    #[test]
    fn test_no_prior_state_is_identity() {
        assert_eq!(apply_memory(None, 0.42, Utc::now()), 0.42);
    }

    #[test]
    fn test_recent_flood_enforces_floor() {
        let now = Utc::now();
        let prev = PriorState {
            severity: 0.0,
            updated_at: None,
            last_flooded_at: Some(now - Duration::hours(10)),
        };
        // Dry signals, but flooded 10h ago: floor at 0.8
        assert!((apply_memory(Some(&prev), 0.0, now) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_old_flood_does_not_floor() {
        let now = Utc::now();
        let prev = PriorState {
            severity: 0.0,
            updated_at: None,
            last_flooded_at: Some(now - Duration::hours(73)),
        };
        assert_eq!(apply_memory(Some(&prev), 0.1, now), 0.1);
    }

    #[test]
    fn test_decay_half_life() {
        let now = Utc::now();
        let prev = prior(1.0, 24);
        let adjusted = apply_memory(Some(&prev), 0.0, now);
        // One half-life elapsed: 1.0 decays to ~0.5
        assert!((adjusted - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_elapsed_collapses_to_max() {
        let now = Utc::now();
        let prev = PriorState {
            severity: 1.2,
            updated_at: Some(now),
            last_flooded_at: None,
        };
        // Same-tick re-evaluation: no decay at all
        assert!((apply_memory(Some(&prev), 0.3, now) - 1.2).abs() < 1e-12);
        assert!((apply_memory(Some(&prev), 1.5, now) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_memory_never_suppresses_current_severity() {
        let now = Utc::now();
        let prev = PriorState {
            severity: 0.2,
            updated_at: Some(now - Duration::hours(48)),
            last_flooded_at: Some(now - Duration::hours(100)),
        };
        for current in [0.0, 0.5, 1.0, 1.9] {
            assert!(apply_memory(Some(&prev), current, now) >= current);
        }
    }

    #[test]
    fn test_future_updated_at_does_not_amplify() {
        let now = Utc::now();
        let prev = PriorState {
            severity: 1.0,
            updated_at: Some(now + Duration::hours(5)),
            last_flooded_at: None,
        };
        // Negative elapsed would give decay > 1; must clamp to no-decay
        assert!((apply_memory(Some(&prev), 0.0, now) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let now = Utc::now();
        let prev = prior(0.9, 12);
        let a = apply_memory(Some(&prev), 0.4, now);
        let b = apply_memory(Some(&prev), 0.4, now);
        assert_eq!(a, b);
    }
}
