//! Assessment Pipeline
//!
//! Composes the full fusion chain in the mandated order:
//! normalize -> temporal memory -> structural bias -> classify -> predict.
//!
//! Data flows strictly one direction; no step consults a later one.

use chrono::{DateTime, Utc};

use super::structural::StructuralZone;
use super::types::{Assessment, LocationRef, PriorState, SignalSet};
use super::{classifier, memory, predictor, severity, structural};

/// Run one full assessment for a location.
///
/// `previous` is the persisted prior snapshot (or `None` on the first tick),
/// `zones` the static structural table. Deterministic for fixed inputs.
pub fn assess(
    signals: &SignalSet,
    previous: Option<&PriorState>,
    location: &LocationRef,
    zones: &[StructuralZone],
    now: DateTime<Utc>,
) -> Assessment {
    let current = severity::compute_severity(signals);
    let remembered = memory::apply_memory(previous, current, now);
    let biased = structural::apply_structural_bias(remembered, location, zones);

    let classification = classifier::classify(biased);
    let prediction = predictor::predict(&classification, signals, now);

    Assessment {
        severity: biased,
        risk_level: classification.risk_level,
        radius_km: classification.radius_km,
        confidence: classification.confidence,
        prediction,
    }
}
