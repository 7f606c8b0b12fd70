//! Flood Risk Fusion Engine
//!
//! Pure computation chain that turns raw rainfall/river signals into a
//! classified flood-risk state. This is the CORE of the backend - everything
//! else is plumbing around it.
//!
//! ```text
//! signals ──► severity ──► memory ──► structural ──► classifier ──┬─► predictor
//!             (normalize)  (hysteresis) (zone bias)  (level/radius)└─► geometry
//! ```
//!
//! ## Structure
//! - `types`: Core data structures (SignalSet, RiskLevel, Prediction, etc.)
//! - `rules`: Thresholds, weights and policy constants
//! - `severity`: Signal normalization and weighted fusion
//! - `memory`: Temporal hysteresis (flood floor + exponential decay)
//! - `structural`: Static per-district vulnerability bias
//! - `classifier`: Severity -> risk level / radius / confidence
//! - `predictor`: Short-term escalation forecast
//! - `geometry`: Footprint polygon, bounding box, haversine
//! - `pipeline`: Composes the full chain into one assessment
//!
//! The engine performs no I/O, holds no mutable state, and is deterministic:
//! identical inputs (including `now`) produce identical outputs. Independent
//! districts can therefore be assessed concurrently by the caller.

pub mod types;
pub mod rules;
pub mod severity;
pub mod memory;
pub mod structural;
pub mod classifier;
pub mod predictor;
pub mod geometry;
pub mod pipeline;

// Re-export the main surface for convenience
pub use types::{
    Assessment, Classification, LocationRef, Prediction, PredictionWindow, PriorState, RiskLevel,
    SignalScores, SignalSet,
};

pub use structural::StructuralZone;

pub use pipeline::assess;
