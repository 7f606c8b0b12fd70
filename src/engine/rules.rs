//! Fusion Rules & Policy Constants
//!
//! Every threshold, weight and reference value the engine uses.
//! No logic here - the sibling modules consume these.

// ============================================================================
// NORMALIZATION REFERENCES
// ============================================================================

/// Hourly rain intensity that maps to a factor of 1.0 (mm/h)
pub const INTENSITY_REFERENCE_MM_H: f64 = 20.0;

/// 24h rainfall accumulation that maps to a factor of 1.0 (mm)
pub const ACCUMULATION_REFERENCE_MM: f64 = 80.0;

/// River discharge that maps to a factor of 1.0 (m³/s)
pub const RIVER_REFERENCE_M3_S: f64 = 800.0;

/// Normalized factors are clamped to [0, this]
pub const FACTOR_CEILING: f64 = 2.0;

// ============================================================================
// SEVERITY WEIGHTS (must sum to 1.0)
// ============================================================================

/// Weight of short-burst intensity (favored slightly over the others)
pub const INTENSITY_WEIGHT: f64 = 0.4;

/// Weight of trailing 24h accumulation
pub const ACCUMULATION_WEIGHT: f64 = 0.3;

/// Weight of river discharge
pub const RIVER_WEIGHT: f64 = 0.3;

// ============================================================================
// TEMPORAL MEMORY
// ============================================================================

/// How long after an observed flood the hard severity floor holds (hours)
pub const FLOOD_PERSISTENCE_HOURS: f64 = 72.0;

/// Severity floor while the flood persistence window is open.
/// Corresponds to at least a MODERATE classification.
pub const RECENT_FLOOD_FLOOR: f64 = 0.8;

/// Half-life of the prior severity contribution (hours)
pub const DECAY_HALF_LIFE_HOURS: f64 = 24.0;

// ============================================================================
// STRUCTURAL BIAS
// ============================================================================

/// Hard ceiling on biased severity. Keeps classification meaningful even
/// under demonstration-grade zone multipliers (up to 10x).
pub const SEVERITY_CEILING: f64 = 2.5;

// ============================================================================
// CLASSIFICATION THRESHOLDS
// ============================================================================

/// At or above this severity = MODERATE (below = LOW)
pub const MODERATE_THRESHOLD: f64 = 0.7;

/// At or above this severity = HIGH
pub const HIGH_THRESHOLD: f64 = 1.3;

/// Base footprint radius (km), scaled by clamped severity
pub const BASE_RADIUS_KM: f64 = 3.0;

/// Severity clamp range for radius derivation - the footprint stays within
/// [2.4, 6.6] km no matter how extreme severity becomes
pub const RADIUS_SEVERITY_FLOOR: f64 = 0.8;
pub const RADIUS_SEVERITY_CEILING: f64 = 2.2;

/// Severity at which confidence saturates to 1.0
pub const CONFIDENCE_SATURATION_SEVERITY: f64 = 1.5;

// ============================================================================
// PREDICTION
// ============================================================================

/// Minimum confidence required before a prediction is issued at all
pub const PREDICTION_CONFIDENCE_MIN: f64 = 0.55;

/// Forecast rain thresholds per window (mm) - longest window checked first
pub const FORECAST_RAIN_24H_MIN: f64 = 60.0;
pub const FORECAST_RAIN_12H_MIN: f64 = 40.0;
pub const FORECAST_RAIN_6H_MIN: f64 = 25.0;

/// Radius spread per mm of forecast rain (km/mm)
pub const SPREAD_PER_MM_RAIN: f64 = 0.015;

/// Radius spread per mm/h of forecast intensity (km per mm/h)
pub const SPREAD_PER_MM_INTENSITY: f64 = 0.04;

/// Drainage loss rate - infrastructure degrades forecast containment
pub const DRAIN_DECAY_RATE: f64 = 0.25;

/// Floor on the drainage decay factor
pub const MIN_DRAIN_DECAY: f64 = 0.3;
