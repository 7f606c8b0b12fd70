//! Engine Types
//!
//! Core data structures for the fusion engine.
//! No logic beyond small accessors - the computation lives in the sibling
//! modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Flood risk categories, totally ordered LOW < MODERATE < HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// No action needed
    Low,
    /// Stay alert, monitor
    Moderate,
    /// Danger - act now
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }

    /// Numeric rank for comparisons across serialized records.
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Moderate => 2,
            RiskLevel::High => 3,
        }
    }

    /// One-step escalation. HIGH is the ceiling and stays HIGH.
    pub fn escalate(&self) -> RiskLevel {
        match self {
            RiskLevel::Low => RiskLevel::Moderate,
            RiskLevel::Moderate => RiskLevel::High,
            RiskLevel::High => RiskLevel::High,
        }
    }

    /// Parse the persisted string form ("LOW" / "MODERATE" / "HIGH").
    pub fn parse(s: &str) -> Option<RiskLevel> {
        match s {
            "LOW" => Some(RiskLevel::Low),
            "MODERATE" => Some(RiskLevel::Moderate),
            "HIGH" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SIGNALS (input)
// ============================================================================

/// Raw environmental signals for one location at one tick.
///
/// All fields are non-negative by contract; missing upstream values are
/// reported as 0. The normalizer still sanitizes before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalSet {
    /// Current max hourly rain intensity (mm/h)
    pub intensity_1h: f64,
    /// Rainfall summed over the trailing 24h (mm)
    pub accumulation_24h: f64,
    /// River discharge (m³/s)
    pub river_discharge: f64,
    /// Max forecast rain probability (0-100)
    pub forecast_rain_prob: f64,
    /// Forecast rainfall over the next 6h (mm)
    pub forecast_rain_6h: f64,
    /// Forecast rainfall over the next 12h (mm)
    pub forecast_rain_12h: f64,
    /// Forecast rainfall over the next 24h (mm)
    pub forecast_rain_24h: f64,
    /// Max forecast hourly intensity (mm/h)
    pub forecast_max_intensity_1h: f64,
}

/// Normalized, dimensionless signal factors, each in [0, 2].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalScores {
    pub intensity: f64,
    pub accumulation: f64,
    pub river: f64,
}

// ============================================================================
// PRIOR STATE (memory input)
// ============================================================================

/// Immutable snapshot of the previously persisted risk state, as consumed by
/// the temporal memory step. Built at the persistence boundary - the engine
/// never reads storage itself.
#[derive(Debug, Clone, Default)]
pub struct PriorState {
    /// Severity the last computation settled on
    pub severity: f64,
    /// When that computation ran
    pub updated_at: Option<DateTime<Utc>>,
    /// When a HIGH level was last observed (stamped externally)
    pub last_flooded_at: Option<DateTime<Utc>>,
}

// ============================================================================
// LOCATION IDENTITY
// ============================================================================

/// Where an assessment is anchored.
///
/// Structural bias only applies to persistently monitored districts with
/// historical data. Arbitrary searched coordinates are `AdHoc` and bypass
/// the zone table entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRef {
    /// A monitored district, keyed by its district id
    Monitored(String),
    /// An arbitrary query point (user search), no historical record
    AdHoc,
}

// ============================================================================
// CLASSIFIER OUTPUT
// ============================================================================

/// Output of the fusion classifier for one severity value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub risk_level: RiskLevel,
    pub radius_km: f64,
    pub confidence: f64,
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Forecast window the predictor committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum PredictionWindow {
    Hours6,
    Hours12,
    Hours24,
}

impl PredictionWindow {
    pub fn hours(&self) -> i64 {
        match self {
            PredictionWindow::Hours6 => 6,
            PredictionWindow::Hours12 => 12,
            PredictionWindow::Hours24 => 24,
        }
    }
}

impl From<PredictionWindow> for u32 {
    fn from(window: PredictionWindow) -> u32 {
        window.hours() as u32
    }
}

impl TryFrom<u32> for PredictionWindow {
    type Error = String;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        match hours {
            6 => Ok(PredictionWindow::Hours6),
            12 => Ok(PredictionWindow::Hours12),
            24 => Ok(PredictionWindow::Hours24),
            other => Err(format!("invalid prediction window: {other}h")),
        }
    }
}

/// Short-term escalation forecast attached to one assessment.
///
/// Ephemeral - derived per computation, never persisted as its own entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_risk: RiskLevel,
    pub predicted_radius_km: f64,
    pub window: PredictionWindow,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// ASSESSMENT (pipeline output)
// ============================================================================

/// Result of one full pipeline run for one location.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Final (memory-adjusted, zone-biased) severity
    pub severity: f64,
    pub risk_level: RiskLevel,
    pub radius_km: f64,
    pub confidence: f64,
    pub prediction: Option<Prediction>,
}
