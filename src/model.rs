/// Core data types for the Kelani basin flood-risk classification service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no external collaborator knowledge — only types and
/// the vocabulary the dashboard layer expects on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

/// A single water-level measurement for one gauging station, in meters.
///
/// Produced by the external ingestion collaborator each time a new
/// measurement arrives. Immutable once created; the next measurement for the
/// same station supersedes it rather than mutating it. `current_level_m` is
/// `None` when the gauge reported no usable value — "unknown" is a distinct
/// state from "known safe" and must never collapse into a zero level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub station_id: String,
    pub current_level_m: Option<f64>,
    pub previous_level_m: Option<f64>,
    pub measured_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Official flood thresholds for a gauging station, in meters.
///
/// Levels in ascending order where configured:
///   alert < minor_flood < major_flood
///
/// A threshold of 0 or `None` means "not configured" for that tier; the
/// classifier skips that tier entirely rather than treating it as already
/// exceeded. The original dashboard defaulted missing thresholds to 0, which
/// made every reading register as a flood — the accessors below exist so no
/// caller ever compares against an unconfigured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationThresholds {
    pub station_id: String,
    pub alert_level_m: Option<f64>,
    pub minor_flood_level_m: Option<f64>,
    pub major_flood_level_m: Option<f64>,
}

impl StationThresholds {
    /// Alert threshold, only if configured (> 0).
    pub fn alert(&self) -> Option<f64> {
        configured(self.alert_level_m)
    }

    /// Minor flood threshold, only if configured (> 0).
    pub fn minor_flood(&self) -> Option<f64> {
        configured(self.minor_flood_level_m)
    }

    /// Major flood threshold, only if configured (> 0).
    pub fn major_flood(&self) -> Option<f64> {
        configured(self.major_flood_level_m)
    }
}

/// Filters a raw threshold value down to "configured" (present and > 0).
fn configured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

// ---------------------------------------------------------------------------
// Classification vocabulary
// ---------------------------------------------------------------------------

/// Station flood status, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FloodStatus {
    Normal,
    Alert,
    #[serde(rename = "Minor Flood")]
    MinorFlood,
    #[serde(rename = "Major Flood")]
    MajorFlood,
}

impl FloodStatus {
    /// Display string used by the dashboard and API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            FloodStatus::Normal => "Normal",
            FloodStatus::Alert => "Alert",
            FloodStatus::MinorFlood => "Minor Flood",
            FloodStatus::MajorFlood => "Major Flood",
        }
    }
}

impl std::fmt::Display for FloodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse risk tier derived from status, in ascending order of severity.
///
/// The `Ord` derive gives the severity ordering LOW < MEDIUM < HIGH <
/// CRITICAL used by the fleet aggregator to pick a headline tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Upper-case badge string used by the dashboard ("LOW", "MEDIUM", …).
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of change between the previous and current reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    Unknown,
}

impl Trend {
    /// Upper-case string used by the station card trend indicator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "RISING",
            Trend::Falling => "FALLING",
            Trend::Stable => "STABLE",
            Trend::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// Derived classification for one reading. Never persisted by this crate;
/// the caller decides whether to cache it.
///
/// `status` and `risk_level` are `None` when the current level was unknown —
/// rendered as "N/A" rather than silently defaulting to Normal.
/// `percent_of_alert` is `None` when the alert threshold is not configured,
/// and is deliberately not clamped to 100; progress-bar clamping is a
/// presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub station_id: String,
    pub status: Option<FloodStatus>,
    pub risk_level: Option<RiskLevel>,
    pub percent_of_alert: Option<f64>,
    pub trend: Trend,
}

impl ClassificationResult {
    /// Status label for display, "N/A" when the level was unknown.
    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.as_str()).unwrap_or("N/A")
    }

    /// Risk badge label for display, "N/A" when the level was unknown.
    pub fn risk_label(&self) -> &'static str {
        self.risk_level.map(|r| r.as_str()).unwrap_or("N/A")
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when classifying a reading.
///
/// Both variants are recoverable per-reading: the API layer surfaces a
/// degraded "unknown" station on `ThresholdsNotFound`, and the ingestion
/// path rejects the reading on `InvalidReading`. Nothing here is fatal to
/// the process.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// The station id has no thresholds in the registry.
    ThresholdsNotFound(String),
    /// The reading carried a physically impossible (negative) water level.
    InvalidReading { station_id: String, level_m: f64 },
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::ThresholdsNotFound(station) => {
                write!(f, "No thresholds configured for station: {}", station)
            }
            ClassifyError::InvalidReading { station_id, level_m } => {
                write!(
                    f,
                    "Invalid reading for station {}: negative water level {} m",
                    station_id, level_m
                )
            }
        }
    }
}

impl std::error::Error for ClassifyError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
