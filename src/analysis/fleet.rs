/// Fleet severity aggregation.
///
/// Takes the classified results for every station (one each) and reduces
/// them to the summary the dashboard banner and statistics strip consume:
/// the worst risk tier currently present, which stations sit at that tier,
/// and how many stations sit at each tier. Headline precedence is
/// CRITICAL > HIGH > MEDIUM > LOW.
///
/// The reduction is deterministic: the same results produce the same
/// summary, and station lists preserve input order so a "3 stations
/// reporting major flood" banner names them in a reproducible order.

use serde::{Deserialize, Serialize};

use crate::model::{ClassificationResult, RiskLevel};

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// Per-tier station counts for the statistics display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl TierCounts {
    /// Count for a single tier.
    pub fn at(&self, tier: RiskLevel) -> usize {
        match tier {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    fn bump(&mut self, tier: RiskLevel) {
        match tier {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }
}

/// Basin-wide severity summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Highest risk tier present across the fleet, `None` when no station
    /// could be classified.
    pub headline: Option<RiskLevel>,
    /// Station ids at the headline tier, in input order.
    pub headline_stations: Vec<String>,
    /// Station counts per tier.
    pub counts: TierCounts,
    /// Stations whose level was unknown (no risk tier).
    pub unclassified: usize,
    /// Total results considered.
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Reduces per-station classification results to a fleet summary.
pub fn summarize(results: &[ClassificationResult]) -> FleetSummary {
    let mut counts = TierCounts::default();
    let mut unclassified = 0;
    let mut headline: Option<RiskLevel> = None;

    for result in results {
        match result.risk_level {
            Some(tier) => {
                counts.bump(tier);
                if headline.is_none_or(|h| tier > h) {
                    headline = Some(tier);
                }
            }
            None => unclassified += 1,
        }
    }

    // Second pass keeps the headline list in input order without sorting.
    let headline_stations = match headline {
        Some(tier) => results
            .iter()
            .filter(|r| r.risk_level == Some(tier))
            .map(|r| r.station_id.clone())
            .collect(),
        None => Vec::new(),
    };

    FleetSummary {
        headline,
        headline_stations,
        counts,
        unclassified,
        total: results.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
