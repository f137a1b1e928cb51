/// Flood-risk classification.
///
/// Maps a water-level reading plus its station thresholds to a status,
/// risk tier, and percent-of-alert. This is the one place in the system
/// that compares levels against thresholds; the dashboard, the API layer,
/// and the alert-generation job all consume its output instead of carrying
/// their own copies of the comparison.
///
/// Evaluation runs in strictly descending severity order, first match wins:
///
/// 1. major flood configured and level >= major  → Major Flood / CRITICAL
/// 2. minor flood configured and level >= minor  → Minor Flood / HIGH
/// 3. alert configured and level >= alert        → Alert / MEDIUM
/// 4. otherwise                                  → Normal / LOW
///
/// An unconfigured tier (threshold 0 or absent) is skipped entirely — it
/// falls through to the next check rather than counting as exceeded.

use crate::model::{ClassificationResult, ClassifyError, FloodStatus, Reading, RiskLevel};
use crate::registry::ThresholdRegistry;
use crate::risk::trend::{estimate_trend, DEFAULT_TREND_EPSILON_M};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Classifies a reading, looking up thresholds in the registry.
///
/// Fails with `ThresholdsNotFound` for stations the registry does not know
/// and `InvalidReading` for negative levels. Never panics on numeric input.
pub fn classify(
    registry: &ThresholdRegistry,
    reading: &Reading,
) -> Result<ClassificationResult, ClassifyError> {
    let thresholds = registry.get(&reading.station_id)?;
    classify_reading(reading, thresholds)
}

/// Classifies a reading against already-resolved thresholds.
pub fn classify_reading(
    reading: &Reading,
    thresholds: &crate::model::StationThresholds,
) -> Result<ClassificationResult, ClassifyError> {
    if let Some(level) = reading.current_level_m {
        // A negative water level is physically impossible; reject it at the
        // door instead of letting it classify as Normal.
        if level < 0.0 {
            return Err(ClassifyError::InvalidReading {
                station_id: reading.station_id.clone(),
                level_m: level,
            });
        }
    }

    let trend = estimate_trend(
        reading.current_level_m,
        reading.previous_level_m,
        DEFAULT_TREND_EPSILON_M,
    );

    let (status, risk_level) = match reading.current_level_m {
        Some(level) => {
            let (s, r) = evaluate_tiers(level, thresholds);
            (Some(s), Some(r))
        }
        // Unknown level stays unknown — "N/A", never a silent Normal.
        None => (None, None),
    };

    let percent_of_alert = match (reading.current_level_m, thresholds.alert()) {
        (Some(level), Some(alert)) => Some(level / alert * 100.0),
        _ => None,
    };

    Ok(ClassificationResult {
        station_id: reading.station_id.clone(),
        status,
        risk_level,
        percent_of_alert,
        trend,
    })
}

// ---------------------------------------------------------------------------
// Tier evaluation
// ---------------------------------------------------------------------------

/// Descending-severity threshold comparison. Ties are inclusive: a level
/// exactly at a threshold reaches that tier.
fn evaluate_tiers(
    level_m: f64,
    thresholds: &crate::model::StationThresholds,
) -> (FloodStatus, RiskLevel) {
    if thresholds.major_flood().is_some_and(|t| level_m >= t) {
        (FloodStatus::MajorFlood, RiskLevel::Critical)
    } else if thresholds.minor_flood().is_some_and(|t| level_m >= t) {
        (FloodStatus::MinorFlood, RiskLevel::High)
    } else if thresholds.alert().is_some_and(|t| level_m >= t) {
        (FloodStatus::Alert, RiskLevel::Medium)
    } else {
        (FloodStatus::Normal, RiskLevel::Low)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StationThresholds, Trend};
    use chrono::{TimeZone, Utc};

    /// Thresholds used throughout the worked examples: 2.5 / 3.0 / 4.0 m.
    fn scenario_thresholds() -> StationThresholds {
        StationThresholds {
            station_id: "glencourse".to_string(),
            alert_level_m: Some(2.5),
            minor_flood_level_m: Some(3.0),
            major_flood_level_m: Some(4.0),
        }
    }

    fn reading(level: Option<f64>, previous: Option<f64>) -> Reading {
        Reading {
            station_id: "glencourse".to_string(),
            current_level_m: level,
            previous_level_m: previous,
            measured_at: Utc.with_ymd_and_hms(2025, 5, 28, 6, 30, 0).unwrap(),
        }
    }

    // --- Tier selection ------------------------------------------------------

    #[test]
    fn test_level_above_major_is_major_flood_critical() {
        let result = classify_reading(&reading(Some(4.6), None), &scenario_thresholds())
            .expect("valid reading should classify");
        assert_eq!(result.status, Some(FloodStatus::MajorFlood));
        assert_eq!(result.risk_level, Some(RiskLevel::Critical));
    }

    #[test]
    fn test_level_3_2_is_minor_flood_high_with_128_percent() {
        let result = classify_reading(&reading(Some(3.2), None), &scenario_thresholds())
            .expect("valid reading should classify");
        assert_eq!(result.status, Some(FloodStatus::MinorFlood));
        assert_eq!(result.risk_level, Some(RiskLevel::High));
        let percent = result.percent_of_alert.expect("alert is configured");
        assert!(
            (percent - 128.0).abs() < 1e-9,
            "3.2 m against a 2.5 m alert level should be 128%, got {}",
            percent
        );
    }

    #[test]
    fn test_level_2_0_is_normal_low_with_80_percent() {
        let result = classify_reading(&reading(Some(2.0), None), &scenario_thresholds())
            .expect("valid reading should classify");
        assert_eq!(result.status, Some(FloodStatus::Normal));
        assert_eq!(result.risk_level, Some(RiskLevel::Low));
        let percent = result.percent_of_alert.expect("alert is configured");
        assert!((percent - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_at_alert_level_counts_as_alert_not_normal() {
        // Boundary is inclusive: exactly at the threshold reaches the tier.
        let result = classify_reading(&reading(Some(2.5), None), &scenario_thresholds())
            .expect("valid reading should classify");
        assert_eq!(result.status, Some(FloodStatus::Alert));
        assert_eq!(result.risk_level, Some(RiskLevel::Medium));
    }

    #[test]
    fn test_tie_at_major_level_counts_as_major() {
        let result = classify_reading(&reading(Some(4.0), None), &scenario_thresholds())
            .expect("valid reading should classify");
        assert_eq!(result.status, Some(FloodStatus::MajorFlood));
        assert_eq!(result.risk_level, Some(RiskLevel::Critical));
    }

    // --- Unconfigured tiers --------------------------------------------------

    #[test]
    fn test_unconfigured_major_tier_is_skipped_not_exceeded() {
        // major = 0 means "unset": a 10 m level caps out at Minor Flood.
        // The original dashboard's `|| 0` defaulting made this CRITICAL.
        let thresholds = StationThresholds {
            station_id: "glencourse".to_string(),
            alert_level_m: Some(2.5),
            minor_flood_level_m: Some(3.0),
            major_flood_level_m: Some(0.0),
        };
        let result = classify_reading(&reading(Some(10.0), None), &thresholds)
            .expect("valid reading should classify");
        assert_eq!(result.status, Some(FloodStatus::MinorFlood));
        assert_eq!(result.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn test_no_thresholds_configured_always_normal() {
        let thresholds = StationThresholds {
            station_id: "glencourse".to_string(),
            alert_level_m: None,
            minor_flood_level_m: None,
            major_flood_level_m: None,
        };
        let result = classify_reading(&reading(Some(10.0), None), &thresholds)
            .expect("valid reading should classify");
        assert_eq!(result.status, Some(FloodStatus::Normal));
        assert_eq!(result.risk_level, Some(RiskLevel::Low));
        assert_eq!(
            result.percent_of_alert, None,
            "percent-of-alert is undefined without an alert threshold"
        );
    }

    // --- Unknown and invalid levels ------------------------------------------

    #[test]
    fn test_unknown_level_is_na_not_normal() {
        let result = classify_reading(&reading(None, Some(2.0)), &scenario_thresholds())
            .expect("unknown level is not an error");
        assert_eq!(result.status, None);
        assert_eq!(result.risk_level, None);
        assert_eq!(result.percent_of_alert, None);
        assert_eq!(result.trend, Trend::Unknown);
        assert_eq!(result.status_label(), "N/A");
        assert_eq!(result.risk_label(), "N/A");
    }

    #[test]
    fn test_negative_level_is_rejected() {
        let err = classify_reading(&reading(Some(-0.3), None), &scenario_thresholds())
            .unwrap_err();
        assert_eq!(
            err,
            ClassifyError::InvalidReading {
                station_id: "glencourse".to_string(),
                level_m: -0.3,
            }
        );
    }

    #[test]
    fn test_unknown_station_propagates_thresholds_not_found() {
        let registry = ThresholdRegistry::builtin();
        let mut r = reading(Some(2.0), None);
        r.station_id = "kaduwela".to_string();
        let err = classify(&registry, &r).unwrap_err();
        assert_eq!(err, ClassifyError::ThresholdsNotFound("kaduwela".to_string()));
    }

    // --- Derived metrics -----------------------------------------------------

    #[test]
    fn test_percent_of_alert_is_not_clamped() {
        let result = classify_reading(&reading(Some(10.0), None), &scenario_thresholds())
            .expect("valid reading should classify");
        let percent = result.percent_of_alert.expect("alert is configured");
        assert!(
            (percent - 400.0).abs() < 1e-9,
            "clamping to 100 is a display concern, not ours"
        );
    }

    #[test]
    fn test_trend_flows_through_classification() {
        let result = classify_reading(
            &reading(Some(3.2), Some(2.9)),
            &scenario_thresholds(),
        )
        .expect("valid reading should classify");
        assert_eq!(result.trend, Trend::Rising);
    }

    // --- Properties ----------------------------------------------------------

    #[test]
    fn test_severity_is_monotonic_in_level() {
        // Raising the water level must never lower the reported severity.
        let thresholds = scenario_thresholds();
        let mut previous_risk = RiskLevel::Low;
        let mut level = 0.0;
        while level <= 6.0 {
            let result = classify_reading(&reading(Some(level), None), &thresholds)
                .expect("valid reading should classify");
            let risk = result.risk_level.expect("level is known");
            assert!(
                risk >= previous_risk,
                "severity dropped from {:?} to {:?} at level {}",
                previous_risk,
                risk,
                level
            );
            previous_risk = risk;
            level += 0.05;
        }
        assert_eq!(previous_risk, RiskLevel::Critical);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let registry = ThresholdRegistry::builtin();
        let r = Reading {
            station_id: "hanwella".to_string(),
            current_level_m: Some(5.1),
            previous_level_m: Some(4.8),
            measured_at: Utc.with_ymd_and_hms(2025, 5, 28, 6, 30, 0).unwrap(),
        };
        let first = classify(&registry, &r).expect("valid reading should classify");
        let second = classify(&registry, &r).expect("valid reading should classify");
        assert_eq!(first, second, "classify must be a pure function of its input");
    }
}
