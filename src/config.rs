/// Station configuration loader - parses stations.toml
///
/// Separates station threshold data from code, so operators can adjust
/// flood thresholds or add stations without recompiling the service. The
/// compiled-in `stations::STATION_REGISTRY` remains the fallback when no
/// configuration file is deployed.

use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::model::StationThresholds;
use crate::registry::ThresholdRegistry;

// ---------------------------------------------------------------------------
// TOML structures
// ---------------------------------------------------------------------------

/// Station metadata loaded from stations.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub station_id: String,
    pub name: String,
    pub river: String,

    // Geographic location
    pub latitude: f64,
    pub longitude: f64,

    // Flood thresholds in meters (optional - a gauge may be deployed before
    // the Irrigation Department publishes thresholds for it)
    pub thresholds: Option<ThresholdConfig>,
}

/// Flood thresholds from the configuration file, in meters.
///
/// Individual tiers may be omitted or set to 0 to mean "not configured".
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub alert_level_m: Option<f64>,
    #[serde(default)]
    pub minor_flood_level_m: Option<f64>,
    #[serde(default)]
    pub major_flood_level_m: Option<f64>,
}

/// Root configuration structure for TOML parsing
#[derive(Debug, Deserialize)]
struct StationFile {
    station: Vec<StationConfig>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads the station list from a TOML file.
pub fn load_stations<P: AsRef<Path>>(path: P) -> Result<Vec<StationConfig>, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    parse_stations(&contents)
}

/// Loads from the default location (stations.toml in the working directory).
pub fn load_stations_default() -> Result<Vec<StationConfig>, Box<dyn Error>> {
    load_stations("stations.toml")
}

/// Parses station configuration from TOML text and validates threshold
/// ordering (alert < minor < major where configured).
pub fn parse_stations(contents: &str) -> Result<Vec<StationConfig>, Box<dyn Error>> {
    let file: StationFile = toml::from_str(contents)?;

    for station in &file.station {
        if let Some(t) = &station.thresholds {
            let record = to_thresholds(&station.station_id, t);
            validate_ordering(&station.station_id, &record)?;
        }
    }

    Ok(file.station)
}

/// Builds a threshold registry from loaded station configuration.
///
/// Stations without a thresholds table are left out of the registry, so
/// classifying their readings fails with `ThresholdsNotFound` instead of
/// silently passing everything as Normal.
pub fn build_registry(stations: &[StationConfig]) -> ThresholdRegistry {
    let records = stations
        .iter()
        .filter_map(|s| {
            s.thresholds
                .as_ref()
                .map(|t| to_thresholds(&s.station_id, t))
        })
        .collect();
    ThresholdRegistry::from_thresholds(records)
}

/// Converts file-level thresholds to the domain model type.
fn to_thresholds(station_id: &str, config: &ThresholdConfig) -> StationThresholds {
    StationThresholds {
        station_id: station_id.to_string(),
        alert_level_m: config.alert_level_m,
        minor_flood_level_m: config.minor_flood_level_m,
        major_flood_level_m: config.major_flood_level_m,
    }
}

/// Rejects configurations whose configured tiers are not strictly
/// ascending. Unconfigured tiers are exempt.
fn validate_ordering(station_id: &str, t: &StationThresholds) -> Result<(), Box<dyn Error>> {
    if let (Some(alert), Some(minor)) = (t.alert(), t.minor_flood()) {
        if alert >= minor {
            return Err(format!(
                "station '{}': alert_level_m ({}) must be below minor_flood_level_m ({})",
                station_id, alert, minor
            )
            .into());
        }
    }
    if let (Some(minor), Some(major)) = (t.minor_flood(), t.major_flood()) {
        if minor >= major {
            return Err(format!(
                "station '{}': minor_flood_level_m ({}) must be below major_flood_level_m ({})",
                station_id, minor, major
            )
            .into());
        }
    }
    if let (Some(alert), Some(major)) = (t.alert(), t.major_flood()) {
        if alert >= major {
            return Err(format!(
                "station '{}': alert_level_m ({}) must be below major_flood_level_m ({})",
                station_id, alert, major
            )
            .into());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[station]]
        station_id = "hanwella"
        name = "Hanwella"
        river = "Kelani River (middle reach)"
        latitude = 6.9016
        longitude = 80.0816

        [station.thresholds]
        alert_level_m = 4.5
        minor_flood_level_m = 5.0
        major_flood_level_m = 5.5

        [[station]]
        station_id = "ruwanwella"
        name = "Ruwanwella"
        river = "Kelani River (upper middle reach)"
        latitude = 7.0406
        longitude = 80.2517
    "#;

    #[test]
    fn test_parse_sample_config() {
        let stations = parse_stations(SAMPLE).expect("sample config should parse");
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_id, "hanwella");
        assert!(stations[0].thresholds.is_some());
        assert!(stations[1].thresholds.is_none());
    }

    #[test]
    fn test_registry_excludes_stations_without_thresholds() {
        let stations = parse_stations(SAMPLE).expect("sample config should parse");
        let registry = build_registry(&stations);
        assert!(registry.contains("hanwella"));
        assert!(
            !registry.contains("ruwanwella"),
            "a station without thresholds must classify as NotFound, not Normal"
        );
    }

    #[test]
    fn test_registry_carries_configured_values() {
        let stations = parse_stations(SAMPLE).expect("sample config should parse");
        let registry = build_registry(&stations);
        let t = registry.get("hanwella").expect("hanwella is configured");
        assert_eq!(t.alert(), Some(4.5));
        assert_eq!(t.minor_flood(), Some(5.0));
        assert_eq!(t.major_flood(), Some(5.5));
    }

    #[test]
    fn test_partial_thresholds_parse_with_missing_tiers_unset() {
        let contents = r#"
            [[station]]
            station_id = "holombuwa"
            name = "Holombuwa"
            river = "Gurugoda Oya"
            latitude = 7.1851
            longitude = 80.2645

            [station.thresholds]
            alert_level_m = 2.0
            minor_flood_level_m = 2.5
        "#;
        let stations = parse_stations(contents).expect("partial thresholds should parse");
        let registry = build_registry(&stations);
        let t = registry.get("holombuwa").expect("holombuwa is configured");
        assert_eq!(t.alert(), Some(2.0));
        assert_eq!(t.major_flood(), None, "omitted tier must read as unconfigured");
    }

    #[test]
    fn test_out_of_order_thresholds_are_rejected() {
        let contents = r#"
            [[station]]
            station_id = "hanwella"
            name = "Hanwella"
            river = "Kelani River"
            latitude = 6.9016
            longitude = 80.0816

            [station.thresholds]
            alert_level_m = 5.0
            minor_flood_level_m = 4.5
            major_flood_level_m = 5.5
        "#;
        let err = parse_stations(contents).unwrap_err();
        assert!(
            err.to_string().contains("alert_level_m"),
            "error should name the offending field, got: {}",
            err
        );
    }

    #[test]
    fn test_zero_tier_is_exempt_from_ordering_check() {
        // 0 means "unset"; it must not trip the ascending-order validation.
        let contents = r#"
            [[station]]
            station_id = "norwood"
            name = "Norwood"
            river = "Kehelgamu Oya"
            latitude = 6.8355
            longitude = 80.6141

            [station.thresholds]
            alert_level_m = 1.5
            minor_flood_level_m = 0.0
            major_flood_level_m = 2.5
        "#;
        let stations = parse_stations(contents).expect("zero tier should be accepted");
        let registry = build_registry(&stations);
        let t = registry.get("norwood").expect("norwood is configured");
        assert_eq!(t.minor_flood(), None);
    }

    #[test]
    fn test_load_default_config_file() {
        // Exercises the stations.toml shipped at the project root.
        let stations = load_stations_default().expect("stations.toml should load");
        assert!(stations.len() >= 7, "Kelani basin config should have 7 stations");

        let registry = build_registry(&stations);
        assert!(registry.contains("nagalagam_street"));
        assert!(registry.contains("norwood"));
    }
}
