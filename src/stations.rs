/// Station registry for the Kelani basin flood-risk service.
///
/// Defines the canonical list of river gauging stations classified by this
/// service, along with their metadata and Irrigation Department flood
/// thresholds in meters. This is the single source of truth for station
/// identifiers — other modules should reference stations from here rather
/// than hardcoding ids, and threshold tables must never be duplicated
/// per-consumer the way the original dashboard components did.

use crate::model::StationThresholds;

// ---------------------------------------------------------------------------
// Station metadata
// ---------------------------------------------------------------------------

/// Metadata for a single gauging station.
///
/// Threshold fields use 0.0 for "not configured"; `thresholds()` converts
/// them into the domain type whose accessors exclude unconfigured tiers.
pub struct Station {
    /// Stable station identifier used in readings and API paths.
    pub station_id: &'static str,
    /// Official gauging station name.
    pub name: &'static str,
    /// River or tributary the gauge sits on.
    pub river: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Alert threshold in meters (0.0 = not configured).
    pub alert_level_m: f64,
    /// Minor flood threshold in meters (0.0 = not configured).
    pub minor_flood_level_m: f64,
    /// Major flood threshold in meters (0.0 = not configured).
    pub major_flood_level_m: f64,
}

impl Station {
    /// Builds the domain threshold record for this station.
    pub fn thresholds(&self) -> StationThresholds {
        StationThresholds {
            station_id: self.station_id.to_string(),
            alert_level_m: Some(self.alert_level_m),
            minor_flood_level_m: Some(self.minor_flood_level_m),
            major_flood_level_m: Some(self.major_flood_level_m),
        }
    }
}

/// All gauging stations monitored for Kelani basin flood risk, ordered
/// roughly from the river mouth at Colombo upstream into the wet-zone hills.
///
/// Sources:
///   - Station list and thresholds: Irrigation Department hydrology
///     bulletins for the Kelani basin
///   - Coordinates: station metadata from the national gauge network
pub static STATION_REGISTRY: &[Station] = &[
    Station {
        station_id: "nagalagam_street",
        name: "Nagalagam Street",
        river: "Kelani River (lower reach, Colombo)",
        latitude: 6.9608,
        longitude: 79.8786,
        alert_level_m: 3.0,
        minor_flood_level_m: 3.5,
        major_flood_level_m: 4.0,
    },
    Station {
        station_id: "hanwella",
        name: "Hanwella",
        river: "Kelani River (middle reach)",
        latitude: 6.9016,
        longitude: 80.0816,
        alert_level_m: 4.5,
        minor_flood_level_m: 5.0,
        major_flood_level_m: 5.5,
    },
    Station {
        station_id: "glencourse",
        name: "Glencourse",
        river: "Kelani River (upper middle reach)",
        latitude: 6.9731,
        longitude: 80.1742,
        alert_level_m: 2.5,
        minor_flood_level_m: 3.0,
        major_flood_level_m: 3.5,
    },
    Station {
        station_id: "kithulgala",
        name: "Kithulgala",
        river: "Kelani River (upper reach)",
        latitude: 6.9893,
        longitude: 80.4089,
        alert_level_m: 3.0,
        minor_flood_level_m: 3.5,
        major_flood_level_m: 4.0,
    },
    Station {
        station_id: "holombuwa",
        name: "Holombuwa",
        river: "Gurugoda Oya (tributary)",
        latitude: 7.1851,
        longitude: 80.2645,
        alert_level_m: 2.0,
        minor_flood_level_m: 2.5,
        major_flood_level_m: 3.0,
    },
    Station {
        station_id: "deraniyagala",
        name: "Deraniyagala",
        river: "Seethawaka Ganga (tributary)",
        latitude: 6.9334,
        longitude: 80.3380,
        alert_level_m: 2.5,
        minor_flood_level_m: 3.0,
        major_flood_level_m: 3.5,
    },
    Station {
        station_id: "norwood",
        name: "Norwood",
        river: "Kehelgamu Oya (tributary)",
        latitude: 6.8355,
        longitude: 80.6141,
        alert_level_m: 1.5,
        minor_flood_level_m: 2.0,
        major_flood_level_m: 2.5,
    },
];

/// Returns the identifiers for all monitored stations as a `Vec<&str>`.
pub fn all_station_ids() -> Vec<&'static str> {
    STATION_REGISTRY.iter().map(|s| s.station_id).collect()
}

/// Looks up a station by identifier. Returns `None` if not found.
pub fn find_station(station_id: &str) -> Option<&'static Station> {
    STATION_REGISTRY.iter().find(|s| s.station_id == station_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
