/// Threshold registry — read-only threshold lookup by station id.
///
/// The registry is the single injected source of thresholds for the
/// classifier, replacing the per-component threshold tables the original
/// dashboard duplicated (and let drift). It is built once from the station
/// configuration and never mutated; an unknown station id is an error, not
/// a zero-threshold default.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::model::{ClassifyError, StationThresholds};
use crate::stations::STATION_REGISTRY;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable map from station id to flood thresholds.
#[derive(Debug, Clone)]
pub struct ThresholdRegistry {
    thresholds: HashMap<String, StationThresholds>,
}

impl ThresholdRegistry {
    /// Builds a registry from externally supplied threshold records.
    ///
    /// Later records for the same station id replace earlier ones, matching
    /// the "one active configuration per station" rule.
    pub fn from_thresholds(records: Vec<StationThresholds>) -> Self {
        let thresholds = records
            .into_iter()
            .map(|t| (t.station_id.clone(), t))
            .collect();
        ThresholdRegistry { thresholds }
    }

    /// Builds a registry from the compiled-in Kelani station registry.
    pub fn builtin() -> Self {
        Self::from_thresholds(STATION_REGISTRY.iter().map(|s| s.thresholds()).collect())
    }

    /// Looks up thresholds for a station.
    ///
    /// Fails with `ThresholdsNotFound` for unrecognized ids — callers must
    /// surface "cannot classify" rather than defaulting to zero thresholds,
    /// which would make every reading register as a major flood.
    pub fn get(&self, station_id: &str) -> Result<&StationThresholds, ClassifyError> {
        self.thresholds
            .get(station_id)
            .ok_or_else(|| ClassifyError::ThresholdsNotFound(station_id.to_string()))
    }

    /// Whether the registry knows the given station.
    pub fn contains(&self, station_id: &str) -> bool {
        self.thresholds.contains_key(station_id)
    }

    /// Number of stations with configured thresholds.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// All known station ids, sorted for deterministic iteration.
    pub fn station_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.thresholds.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

// ---------------------------------------------------------------------------
// Atomic snapshot handle
// ---------------------------------------------------------------------------

/// Shared handle for request-handling threads, supporting atomic reloads.
///
/// Readers take an `Arc` snapshot and classify against it; a reload swaps
/// in a whole new registry so a concurrent reader never observes a
/// partially updated threshold set. Classification itself holds no lock.
pub struct RegistryHandle {
    current: RwLock<Arc<ThresholdRegistry>>,
}

impl RegistryHandle {
    pub fn new(registry: ThresholdRegistry) -> Self {
        RegistryHandle {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Returns the current registry snapshot.
    pub fn snapshot(&self) -> Arc<ThresholdRegistry> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically replaces the registry with a freshly loaded one.
    pub fn replace(&self, registry: ThresholdRegistry) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(registry);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
