/// floodrisk_service: Kelani basin flood-risk classification service.
///
/// # Module structure
///
/// ```text
/// floodrisk_service
/// ├── model       — shared data types (Reading, StationThresholds, ClassifyError, …)
/// ├── stations    — Kelani basin gauging station registry with flood thresholds
/// ├── config      — station threshold configuration loader (stations.toml)
/// ├── registry    — read-only threshold lookup with atomic snapshot reload
/// ├── risk
/// │   ├── classify — threshold comparison: reading → status / risk tier / percent-of-alert
/// │   └── trend    — rising/falling/stable estimation between readings
/// ├── analysis
/// │   └── fleet    — basin-wide severity summary for the dashboard banner
/// ├── db          — latest-reading retrieval from the ingestion store
/// └── endpoint    — HTTP API serving classified station status
/// ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod db;
pub mod endpoint;
pub mod model;
pub mod registry;
pub mod risk;
pub mod stations;
