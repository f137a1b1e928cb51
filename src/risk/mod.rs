/// Flood-risk evaluation for the Kelani basin service.
///
/// Submodules:
/// - `classify` — threshold comparison: reading → status / risk tier / percent-of-alert.
/// - `trend` — rising/falling/stable estimation between consecutive readings.

pub mod classify;
pub mod trend;
