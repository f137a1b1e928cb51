/// Fleet-level analysis for the Kelani basin flood-risk service.
///
/// Submodules:
/// - `fleet` — reduces per-station classification results into the
///   basin-wide severity summary behind the dashboard banner.

pub mod fleet;
