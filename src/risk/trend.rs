/// Water-level trend estimation.
///
/// Compares the current level against the previous one with a small dead
/// band so gauge noise does not flap the dashboard arrow between RISING and
/// FALLING on every poll.

use crate::model::Trend;

/// Default dead band in meters. Changes at or below this magnitude are
/// reported as Stable.
pub const DEFAULT_TREND_EPSILON_M: f64 = 0.01;

/// Estimates the trend between two levels.
///
/// Returns `Unknown` when either level is missing — a gauge that stopped
/// reporting is not "stable".
pub fn estimate_trend(
    current_level_m: Option<f64>,
    previous_level_m: Option<f64>,
    epsilon_m: f64,
) -> Trend {
    let (current, previous) = match (current_level_m, previous_level_m) {
        (Some(c), Some(p)) => (c, p),
        _ => return Trend::Unknown,
    };

    if current - previous > epsilon_m {
        Trend::Rising
    } else if previous - current > epsilon_m {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
