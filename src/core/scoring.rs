//! Score computation for indicators
//!
//! A score is the percentage of the target that was actually achieved,
//! rounded to two decimal places. Weight is stored alongside each indicator
//! but is not part of the score.

/// Weight applied to new indicators when the caller does not give one
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Compute the score for a target/actual pair.
///
/// Returns `0.0` when `target` is zero.
pub fn score(target: f64, actual: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    round2(actual / target * 100.0)
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
