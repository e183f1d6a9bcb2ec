use crate::error::{Result, SurveyError};

/// Hours in one survey day.
pub const HOURS_PER_DAY: usize = 24;

/// Rounds to the nearest integer, ties to even (`2.5 -> 2`, `3.5 -> 4`).
pub fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Computes `part / total * 100` rounded half-to-even.
///
/// # Errors
///
/// Returns [`SurveyError::DivisionByZero`] when `total` is zero.
pub fn percentage(part: usize, total: usize) -> Result<i64> {
    if total == 0 {
        return Err(SurveyError::DivisionByZero);
    }
    Ok(round_half_even(part as f64 / total as f64 * 100.0))
}

/// Average records per hour over a full day, rounded half-to-even.
pub fn average_per_hour(count: usize) -> i64 {
    round_half_even(count as f64 / HOURS_PER_DAY as f64)
}
