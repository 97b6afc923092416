//! Float helpers usable without `std`
//!
//! `core` does not provide `round`/`abs` for floats, so the few operations
//! the engine needs are implemented here with plain comparisons and casts.

/// Absolute value of a float
pub fn abs(value: f64) -> f64 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// Round to the nearest integer, halves rounding towards positive infinity
///
/// Returns `None` for NaN and infinities. Values beyond the `i64` range
/// saturate.
pub fn round_half_up(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    let shifted = value + 0.5;
    let truncated = shifted as i64;

    // `as` truncates towards zero; step down once for negative fractions
    if (truncated as f64) > shifted {
        Some(truncated - 1)
    } else {
        Some(truncated)
    }
}

/// Round to one decimal place, as shown next to the desk icon
pub fn round_to_tenth(value: f64) -> f64 {
    match round_half_up(value * 10.0) {
        Some(tenths) => tenths as f64 / 10.0,
        None => value,
    }
}
