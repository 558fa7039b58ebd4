/// Round-half-up: 0.5 and above goes up, below 0.5 goes down.
///
/// Applied to handicaps right before they are compared or subtracted from a
/// gross score. Not the same rule as [`round_half_even`].
#[must_use]
pub fn conventional_round(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Round to `precision` decimals, ties to even, the way stored handicaps are
/// rounded.
#[must_use]
pub fn round_half_even(value: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision);
    let scaled = value * scale;
    // values a hair off a tie (binary noise) must not be treated as ties
    let rounded = if ((scaled - scaled.trunc()).abs() - 0.5).abs() < 1e-9 {
        scaled.round_ties_even()
    } else {
        scaled.round()
    };
    rounded / scale
}

/// Arithmetic mean; `None` on an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
