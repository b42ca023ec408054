//! Small DSP math helpers

use std::f64::consts::PI;

/// Convert power dB to linear scale
#[inline]
pub fn db_to_power(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

/// Convert linear amplitude to dB
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    20.0 * linear.log10()
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a < 0.0 {
        a += 2.0 * PI;
    }
    a
}

/// Largest absolute value, 0 for an empty slice
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |m, v| m.max(v.abs()))
}

/// Scale so the largest absolute value becomes 1 (no-op on an all-zero slice)
pub fn normalize_peak(values: &mut [f64]) {
    let peak = max_abs(values);
    if peak > 0.0 {
        values.iter_mut().for_each(|v| *v /= peak);
    }
}

/// Midpoint of the min/max range, 0 for an empty slice
pub fn range_midpoint(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    (lo + hi) / 2.0
}
