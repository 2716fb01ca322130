//! Small numeric helpers shared by the survey and graph engines.

use std::cmp::Ordering;

/// Round to `decimals` places, half to even.
///
/// Rounding follows the exact binary value: `2.675` is stored just below
/// the midpoint and rounds to `2.67`, while `0.125` is an exact tie and
/// rounds to `0.12`. Used only at reporting boundaries; internal computation
/// stays at full precision.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let floor = scaled.floor();

    let rounded = if scaled - floor == 0.5 {
        // The product may itself have been rounded onto the midpoint; its
        // exact error says which side the true value lies on.
        let error = value.mul_add(factor, -scaled);
        if error > 0.0 {
            floor + 1.0
        } else if error < 0.0 {
            floor
        } else if floor % 2.0 == 0.0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };

    rounded / factor
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Total order on floats for sorting; NaN sorts as equal.
pub fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Empirical credible interval using nearest-rank indices.
///
/// Sorts the sample, then picks `floor(n * tail)` and `floor(n * (1 - tail))`
/// with `tail = (1 - level) / 2`, both clamped to `[0, n - 1]`. The bounds
/// are always members of the sample, never interpolated. Empty input yields
/// `(0.0, 0.0)`. Bounds are rounded to two decimals.
pub fn credible_interval(values: &[f64], level: f64) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(cmp_f64);
    let n = sorted.len();

    let tail = (1.0 - level) / 2.0;
    let lower_idx = ((n as f64 * tail).floor().max(0.0) as usize).min(n - 1);
    let upper_idx = ((n as f64 * (1.0 - tail)).floor().max(0.0) as usize).min(n - 1);

    (round2(sorted[lower_idx]), round2(sorted[upper_idx]))
}
