//! Safety arithmetic for patch validation.

use statrs::distribution::{ContinuousCDF, Normal};

use modelguard_core::models::ClippingConfig;

const NEAR_ZERO: f64 = 1e-9;

/// Relative improvement of a drift measure, in [0, 1].
///
/// When nothing was drifting to begin with, an unchanged measure counts as a full
/// reduction and any increase as none.
pub fn drift_reduction(before: f64, after: f64) -> f64 {
    if before.abs() < NEAR_ZERO {
        return if after.abs() < NEAR_ZERO { 1.0 } else { 0.0 };
    }
    ((before - after) / before).clamp(0.0, 1.0)
}

/// Share of the unpatched accuracy kept after patching, capped at 1.
pub fn accuracy_retention(patched: f64, unpatched: f64) -> f64 {
    if unpatched <= 0.0 {
        return 1.0;
    }
    (patched / unpatched).clamp(0.0, 1.0)
}

/// `w * reduction + (1 - w) * retention`.
pub fn safety_score(reduction: f64, retention: f64, reduction_weight: f64) -> f64 {
    let w = reduction_weight.clamp(0.0, 1.0);
    (w * reduction + (1.0 - w) * retention).clamp(0.0, 1.0)
}

/// Wilson score interval for an accuracy over `n` trials.
///
/// Always contains `accuracy`; `(accuracy, accuracy)` when `n` is 0.
pub fn wilson_interval(accuracy: f64, n: usize, confidence_level: f64) -> (f64, f64) {
    if n == 0 {
        return (accuracy, accuracy);
    }
    let alpha = (1.0 - confidence_level).clamp(1e-12, 1.0);
    let z = Normal::standard().inverse_cdf(1.0 - alpha / 2.0);
    let n = n as f64;
    let p = accuracy.clamp(0.0, 1.0);
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = z / denom * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();

    let lower = (center - half).min(accuracy).max(0.0);
    let upper = (center + half).max(accuracy).min(1.0);
    (lower, upper)
}

/// Mean over the clipped features of how far the share of `rows` outside the
/// clip bounds sits from the reference's own share outside them.
///
/// Values that are missing or NaN never count as outside.
pub fn tail_excess(clipping: &ClippingConfig, rows: &[Vec<f64>], reference: &[Vec<f64>]) -> f64 {
    let features = clipping
        .feature_indices
        .iter()
        .zip(clipping.min_values.iter().zip(clipping.max_values.iter()));
    let mut total = 0.0;
    let mut count = 0usize;
    for (&index, (&lo, &hi)) in features {
        let outside = |rows: &[Vec<f64>]| {
            if rows.is_empty() {
                return 0.0;
            }
            let n = rows
                .iter()
                .filter_map(|r| r.get(index))
                .filter(|&&x| x < lo || x > hi)
                .count();
            n as f64 / rows.len() as f64
        };
        total += (outside(rows) - outside(reference)).abs();
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Fraction of non-zero classes.
pub fn positive_rate(classes: &[u32]) -> f64 {
    if classes.is_empty() {
        return 0.0;
    }
    classes.iter().filter(|&&c| c != 0).count() as f64 / classes.len() as f64
}
