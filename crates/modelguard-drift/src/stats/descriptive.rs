//! Descriptive statistics over sorted, finite columns.

use modelguard_core::constants::SHIFT_QUANTILES;
use modelguard_core::models::{DistributionShift, QuantileShift};

/// Drop non-finite values and sort ascending.
///
/// Returns the cleaned column and the number of values removed.
pub fn finite_sorted(values: &[f64]) -> (Vec<f64>, usize) {
    let mut clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let corrupted = values.len() - clean.len();
    clean.sort_by(f64::total_cmp);
    (clean, corrupted)
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1), 0 for fewer than 2 values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    if var.is_finite() && var > 0.0 {
        var.sqrt()
    } else {
        0.0
    }
}

/// Linear-interpolated quantile of an ascending slice. 0 for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Current-minus-reference deltas of the descriptive statistics.
pub fn distribution_shift(reference_sorted: &[f64], current_sorted: &[f64]) -> DistributionShift {
    if reference_sorted.is_empty() || current_sorted.is_empty() {
        return DistributionShift::default();
    }
    let first = |s: &[f64]| s[0];
    let last = |s: &[f64]| s[s.len() - 1];
    DistributionShift {
        mean_shift: mean(current_sorted) - mean(reference_sorted),
        std_shift: std_dev(current_sorted) - std_dev(reference_sorted),
        min_shift: first(current_sorted) - first(reference_sorted),
        max_shift: last(current_sorted) - last(reference_sorted),
        quantile_shifts: SHIFT_QUANTILES
            .iter()
            .map(|&q| QuantileShift {
                quantile: q,
                shift: quantile(current_sorted, q) - quantile(reference_sorted, q),
            })
            .collect(),
    }
}
