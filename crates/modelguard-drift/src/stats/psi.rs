//! Population Stability Index over equal-frequency reference bins.
//!
//! PSI = Σ (cur_i − ref_i) × ln(cur_i / ref_i). Every term is non-negative,
//! so PSI ≥ 0. Empty bins use [`PSI_EPSILON`] as their proportion.

use std::collections::{BTreeMap, BTreeSet};

use modelguard_core::constants::{PSI_EPSILON, PSI_MEAN_SHIFT_CAP};

use super::descriptive::{mean, quantile, std_dev};

/// PSI between a sorted finite reference column and a finite current column.
///
/// Bin edges are the reference `i / bins` quantiles; duplicate edges collapse, so
/// heavily tied references produce fewer bins. A zero-variance reference has a
/// single degenerate bin: the mean shift in current standard deviations is reported
/// instead, capped at [`PSI_MEAN_SHIFT_CAP`]. A constant current scores 0 when it
/// matches the reference and the cap otherwise.
pub fn psi(reference_sorted: &[f64], current: &[f64], bins: usize) -> f64 {
    if reference_sorted.is_empty() || current.is_empty() {
        return 0.0;
    }

    let ref_min = reference_sorted[0];
    let ref_max = reference_sorted[reference_sorted.len() - 1];
    if ref_max - ref_min <= 0.0 {
        return zero_variance_fallback(reference_sorted, current);
    }

    let mut edges: Vec<f64> = (1..bins.max(2))
        .map(|i| quantile(reference_sorted, i as f64 / bins.max(2) as f64))
        .collect();
    edges.dedup();

    let ref_counts = bin_counts(reference_sorted, &edges);
    let cur_counts = bin_counts(current, &edges);
    let ref_total = reference_sorted.len() as f64;
    let cur_total = current.len() as f64;

    ref_counts
        .iter()
        .zip(cur_counts.iter())
        .map(|(&r, &c)| {
            let r = proportion(r, ref_total);
            let c = proportion(c, cur_total);
            (c - r) * (c / r).ln()
        })
        .sum::<f64>()
        .max(0.0)
}

/// PSI over categorical counts (used for label distributions).
/// Categories missing on one side get an epsilon proportion.
pub fn categorical_psi(reference: &BTreeMap<u32, usize>, current: &BTreeMap<u32, usize>) -> f64 {
    let ref_total: usize = reference.values().sum();
    let cur_total: usize = current.values().sum();
    if ref_total == 0 || cur_total == 0 {
        return 0.0;
    }
    let categories: BTreeSet<u32> = reference.keys().chain(current.keys()).copied().collect();
    categories
        .iter()
        .map(|k| {
            let r = proportion(reference.get(k).copied().unwrap_or(0), ref_total as f64);
            let c = proportion(current.get(k).copied().unwrap_or(0), cur_total as f64);
            (c - r) * (c / r).ln()
        })
        .sum::<f64>()
        .max(0.0)
}

fn proportion(count: usize, total: f64) -> f64 {
    if count == 0 {
        PSI_EPSILON
    } else {
        count as f64 / total
    }
}

/// Count values per bin. Bin `i` holds values `<= edges[i]` and `> edges[i - 1]`;
/// the last bin holds everything above the last edge.
fn bin_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0usize; edges.len() + 1];
    for &v in values {
        let idx = edges.partition_point(|&e| e < v);
        counts[idx] += 1;
    }
    counts
}

fn zero_variance_fallback(reference_sorted: &[f64], current: &[f64]) -> f64 {
    let shift = (mean(current) - mean(reference_sorted)).abs();
    let cur_std = std_dev(current);
    if cur_std <= 0.0 {
        return if shift > 0.0 { PSI_MEAN_SHIFT_CAP } else { 0.0 };
    }
    (shift / cur_std).min(PSI_MEAN_SHIFT_CAP)
}
