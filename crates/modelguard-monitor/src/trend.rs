//! Accuracy trend and within-window accuracy drift.

use modelguard_core::models::{AccuracySnapshot, AccuracyTrend, PredictionRecord};

/// Compare the mean accuracy of the last `window` snapshots with the `window`
/// before them. Needs `2 * window` snapshots.
pub fn accuracy_trend<'a, I>(snapshots: I, window: usize, band: f64) -> AccuracyTrend
where
    I: IntoIterator<Item = &'a AccuracySnapshot>,
    I::IntoIter: DoubleEndedIterator,
{
    let window = window.max(1);
    let recent: Vec<f64> = snapshots
        .into_iter()
        .rev()
        .take(2 * window)
        .map(|s| s.accuracy)
        .collect();
    if recent.len() < 2 * window {
        return AccuracyTrend::InsufficientData;
    }
    let last = recent[..window].iter().sum::<f64>() / window as f64;
    let previous = recent[window..].iter().sum::<f64>() / window as f64;
    let delta = last - previous;
    if delta > band {
        AccuracyTrend::Improving
    } else if delta < -band {
        AccuracyTrend::Degrading
    } else {
        AccuracyTrend::Stable
    }
}

/// Accuracy of the older half of the window minus accuracy of the newer half.
/// Positive means degradation; 0 with fewer than 2 records.
pub fn accuracy_drift<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a PredictionRecord>,
    I::IntoIter: ExactSizeIterator,
{
    let records = records.into_iter();
    let n = records.len();
    if n < 2 {
        return 0.0;
    }
    let half = n / 2;
    let (mut early, mut recent) = (0usize, 0usize);
    for (i, r) in records.enumerate() {
        if r.is_hit() {
            if i < half {
                early += 1;
            } else {
                recent += 1;
            }
        }
    }
    early as f64 / half as f64 - recent as f64 / (n - half) as f64
}
