//! Expected calibration error over equal-width confidence bins.

use modelguard_core::models::PredictionRecord;

/// `ECE = Σ (|bin| / n) · |avg confidence − accuracy|` over `bins` equal-width bins.
///
/// A confidence of exactly 1.0 falls in the last bin. 0 for an empty window.
pub fn expected_calibration_error<'a, I>(records: I, bins: usize) -> f64
where
    I: IntoIterator<Item = &'a PredictionRecord>,
{
    let bins = bins.max(1);
    let mut confidence_sum = vec![0.0; bins];
    let mut correct = vec![0usize; bins];
    let mut counts = vec![0usize; bins];
    let mut total = 0usize;

    for r in records {
        let c = r.confidence.clamp(0.0, 1.0);
        let bin = ((c * bins as f64).floor() as usize).min(bins - 1);
        confidence_sum[bin] += c;
        correct[bin] += usize::from(r.is_hit());
        counts[bin] += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    (0..bins)
        .filter(|&b| counts[b] > 0)
        .map(|b| {
            let n = counts[b] as f64;
            let gap = (confidence_sum[b] / n - correct[b] as f64 / n).abs();
            n / total as f64 * gap
        })
        .sum()
}
