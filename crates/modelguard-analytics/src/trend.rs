//! Drift score trend.

use modelguard_core::models::DriftTrend;

/// Mean of the last `k` scores against the `k` before them, `k = min(window, n / 2)`.
/// Needs at least 3 scores. Scores are oldest first.
pub fn drift_trend(scores: &[f64], window: usize, band: f64) -> DriftTrend {
    let n = scores.len();
    if n < 3 {
        return DriftTrend::InsufficientData;
    }
    let k = window.max(1).min(n / 2);
    let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
    let recent = mean(&scores[n - k..]);
    let previous = mean(&scores[n - 2 * k..n - k]);
    let delta = recent - previous;
    if delta > band {
        DriftTrend::Increasing
    } else if delta < -band {
        DriftTrend::Decreasing
    } else {
        DriftTrend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_history_is_insufficient() {
        assert_eq!(drift_trend(&[], 10, 0.1), DriftTrend::InsufficientData);
        assert_eq!(drift_trend(&[0.1, 0.9], 10, 0.1), DriftTrend::InsufficientData);
    }

    #[test]
    fn three_points_compare_last_against_middle() {
        assert_eq!(drift_trend(&[0.9, 0.1, 0.5], 10, 0.1), DriftTrend::Increasing);
        assert_eq!(drift_trend(&[0.1, 0.5, 0.45], 10, 0.1), DriftTrend::Stable);
    }

    #[test]
    fn full_windows() {
        let mut scores = vec![0.1; 10];
        scores.extend([0.4; 10]);
        assert_eq!(drift_trend(&scores, 10, 0.1), DriftTrend::Increasing);
        scores.reverse();
        assert_eq!(drift_trend(&scores, 10, 0.1), DriftTrend::Decreasing);
    }

    #[test]
    fn older_history_is_ignored() {
        let mut scores = vec![0.9; 30];
        scores.extend([0.2; 20]);
        assert_eq!(drift_trend(&scores, 10, 0.1), DriftTrend::Stable);
    }
}
