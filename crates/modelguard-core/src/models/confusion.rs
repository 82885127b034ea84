//! Confusion-matrix counts and the metrics derived from them.

use serde::{Deserialize, Serialize};

/// Binary confusion counts.
///
/// Multi-class pairs fold into these counts with class 0 as the negative class:
/// correct class-0 predictions are TN, other correct predictions are TP, predicting 0
/// for a non-zero actual is FN, and every other error is FP. The four counts always
/// sum to the number of pairs, and `(tp + tn) / total` equals multi-class accuracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    /// Tally `(predicted, actual)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut m = Self::default();
        for (predicted, actual) in pairs {
            m.record(predicted, actual);
        }
        m
    }

    /// Tally one pair. Counting the whole diagonal as TP would count correct class-0
    /// predictions twice (TP and TN) and break `tp + tn + fp + fn == total`, so the
    /// class-0 diagonal cell is TN only.
    pub fn record(&mut self, predicted: u32, actual: u32) {
        match (predicted == actual, predicted, actual) {
            (true, 0, _) => self.true_negatives += 1,
            (true, _, _) => self.true_positives += 1,
            (false, 0, _) => self.false_negatives += 1,
            (false, _, _) => self.false_positives += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// (TP + TN) / total, 0 when empty.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// TP / (TP + FP), 0 when the denominator is 0.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN), 0 when the denominator is 0.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall, 0 when both are 0.
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r <= 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Matthews correlation coefficient, 0 when the denominator is 0.
    pub fn matthews_correlation(&self) -> f64 {
        let tp = self.true_positives as f64;
        let tn = self.true_negatives as f64;
        let fp = self.false_positives as f64;
        let fn_ = self.false_negatives as f64;
        let denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        if denom <= 0.0 || !denom.is_finite() {
            0.0
        } else {
            ((tp * tn - fp * fn_) / denom).clamp(-1.0, 1.0)
        }
    }
}

fn ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_counts() {
        let m = ConfusionMatrix::from_pairs([(1, 1), (1, 0), (0, 1), (0, 0), (1, 1)]);
        assert_eq!(m.true_positives, 2);
        assert_eq!(m.false_positives, 1);
        assert_eq!(m.false_negatives, 1);
        assert_eq!(m.true_negatives, 1);
        assert!((m.accuracy() - 0.6).abs() < 1e-12);
        assert!((m.precision() - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn multiclass_counts_sum_to_total() {
        let pairs = [(2, 2), (1, 2), (0, 2), (2, 0), (0, 0), (1, 1)];
        let m = ConfusionMatrix::from_pairs(pairs);
        assert_eq!(m.total(), pairs.len() as u64);
        assert!((m.accuracy() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn class_zero_diagonal_is_negative_only() {
        let m = ConfusionMatrix::from_pairs([(0, 0), (1, 1), (2, 2)]);
        assert_eq!(m.true_positives, 2);
        assert_eq!(m.true_negatives, 1);
        assert_eq!(m.total(), 3);
        assert_eq!(m.accuracy(), 1.0);
    }

    #[test]
    fn zero_denominators_fall_back_to_zero() {
        let m = ConfusionMatrix::from_pairs([(0, 0), (0, 0)]);
        assert_eq!(m.precision(), 0.0);
        assert_eq!(m.recall(), 0.0);
        assert_eq!(m.f1_score(), 0.0);
        assert_eq!(m.matthews_correlation(), 0.0);
        assert_eq!(ConfusionMatrix::default().accuracy(), 0.0);
    }
}
