//! StatisticalTestSuite: runs PSI and KS on one feature column pair.

use modelguard_core::config::DetectionConfig;
use modelguard_core::models::{DistributionShift, StatisticalTestResult};

use crate::stats::{distribution_shift, finite_sorted, ks_p_value, ks_statistic, psi};

/// Everything the suite measured for one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureComparison {
    pub feature_name: String,
    pub feature_index: usize,
    pub psi_score: f64,
    pub ks_statistic: f64,
    pub p_value: f64,
    pub psi_test: StatisticalTestResult,
    pub ks_test: StatisticalTestResult,
    pub distribution_shift: DistributionShift,
    /// Non-finite values removed from both columns.
    pub corrupted_values: usize,
    /// Values inspected across both columns, including corrupted ones.
    pub total_values: usize,
}

impl FeatureComparison {
    /// Fraction of inspected values that were non-finite.
    pub fn corrupted_fraction(&self) -> f64 {
        if self.total_values == 0 {
            0.0
        } else {
            self.corrupted_values as f64 / self.total_values as f64
        }
    }
}

/// Per-feature distribution tests with fixed PSI binning and thresholds.
#[derive(Debug, Clone)]
pub struct StatisticalTestSuite {
    psi_bins: usize,
    psi_threshold: f64,
    ks_threshold: f64,
}

impl StatisticalTestSuite {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            psi_bins: config.psi_bins,
            psi_threshold: config.psi_threshold,
            ks_threshold: config.ks_threshold,
        }
    }

    pub fn psi_bins(&self) -> usize {
        self.psi_bins
    }

    /// Compare one feature's reference and current columns.
    ///
    /// Non-finite values are excluded and counted. When either cleaned column has
    /// fewer than 2 points the comparison is neutral (PSI 0, KS 0, p-value 1, passed).
    pub fn compare(
        &self,
        feature_name: &str,
        feature_index: usize,
        reference: &[f64],
        current: &[f64],
    ) -> FeatureComparison {
        let (ref_sorted, ref_bad) = finite_sorted(reference);
        let (cur_sorted, cur_bad) = finite_sorted(current);
        let corrupted_values = ref_bad + cur_bad;
        let total_values = reference.len() + current.len();

        let (psi_score, ks_stat, p_value, shift) = if ref_sorted.len() < 2 || cur_sorted.len() < 2
        {
            (0.0, 0.0, 1.0, DistributionShift::default())
        } else {
            let d = ks_statistic(&ref_sorted, &cur_sorted);
            (
                psi(&ref_sorted, &cur_sorted, self.psi_bins),
                d,
                ks_p_value(d, ref_sorted.len(), cur_sorted.len()),
                distribution_shift(&ref_sorted, &cur_sorted),
            )
        };

        let psi_passed = psi_score <= self.psi_threshold;
        let psi_test = StatisticalTestResult {
            test_name: format!("psi:{feature_name}"),
            statistic: psi_score,
            p_value: if psi_passed { 1.0 } else { 0.0 },
            threshold: self.psi_threshold,
            is_passed: psi_passed,
        };
        let ks_test = StatisticalTestResult {
            test_name: format!("ks:{feature_name}"),
            statistic: ks_stat,
            p_value,
            threshold: self.ks_threshold,
            is_passed: p_value > self.ks_threshold,
        };

        FeatureComparison {
            feature_name: feature_name.to_string(),
            feature_index,
            psi_score,
            ks_statistic: ks_stat,
            p_value,
            psi_test,
            ks_test,
            distribution_shift: shift,
            corrupted_values,
            total_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite() -> StatisticalTestSuite {
        StatisticalTestSuite::new(&DetectionConfig::default())
    }

    #[test]
    fn tiny_batches_are_neutral() {
        let c = suite().compare("x", 0, &[1.0], &[5.0, 6.0]);
        assert_eq!(c.psi_score, 0.0);
        assert_eq!(c.ks_statistic, 0.0);
        assert_eq!(c.p_value, 1.0);
        assert!(c.ks_test.is_passed);
        assert!(c.psi_test.is_passed);
    }

    #[test]
    fn non_finite_values_are_counted_not_propagated() {
        let reference: Vec<f64> = (0..100).map(f64::from).collect();
        let mut current = reference.clone();
        current[3] = f64::NAN;
        current[7] = f64::NEG_INFINITY;
        let c = suite().compare("x", 0, &reference, &current);
        assert_eq!(c.corrupted_values, 2);
        assert_eq!(c.total_values, 200);
        assert!(c.psi_score.is_finite());
        assert!(c.ks_statistic.is_finite());
        assert!((c.corrupted_fraction() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn ks_pass_rule_uses_significance_level() {
        let a: Vec<f64> = (0..200).map(f64::from).collect();
        let b: Vec<f64> = (100..300).map(f64::from).collect();
        let c = suite().compare("x", 0, &a, &b);
        assert!(c.p_value <= 0.05);
        assert!(!c.ks_test.is_passed);
        assert_eq!(c.ks_test.test_name, "ks:x");
    }
}
