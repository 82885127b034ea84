//! Property tests for window metrics.

use modelguard_core::config::MonitorConfig;
use modelguard_core::models::PredictionRecord;
use modelguard_monitor::AccuracyMonitor;
use proptest::prelude::*;

fn arb_record() -> impl Strategy<Value = PredictionRecord> {
    (0u32..3, 0u32..3, 0.0f64..=1.0)
        .prop_map(|(p, a, c)| PredictionRecord::new("m", p, a, c, Vec::new()))
}

proptest! {
    #[test]
    fn prop_counts_sum_to_window(records in prop::collection::vec(arb_record(), 1..80), capacity in 1usize..40) {
        let monitor = AccuracyMonitor::new(MonitorConfig { window_capacity: capacity, ..Default::default() });
        for r in records {
            let m = monitor.record_prediction(r).unwrap();
            prop_assert_eq!(m.confusion.total() as usize, m.sample_count);
            prop_assert!(m.sample_count <= capacity);
            prop_assert!((0.0..=1.0).contains(&m.accuracy));
            prop_assert!((0.0..=1.0).contains(&m.roc_auc));
            prop_assert!((0.0..=1.0).contains(&m.pr_auc));
            prop_assert!((0.0..=1.0).contains(&m.expected_calibration_error));
            prop_assert!((-1.0..=1.0).contains(&m.matthews_correlation));
        }
    }
}
