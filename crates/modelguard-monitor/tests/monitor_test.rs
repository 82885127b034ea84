//! AccuracyMonitor behavior over prediction streams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use modelguard_core::config::MonitorConfig;
use modelguard_core::errors::MonitorError;
use modelguard_core::models::{AccuracyTrend, ModelMetrics, PredictionRecord};
use modelguard_core::traits::IMetricsListener;
use modelguard_monitor::AccuracyMonitor;
use test_fixtures::{eighty_percent_stream, stream_with};

fn feed(monitor: &AccuracyMonitor, records: Vec<PredictionRecord>) -> ModelMetrics {
    let mut last = None;
    for r in records {
        last = Some(monitor.record_prediction(r).unwrap());
    }
    last.unwrap()
}

fn small(capacity: usize) -> AccuracyMonitor {
    AccuracyMonitor::new(MonitorConfig {
        window_capacity: capacity,
        ..Default::default()
    })
}

// ── Metrics ──────────────────────────────────────────────────────────────

#[test]
fn eighty_percent_stream_reports_exact_accuracy() {
    let monitor = AccuracyMonitor::default();
    let metrics = feed(&monitor, eighty_percent_stream("m", 100));

    assert!((metrics.accuracy - 0.8).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&metrics.roc_auc));
    assert!((0.0..=1.0).contains(&metrics.pr_auc));
    assert!(metrics.roc_auc > 0.5);
    assert_eq!(metrics.sample_count, 100);
    assert_eq!(metrics.confusion.total(), 100);
    assert!(metrics.expected_calibration_error > 0.0);
    assert!(metrics.expected_calibration_error < 1.0);
    assert!(metrics.accuracy_drift.abs() < 1e-12);
    assert_eq!(monitor.current_metrics("m").unwrap(), Some(metrics));
}

#[test]
fn multiclass_counts_still_sum_to_window() {
    let monitor = AccuracyMonitor::default();
    let records: Vec<PredictionRecord> = (0..30u32)
        .map(|i| PredictionRecord::new("mc", i % 3, (i / 2) % 3, 0.6, Vec::new()))
        .collect();
    let metrics = feed(&monitor, records.clone());

    let correct = records.iter().filter(|r| r.is_correct).count();
    assert_eq!(metrics.confusion.total(), 30);
    assert!((metrics.accuracy - correct as f64 / 30.0).abs() < 1e-12);
    assert_eq!(metrics.roc_auc, 0.5);
    assert_eq!(metrics.pr_auc, 0.0);
}

#[test]
fn degrading_window_reports_positive_accuracy_drift() {
    let monitor = AccuracyMonitor::default();
    let metrics = feed(&monitor, stream_with("m", 100, |i| i < 50 || i % 2 == 0));
    assert!((metrics.accuracy_drift - 0.5).abs() < 1e-12);
}

#[test]
fn invalid_confidence_is_rejected() {
    let monitor = AccuracyMonitor::default();
    for confidence in [1.5, -0.1, f64::NAN] {
        let err = monitor
            .record_prediction(PredictionRecord::new("m", 1, 1, confidence, Vec::new()))
            .unwrap_err();
        assert!(matches!(err, MonitorError::InvalidConfidence { .. }));
    }
    assert_eq!(monitor.window_len("m").unwrap(), 0);
}

// ── Window ───────────────────────────────────────────────────────────────

#[test]
fn window_is_capped_at_capacity_fifo() {
    let monitor = AccuracyMonitor::default();
    // First 200 wrong, the remaining 1000 correct: once the wrong ones are evicted
    // the window is perfect.
    let metrics = feed(&monitor, stream_with("m", 1200, |i| i >= 200));

    assert_eq!(monitor.window_len("m").unwrap(), 1000);
    assert_eq!(metrics.sample_count, 1000);
    assert_eq!(metrics.accuracy, 1.0);
    let summary = monitor.summary("m").unwrap().unwrap();
    assert_eq!(summary.prediction_count, 1200);
}

#[test]
fn snapshot_history_is_bounded() {
    let monitor = AccuracyMonitor::default();
    feed(&monitor, eighty_percent_stream("m", 250));
    assert_eq!(monitor.snapshots("m").unwrap().len(), 100);
}

#[test]
fn concurrent_producers_are_serialized() {
    let monitor = Arc::new(AccuracyMonitor::default());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let monitor = Arc::clone(&monitor);
            thread::spawn(move || {
                for i in 0..200 {
                    let model = if t % 2 == 0 { "shared" } else { "other" };
                    let record = PredictionRecord::new(model, 1, (i % 2) as u32, 0.7, Vec::new());
                    let metrics = monitor.record_prediction(record).unwrap();
                    assert_eq!(metrics.confusion.total() as usize, metrics.sample_count);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(monitor.models(), vec!["other".to_string(), "shared".to_string()]);
    assert_eq!(monitor.window_len("shared").unwrap(), 800);
    assert_eq!(monitor.window_len("other").unwrap(), 800);
    let metrics = monitor.current_metrics("shared").unwrap().unwrap();
    assert!((metrics.accuracy - 0.5).abs() < 1e-12);
}

#[test]
fn reset_forgets_a_model() {
    let monitor = AccuracyMonitor::default();
    feed(&monitor, eighty_percent_stream("a", 10));
    feed(&monitor, eighty_percent_stream("b", 10));

    assert!(monitor.reset("a"));
    assert!(!monitor.reset("a"));
    assert_eq!(monitor.models(), vec!["b".to_string()]);
    assert_eq!(monitor.current_metrics("a").unwrap(), None);
    assert_eq!(monitor.window_len("a").unwrap(), 0);
}

// ── Trend and summary ────────────────────────────────────────────────────

#[test]
fn trend_needs_twenty_snapshots() {
    let monitor = AccuracyMonitor::default();
    feed(&monitor, eighty_percent_stream("m", 19));
    assert_eq!(monitor.accuracy_trend("m").unwrap(), AccuracyTrend::InsufficientData);
    assert_eq!(
        monitor.accuracy_trend("unknown").unwrap(),
        AccuracyTrend::InsufficientData
    );
}

#[test]
fn trend_detects_degradation_and_improvement() {
    let monitor = AccuracyMonitor::default();
    feed(&monitor, stream_with("down", 20, |i| i < 10));
    assert_eq!(monitor.accuracy_trend("down").unwrap(), AccuracyTrend::Degrading);

    feed(&monitor, stream_with("up", 20, |i| i >= 10));
    assert_eq!(monitor.accuracy_trend("up").unwrap(), AccuracyTrend::Improving);

    feed(&monitor, stream_with("flat", 40, |_| true));
    assert_eq!(monitor.accuracy_trend("flat").unwrap(), AccuracyTrend::Stable);
}

#[test]
fn summary_covers_snapshot_history() {
    let monitor = AccuracyMonitor::default();
    feed(&monitor, stream_with("m", 4, |i| i != 1));
    // Snapshots: 1.0, 0.5, 2/3, 0.75.
    let s = monitor.summary("m").unwrap().unwrap();
    assert_eq!(s.current_accuracy, 0.75);
    assert_eq!(s.min_accuracy, 0.5);
    assert_eq!(s.max_accuracy, 1.0);
    let avg = (1.0 + 0.5 + 2.0 / 3.0 + 0.75) / 4.0;
    assert!((s.avg_accuracy - avg).abs() < 1e-12);
    assert!(s.std_dev > 0.0);
    assert_eq!(s.prediction_count, 4);
    assert_eq!(s.trend, AccuracyTrend::InsufficientData);
    assert!(monitor.summary("none").unwrap().is_none());
}

// ── Listeners ────────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    updates: Mutex<Vec<f64>>,
    evictions: AtomicUsize,
}

impl IMetricsListener for Recorder {
    fn on_metrics_updated(&self, metrics: &ModelMetrics) {
        self.updates.lock().unwrap().push(metrics.accuracy);
    }

    fn on_record_evicted(&self, _model_id: &str, window_len: usize) {
        assert_eq!(window_len, 5);
        self.evictions.fetch_add(1, Ordering::SeqCst);
    }
}

struct Exploding;

impl IMetricsListener for Exploding {
    fn on_metrics_updated(&self, _metrics: &ModelMetrics) {
        panic!("listener bug");
    }
}

#[test]
fn listeners_receive_every_update_and_eviction() {
    let monitor = small(5);
    let recorder = Arc::new(Recorder::default());
    monitor.register_listener(Arc::new(Exploding));
    monitor.register_listener(recorder.clone());

    feed(&monitor, eighty_percent_stream("m", 8));

    assert_eq!(recorder.updates.lock().unwrap().len(), 8);
    assert_eq!(recorder.evictions.load(Ordering::SeqCst), 3);
    assert_eq!(monitor.window_len("m").unwrap(), 5);
}

#[derive(Default)]
struct SequenceRecorder {
    sequences: Mutex<Vec<usize>>,
}

impl IMetricsListener for SequenceRecorder {
    fn on_metrics_updated(&self, metrics: &ModelMetrics) {
        self.sequences.lock().unwrap().push(metrics.sequence);
    }
}

#[test]
fn sequence_keeps_counting_past_eviction() {
    let monitor = small(5);
    let recorder = Arc::new(SequenceRecorder::default());
    monitor.register_listener(recorder.clone());

    let last = feed(&monitor, eighty_percent_stream("m", 8));

    assert_eq!(last.sequence, 8);
    assert_eq!(last.sample_count, 5);
    assert_eq!(*recorder.sequences.lock().unwrap(), (1..=8).collect::<Vec<_>>());
}

#[test]
fn concurrent_pushes_carry_distinct_sequences() {
    let monitor = Arc::new(AccuracyMonitor::default());
    let recorder = Arc::new(SequenceRecorder::default());
    monitor.register_listener(recorder.clone());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let monitor = Arc::clone(&monitor);
            thread::spawn(move || {
                for r in eighty_percent_stream("shared", 50) {
                    monitor.record_prediction(r).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let mut seen = recorder.sequences.lock().unwrap().clone();
    seen.sort_unstable();
    assert_eq!(seen, (1..=200).collect::<Vec<_>>());
    let latest = monitor.current_metrics("shared").unwrap().unwrap();
    assert_eq!(latest.sequence, 200);
}

#[test]
fn correctness_comes_from_classes_not_flag() {
    let monitor = AccuracyMonitor::default();
    let mut hit = PredictionRecord::new("flag", 1, 1, 1.0, Vec::new());
    hit.is_correct = false;
    let mut miss = PredictionRecord::new("flag", 1, 0, 0.0, Vec::new());
    miss.is_correct = true;

    let metrics = feed(&monitor, vec![hit, miss]);

    assert!((metrics.accuracy - 0.5).abs() < 1e-12);
    assert!(metrics.expected_calibration_error.abs() < 1e-12);
    // Older half hit, newer half missed.
    assert!((metrics.accuracy_drift - 1.0).abs() < 1e-12);
    let stored = monitor.summary("flag").unwrap().unwrap();
    assert!((stored.current_accuracy - 0.5).abs() < 1e-12);
}
