//! AccuracyMonitor: per-model rolling windows with metrics recomputed on insert.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use modelguard_core::config::MonitorConfig;
use modelguard_core::errors::MonitorError;
use modelguard_core::models::{
    AccuracySnapshot, AccuracySummary, AccuracyTrend, ConfusionMatrix, ModelMetrics,
    PredictionRecord,
};
use modelguard_core::traits::IMetricsListener;
use modelguard_core::tracing_setup::events;

use crate::calibration::expected_calibration_error;
use crate::curves::{pr_auc, roc_auc};
use crate::listener::ListenerRegistry;
use crate::trend::{accuracy_drift, accuracy_trend};
use crate::window::ModelWindow;

/// Rolling-window accuracy monitor shared across producer threads.
pub struct AccuracyMonitor {
    config: MonitorConfig,
    windows: DashMap<String, Arc<Mutex<ModelWindow>>>,
    listeners: ListenerRegistry,
}

impl AccuracyMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn register_listener(&self, listener: Arc<dyn IMetricsListener>) {
        self.listeners.register(listener);
    }

    /// Append a prediction and return the model's recomputed metrics.
    ///
    /// Listeners are notified after the window lock is released, so concurrent
    /// inserts for one model may reach a listener out of order; compare
    /// [`ModelMetrics::sequence`] to discard stale pushes.
    pub fn record_prediction(
        &self,
        mut record: PredictionRecord,
    ) -> Result<ModelMetrics, MonitorError> {
        if !(0.0..=1.0).contains(&record.confidence) {
            return Err(MonitorError::InvalidConfidence {
                confidence: record.confidence,
            });
        }
        record.is_correct = record.is_hit();
        let model_id = record.model_id.clone();
        let span = modelguard_core::accuracy_update_span!(model_id);
        let _guard = span.enter();

        let window = self.window_for(&model_id);
        let (metrics, evicted_len) = {
            let mut w = lock(&window, &model_id)?;
            let evicted = w.push(record);
            let metrics = self.compute(&model_id, &w);
            w.publish(metrics.clone());
            (metrics, evicted.then(|| w.len()))
        };

        if let Some(len) = evicted_len {
            events::window_evicted(&model_id, len);
            self.listeners.emit_evicted(&model_id, len);
        }
        self.listeners.emit_metrics(&metrics);
        debug!(accuracy = metrics.accuracy, samples = metrics.sample_count, "metrics updated");
        Ok(metrics)
    }

    /// Latest metrics for `model_id`, `None` before its first prediction.
    pub fn current_metrics(&self, model_id: &str) -> Result<Option<ModelMetrics>, MonitorError> {
        self.read(model_id, |w| w.latest().cloned())
            .map(Option::flatten)
    }

    /// Last 10 vs previous 10 accuracy snapshots (per `trend_window`).
    pub fn accuracy_trend(&self, model_id: &str) -> Result<AccuracyTrend, MonitorError> {
        Ok(self
            .read(model_id, |w| {
                accuracy_trend(w.snapshots(), self.config.trend_window, self.config.trend_band)
            })?
            .unwrap_or(AccuracyTrend::InsufficientData))
    }

    /// Snapshot history, oldest first.
    pub fn snapshots(&self, model_id: &str) -> Result<Vec<AccuracySnapshot>, MonitorError> {
        Ok(self
            .read(model_id, |w| w.snapshots().iter().copied().collect())?
            .unwrap_or_default())
    }

    /// Current accuracy, trend, and min/avg/max/std over the snapshot history.
    /// `prediction_count` counts every prediction recorded, including evicted ones.
    pub fn summary(&self, model_id: &str) -> Result<Option<AccuracySummary>, MonitorError> {
        let summary = self.read(model_id, |w| {
            let latest = w.latest()?;
            let values: Vec<f64> = w.snapshots().iter().map(|s| s.accuracy).collect();
            let n = values.len() as f64;
            let avg = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;
            Some(AccuracySummary {
                model_id: model_id.to_string(),
                current_accuracy: latest.accuracy,
                trend: accuracy_trend(
                    w.snapshots(),
                    self.config.trend_window,
                    self.config.trend_band,
                ),
                prediction_count: w.total_recorded(),
                min_accuracy: values.iter().copied().fold(f64::INFINITY, f64::min),
                avg_accuracy: avg,
                max_accuracy: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                std_dev: variance.sqrt(),
            })
        })?;
        Ok(summary.flatten())
    }

    /// Drop a model's window. Returns whether it existed.
    pub fn reset(&self, model_id: &str) -> bool {
        self.windows.remove(model_id).is_some()
    }

    /// Monitored model ids, sorted.
    pub fn models(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.windows.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Records currently held for `model_id`.
    pub fn window_len(&self, model_id: &str) -> Result<usize, MonitorError> {
        Ok(self.read(model_id, ModelWindow::len)?.unwrap_or(0))
    }

    fn window_for(&self, model_id: &str) -> Arc<Mutex<ModelWindow>> {
        // Clone the Arc out so the shard lock is not held while the window is locked.
        self.windows
            .entry(model_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ModelWindow::new(self.config.window_capacity))))
            .clone()
    }

    fn read<T>(
        &self,
        model_id: &str,
        f: impl FnOnce(&ModelWindow) -> T,
    ) -> Result<Option<T>, MonitorError> {
        let Some(window) = self.windows.get(model_id).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        let w = lock(&window, model_id)?;
        Ok(Some(f(&w)))
    }

    fn compute(&self, model_id: &str, w: &ModelWindow) -> ModelMetrics {
        let records = w.records();
        let confusion = ConfusionMatrix::from_pairs(
            records.iter().map(|r| (r.predicted_class, r.actual_class)),
        );
        ModelMetrics {
            model_id: model_id.to_string(),
            sequence: w.total_recorded(),
            sample_count: records.len(),
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1_score: confusion.f1_score(),
            matthews_correlation: confusion.matthews_correlation(),
            expected_calibration_error: expected_calibration_error(
                records,
                self.config.calibration_bins,
            ),
            accuracy_drift: accuracy_drift(records),
            roc_auc: roc_auc(records),
            pr_auc: pr_auc(records),
            confusion,
            updated_at: Utc::now(),
        }
    }
}

impl Default for AccuracyMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

fn lock<'a>(
    window: &'a Mutex<ModelWindow>,
    model_id: &str,
) -> Result<MutexGuard<'a, ModelWindow>, MonitorError> {
    window.lock().map_err(|_| MonitorError::LockPoisoned {
        model_id: model_id.to_string(),
    })
}
