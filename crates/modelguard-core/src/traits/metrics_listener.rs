use crate::models::ModelMetrics;

/// Push notification for recomputed accuracy metrics.
///
/// All methods have no-op defaults so listeners implement only what they need.
pub trait IMetricsListener: Send + Sync {
    fn on_metrics_updated(&self, _metrics: &ModelMetrics) {}

    fn on_record_evicted(&self, _model_id: &str, _window_len: usize) {}
}
