//! ListenerRegistry: push delivery of recomputed metrics.

use std::sync::{Arc, RwLock};

use tracing::warn;

use modelguard_core::models::ModelMetrics;
use modelguard_core::traits::IMetricsListener;

/// Registered metrics listeners.
///
/// Delivery is synchronous on the inserting thread. A listener that panics is
/// logged and skipped; the remaining listeners still receive the notification.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<Arc<dyn IMetricsListener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Arc<dyn IMetricsListener>) {
        match self.listeners.write() {
            Ok(mut listeners) => listeners.push(listener),
            Err(poisoned) => poisoned.into_inner().push(listener),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn emit_metrics(&self, metrics: &ModelMetrics) {
        self.emit(|l| l.on_metrics_updated(metrics));
    }

    pub fn emit_evicted(&self, model_id: &str, window_len: usize) {
        self.emit(|l| l.on_record_evicted(model_id, window_len));
    }

    fn snapshot(&self) -> Vec<Arc<dyn IMetricsListener>> {
        match self.listeners.read() {
            Ok(listeners) => listeners.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn emit<F: Fn(&dyn IMetricsListener)>(&self, f: F) {
        // Cloned out so listeners may register further listeners without deadlocking.
        for listener in self.snapshot() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(listener.as_ref());
            }));
            if result.is_err() {
                warn!("metrics listener panicked; continuing with remaining listeners");
            }
        }
    }
}
