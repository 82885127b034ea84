//! Per-model rolling window and accuracy snapshot history.

use std::collections::VecDeque;

use modelguard_core::constants::MAX_ACCURACY_SNAPSHOTS;
use modelguard_core::models::{AccuracySnapshot, ModelMetrics, PredictionRecord};

#[derive(Debug, Clone)]
pub struct ModelWindow {
    capacity: usize,
    records: VecDeque<PredictionRecord>,
    snapshots: VecDeque<AccuracySnapshot>,
    latest: Option<ModelMetrics>,
    total_recorded: usize,
}

impl ModelWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
            snapshots: VecDeque::with_capacity(MAX_ACCURACY_SNAPSHOTS),
            latest: None,
            total_recorded: 0,
        }
    }

    /// Append a record, evicting the oldest when full. Returns whether one was evicted.
    pub fn push(&mut self, record: PredictionRecord) -> bool {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front();
            true
        } else {
            false
        };
        self.records.push_back(record);
        self.total_recorded += 1;
        evicted
    }

    /// Replace the latest metrics and record an accuracy snapshot.
    pub fn publish(&mut self, metrics: ModelMetrics) {
        if self.snapshots.len() == MAX_ACCURACY_SNAPSHOTS {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(AccuracySnapshot {
            timestamp: metrics.updated_at,
            accuracy: metrics.accuracy,
            sample_count: metrics.sample_count,
        });
        self.latest = Some(metrics);
    }

    pub fn records(&self) -> &VecDeque<PredictionRecord> {
        &self.records
    }

    pub fn snapshots(&self) -> &VecDeque<AccuracySnapshot> {
        &self.snapshots
    }

    pub fn latest(&self) -> Option<&ModelMetrics> {
        self.latest.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Predictions ever recorded, including evicted ones.
    pub fn total_recorded(&self) -> usize {
        self.total_recorded
    }
}
