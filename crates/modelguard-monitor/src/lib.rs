//! # modelguard-monitor
//!
//! Live accuracy monitoring from (prediction, ground truth) pairs.
//!
//! Each model owns a bounded FIFO window guarded by its own mutex; insertions for
//! one model are serialized, different models proceed in parallel. Every insertion
//! recomputes the model's [`ModelMetrics`](modelguard_core::models::ModelMetrics)
//! from the whole window and pushes them to registered listeners.

pub mod calibration;
pub mod curves;
pub mod listener;
pub mod monitor;
pub mod trend;
pub mod window;

pub use listener::ListenerRegistry;
pub use monitor::AccuracyMonitor;
