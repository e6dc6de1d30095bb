//! Self-observability counters for the logging core.
//!
//! Logging failures are invisible to callers by design (nothing here ever
//! throws into business logic); these counters are the compensating
//! observability for the swallow-at-boundary policy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters tracking emission and suppression activity.
///
/// All counters use atomic operations for thread-safe updates and reads.
/// Cloning is cheap and clones share the same underlying counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Lines and audit records successfully handed to a sink
    emitted: AtomicU64,
    /// Accumulation events suppressed by the throttle
    suppressed: AtomicU64,
    /// Writes swallowed because the sink or serialization failed
    sink_errors: AtomicU64,
    /// Tripped emissions dropped because the worker queue was full
    queue_drops: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                emitted: AtomicU64::new(0),
                suppressed: AtomicU64::new(0),
                sink_errors: AtomicU64::new(0),
                queue_drops: AtomicU64::new(0),
            }),
        }
    }

    /// Record a successful emission.
    pub(crate) fn record_emitted(&self) {
        self.inner.emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a throttle suppression.
    pub(crate) fn record_suppressed(&self) {
        self.inner.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a swallowed sink or serialization failure.
    pub(crate) fn record_sink_error(&self) {
        self.inner.sink_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a tripped emission dropped at the worker queue.
    #[cfg(feature = "async")]
    pub(crate) fn record_queue_drop(&self) {
        self.inner.queue_drops.fetch_add(1, Ordering::Relaxed);
    }

    /// Total emissions handed to a sink.
    pub fn emitted(&self) -> u64 {
        self.inner.emitted.load(Ordering::Relaxed)
    }

    /// Total accumulation events suppressed.
    pub fn suppressed(&self) -> u64 {
        self.inner.suppressed.load(Ordering::Relaxed)
    }

    /// Total swallowed sink failures.
    pub fn sink_errors(&self) -> u64 {
        self.inner.sink_errors.load(Ordering::Relaxed)
    }

    /// Total emissions dropped at the worker queue.
    pub fn queue_drops(&self) -> u64 {
        self.inner.queue_drops.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            emitted: self.emitted(),
            suppressed: self.suppressed(),
            sink_errors: self.sink_errors(),
            queue_drops: self.queue_drops(),
        }
    }

    /// Reset all counters to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.emitted.store(0, Ordering::Relaxed);
        self.inner.suppressed.store(0, Ordering::Relaxed);
        self.inner.sink_errors.store(0, Ordering::Relaxed);
        self.inner.queue_drops.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Lines and audit records successfully handed to a sink
    pub emitted: u64,
    /// Accumulation events suppressed by the throttle
    pub suppressed: u64,
    /// Writes swallowed because the sink or serialization failed
    pub sink_errors: u64,
    /// Tripped emissions dropped because the worker queue was full
    pub queue_drops: u64,
}

impl MetricsSnapshot {
    /// Total accumulation events processed (emitted + suppressed).
    pub fn total_events(&self) -> u64 {
        self.emitted.saturating_add(self.suppressed)
    }

    /// Ratio of suppressed events to total events (0.0 to 1.0).
    ///
    /// Returns 0.0 if no events have been processed.
    pub fn suppression_rate(&self) -> f64 {
        let total = self.total_events();
        if total == 0 {
            0.0
        } else {
            self.suppressed as f64 / total as f64
        }
    }
}
