//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports: the crate ships
//! a `tracing`-backed sink, a system clock and a DashMap counter store, plus
//! controllable mocks for tests.

use crate::domain::owner::Owner;
use crate::domain::severity::Severity;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Error surfaced by a sink write.
///
/// Sink errors never propagate past the emission boundary; the channel logger
/// swallows them and counts them on [`Metrics`](crate::Metrics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The transport rejected or failed the write.
    Write(String),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Write(reason) => write!(f, "sink write failed: {}", reason),
        }
    }
}

impl std::error::Error for SinkError {}

/// Port for the external log destination.
///
/// The core decides *what* to write and *how often*; where bytes land
/// (file, console, message channel) is the adapter's concern. Audit records
/// are routed by sink name to a channel distinct from the owner's normal
/// severity sink.
pub trait Sink: Send + Sync + Debug {
    /// Write a rendered line for an owner at a severity.
    fn write(&self, severity: Severity, owner: &Owner, text: &str) -> Result<(), SinkError>;

    /// Write a serialized record to a named sink, tagged with a severity.
    fn write_named(&self, sink_name: &str, severity: Severity, text: &str)
        -> Result<(), SinkError>;

    /// Whether the sink currently emits at this severity for this owner.
    ///
    /// Callers use this to avoid constructing expensive arguments when the
    /// severity is disabled.
    fn enabled(&self, _severity: Severity, _owner: &Owner) -> bool {
        true
    }

    /// Notification that a logger handle has been bound to this sink.
    ///
    /// Invoked exactly once per cached (severity, owner) pair. The default
    /// does nothing; counting stubs use it to verify cache deduplication.
    fn bind(&self, _severity: Severity, _owner: &Owner) {}
}

/// Port for obtaining the current wall-clock time.
///
/// Audit records carry a wall-clock `datetime` field, so unlike a monotonic
/// clock this one must be meaningful across processes. Infrastructure
/// provides `SystemClock` for production and `FixedClock` for tests.
pub trait Clock: Send + Sync + Debug {
    /// Get the current UTC time.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Key identifying one throttle counter: an owner/template pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThrottleKey {
    /// Owner identity the events belong to.
    pub owner: Owner,
    /// Template name of the accumulated event.
    pub template: &'static str,
}

impl ThrottleKey {
    /// Create a key for an owner/template pair.
    pub fn new(owner: Owner, template: &'static str) -> Self {
        ThrottleKey { owner, template }
    }
}

/// Port for concurrent throttle counters.
///
/// The single operation the throttle needs is increment-compare-delete as one
/// atomic step per key; exposing it as a port keeps that atomicity requirement
/// in one place and lets tests substitute instrumented stores.
pub trait CounterStore: Send + Sync + Debug {
    /// Atomically increment the counter for `key`, creating it at zero if
    /// absent. Returns `true` and deletes the counter when the post-increment
    /// count reaches `threshold` (the next event starts a fresh cycle);
    /// returns `false` otherwise.
    ///
    /// Thresholds 0 and 1 trip on every call and never materialize a counter.
    fn increment_and_trip(&self, key: ThrottleKey, threshold: u32) -> bool;

    /// Current count for a key, if a counter exists.
    fn count(&self, key: &ThrottleKey) -> Option<u32>;

    /// Number of live counters.
    fn len(&self) -> usize;

    /// Whether no counters are live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all counters.
    fn clear(&self);
}

// Allow Arc-wrapped stores (including Arc<dyn CounterStore>) to be used
// directly wherever a store is expected
impl<T: CounterStore + ?Sized> CounterStore for std::sync::Arc<T> {
    fn increment_and_trip(&self, key: ThrottleKey, threshold: u32) -> bool {
        (**self).increment_and_trip(key, threshold)
    }

    fn count(&self, key: &ThrottleKey) -> Option<u32> {
        (**self).count(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&self) {
        (**self).clear()
    }
}
