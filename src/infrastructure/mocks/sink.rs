//! Mock sink for testing.

use crate::application::ports::{Sink, SinkError};
use crate::domain::owner::Owner;
use crate::domain::severity::Severity;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Captured write information.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CapturedWrite {
    /// Severity the write was tagged with.
    pub severity: Severity,
    /// Owner identity, or the audit target for named writes.
    pub owner: String,
    /// Sink name for audit-mode writes, `None` for template-mode writes.
    pub sink_name: Option<String>,
    /// Rendered or serialized text.
    pub text: String,
}

/// Mock sink that captures writes and counts handle bindings.
///
/// Clones share the same captured state, so a clone can be handed to the
/// code under test while the original asserts on what was written. Failure
/// injection and per-severity enablement make the swallow-and-count and
/// `is_debug_enabled` contracts testable.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    inner: Arc<CaptureInner>,
}

#[derive(Debug, Default)]
struct CaptureInner {
    captured: Mutex<Vec<CapturedWrite>>,
    binds: AtomicUsize,
    fail_writes: AtomicBool,
    disabled: Mutex<HashMap<Severity, bool>>,
}

impl CaptureSink {
    /// Create a new capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured writes.
    pub fn captured(&self) -> Vec<CapturedWrite> {
        self.inner
            .captured
            .lock()
            .expect("CaptureSink mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    /// Get the count of captured writes.
    pub fn count(&self) -> usize {
        self.inner
            .captured
            .lock()
            .expect("CaptureSink mutex poisoned - a test thread panicked while holding the lock")
            .len()
    }

    /// Clear all captured writes.
    pub fn clear(&self) {
        self.inner
            .captured
            .lock()
            .expect("CaptureSink mutex poisoned - a test thread panicked while holding the lock")
            .clear();
    }

    /// Number of logger handles bound to this sink.
    ///
    /// Each cached (severity, owner) pair binds exactly once; this counter
    /// verifies cache deduplication under concurrent first access.
    pub fn bind_count(&self) -> usize {
        self.inner.binds.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Toggle enablement for a severity; everything is enabled by default.
    pub fn set_enabled(&self, severity: Severity, enabled: bool) {
        self.inner
            .disabled
            .lock()
            .expect("CaptureSink mutex poisoned - a test thread panicked while holding the lock")
            .insert(severity, !enabled);
    }

    fn push(&self, write: CapturedWrite) -> Result<(), SinkError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(SinkError::Write("injected failure".to_string()));
        }
        self.inner
            .captured
            .lock()
            .expect("CaptureSink mutex poisoned - a test thread panicked while holding the lock")
            .push(write);
        Ok(())
    }
}

impl Sink for CaptureSink {
    fn write(&self, severity: Severity, owner: &Owner, text: &str) -> Result<(), SinkError> {
        self.push(CapturedWrite {
            severity,
            owner: owner.to_string(),
            sink_name: None,
            text: text.to_string(),
        })
    }

    fn write_named(
        &self,
        sink_name: &str,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError> {
        self.push(CapturedWrite {
            severity,
            owner: String::new(),
            sink_name: Some(sink_name.to_string()),
            text: text.to_string(),
        })
    }

    fn enabled(&self, severity: Severity, _owner: &Owner) -> bool {
        !self
            .inner
            .disabled
            .lock()
            .expect("CaptureSink mutex poisoned - a test thread panicked while holding the lock")
            .get(&severity)
            .copied()
            .unwrap_or(false)
    }

    fn bind(&self, _severity: Severity, _owner: &Owner) {
        self.inner.binds.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_clear() {
        let sink = CaptureSink::new();
        let owner = Owner::named("tests::mock");

        sink.write(Severity::Info, &owner, "hello").unwrap();
        sink.write_named("audit", Severity::Warn, "{}").unwrap();

        assert_eq!(sink.count(), 2);
        let events = sink.captured();
        assert_eq!(events[0].owner, "tests::mock");
        assert_eq!(events[1].sink_name.as_deref(), Some("audit"));

        sink.clear();
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_failure_injection() {
        let sink = CaptureSink::new();
        let owner = Owner::named("tests::mock");

        sink.fail_writes(true);
        assert!(sink.write(Severity::Info, &owner, "dropped").is_err());
        assert_eq!(sink.count(), 0);

        sink.fail_writes(false);
        assert!(sink.write(Severity::Info, &owner, "kept").is_ok());
        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn test_enablement_toggle() {
        let sink = CaptureSink::new();
        let owner = Owner::named("tests::mock");

        assert!(sink.enabled(Severity::Debug, &owner));
        sink.set_enabled(Severity::Debug, false);
        assert!(!sink.enabled(Severity::Debug, &owner));
        assert!(sink.enabled(Severity::Info, &owner));
    }

    #[test]
    fn test_clones_share_state() {
        let sink = CaptureSink::new();
        let clone = sink.clone();
        let owner = Owner::named("tests::mock");

        clone.write(Severity::Info, &owner, "shared").unwrap();
        assert_eq!(sink.count(), 1);
    }
}
