//! Process-wide registry of logger handles.
//!
//! The cache maps (severity, owner identity) to a shared [`ChannelLogger`]
//! and deduplicates handle construction: the sink binding happens at most
//! once per key even when concurrent callers race on first access. Handles
//! live for the cache's lifetime; there is no eviction.

use crate::application::logger::ChannelLogger;
use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, Sink};
use crate::domain::owner::Owner;
use crate::domain::severity::Severity;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;

/// Deduplicating registry of severity-bound logger handles.
///
/// DashMap provides lock-free reads and fine-grained locking for writes; the
/// `entry` API makes create-if-absent a single atomic step per key, never a
/// check-then-act sequence. A single global mutex here would serialize every
/// logging call in the host application.
#[derive(Debug)]
pub struct LoggerCache {
    handles: DashMap<(Severity, Owner), Arc<ChannelLogger>, RandomState>,
    audit_handles: DashMap<Owner, Arc<ChannelLogger>, RandomState>,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
    audit_sink_name: Arc<str>,
}

impl LoggerCache {
    /// Create a cache bound to a sink, clock and audit sink name.
    pub fn new(
        sink: Arc<dyn Sink>,
        clock: Arc<dyn Clock>,
        metrics: Metrics,
        audit_sink_name: impl Into<Arc<str>>,
    ) -> Self {
        LoggerCache {
            handles: DashMap::with_hasher(RandomState::new()),
            audit_handles: DashMap::with_hasher(RandomState::new()),
            sink,
            clock,
            metrics,
            audit_sink_name: audit_sink_name.into(),
        }
    }

    /// Get the template-mode handle for a (severity, owner) pair, creating it
    /// on first request.
    ///
    /// Subsequent calls for the same pair return the same handle.
    pub fn get(&self, severity: Severity, owner: &Owner) -> Arc<ChannelLogger> {
        // Fast path: lock-free read for the common repeated lookup
        if let Some(handle) = self.handles.get(&(severity, owner.clone())) {
            return Arc::clone(&handle);
        }
        self.handles
            .entry((severity, owner.clone()))
            .or_insert_with(|| {
                Arc::new(ChannelLogger::template(
                    severity,
                    owner.clone(),
                    Arc::clone(&self.sink),
                    Arc::clone(&self.clock),
                    self.metrics.clone(),
                ))
            })
            .clone()
    }

    /// Get a handle for a severity carried as a string tag.
    ///
    /// Unknown tags degrade to `Info` and log a diagnostic through the
    /// owner's info handle on every occurrence (not deduplicated) — invalid
    /// severity degrades, it never fails the call.
    pub fn get_by_tag(&self, tag: &str, owner: &Owner) -> Arc<ChannelLogger> {
        match Severity::parse(tag) {
            Some(severity) => self.get(severity, owner),
            None => {
                let fallback = self.get(Severity::Info, owner);
                fallback.emit_pattern(
                    "Unknown severity tag '{}', falling back to INFO",
                    &[&tag],
                );
                fallback
            }
        }
    }

    /// Get the audit-mode handle for an owner, creating it on first request.
    pub fn audit(&self, owner: &Owner) -> Arc<ChannelLogger> {
        if let Some(handle) = self.audit_handles.get(owner) {
            return Arc::clone(&handle);
        }
        self.audit_handles
            .entry(owner.clone())
            .or_insert_with(|| {
                Arc::new(ChannelLogger::audit(
                    owner.clone(),
                    Arc::clone(&self.audit_sink_name),
                    Arc::clone(&self.sink),
                    Arc::clone(&self.clock),
                    self.metrics.clone(),
                ))
            })
            .clone()
    }

    /// Number of cached template-mode handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handles have been created yet.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The configured audit sink name.
    pub fn audit_sink_name(&self) -> &str {
        &self.audit_sink_name
    }
}
