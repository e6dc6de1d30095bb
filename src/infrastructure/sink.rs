//! Production sink backed by the `tracing` ecosystem.
//!
//! Rendered lines become `tracing` events under the `logward` target with the
//! owner identity as a field; audit records go to the `logward::audit` target
//! with the configured sink name as a field. Where the bytes land (console,
//! file, collector) is decided by the host's subscriber configuration.

use crate::application::ports::{Sink, SinkError};
use crate::domain::owner::Owner;
use crate::domain::severity::Severity;
use tracing::Level;

/// Target for normal severity events.
pub const EVENT_TARGET: &str = "logward";
/// Target for audit record events.
pub const AUDIT_TARGET: &str = "logward::audit";

/// Sink adapter forwarding writes as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl Sink for TracingSink {
    fn write(&self, severity: Severity, owner: &Owner, text: &str) -> Result<(), SinkError> {
        // tracing macro metadata is static per call site, so severity is
        // dispatched with a match instead of a runtime level value
        match severity {
            Severity::Trace => tracing::trace!(target: EVENT_TARGET, owner = %owner, "{}", text),
            Severity::Debug => tracing::debug!(target: EVENT_TARGET, owner = %owner, "{}", text),
            Severity::Info => tracing::info!(target: EVENT_TARGET, owner = %owner, "{}", text),
            Severity::Warn => tracing::warn!(target: EVENT_TARGET, owner = %owner, "{}", text),
            Severity::Error => tracing::error!(target: EVENT_TARGET, owner = %owner, "{}", text),
        }
        Ok(())
    }

    fn write_named(
        &self,
        sink_name: &str,
        severity: Severity,
        text: &str,
    ) -> Result<(), SinkError> {
        match severity {
            Severity::Trace => {
                tracing::trace!(target: AUDIT_TARGET, sink = %sink_name, "{}", text)
            }
            Severity::Debug => {
                tracing::debug!(target: AUDIT_TARGET, sink = %sink_name, "{}", text)
            }
            Severity::Info => tracing::info!(target: AUDIT_TARGET, sink = %sink_name, "{}", text),
            Severity::Warn => tracing::warn!(target: AUDIT_TARGET, sink = %sink_name, "{}", text),
            Severity::Error => {
                tracing::error!(target: AUDIT_TARGET, sink = %sink_name, "{}", text)
            }
        }
        Ok(())
    }

    fn enabled(&self, severity: Severity, _owner: &Owner) -> bool {
        match severity {
            Severity::Trace => tracing::enabled!(target: EVENT_TARGET, Level::TRACE),
            Severity::Debug => tracing::enabled!(target: EVENT_TARGET, Level::DEBUG),
            Severity::Info => tracing::enabled!(target: EVENT_TARGET, Level::INFO),
            Severity::Warn => tracing::enabled!(target: EVENT_TARGET, Level::WARN),
            Severity::Error => tracing::enabled!(target: EVENT_TARGET, Level::ERROR),
        }
    }
}
