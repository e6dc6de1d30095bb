//! Severity-bound logger handles.
//!
//! A [`ChannelLogger`] is bound to one severity and one owner identity, in one
//! of two emission modes fixed at construction: template mode renders a
//! pattern against positional arguments; audit mode serializes a structured
//! record to a distinct named sink. Emission never fails from the caller's
//! point of view; sink and serialization errors are swallowed here and
//! counted on [`Metrics`].

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, Sink};
use crate::domain::audit::{AuditRecord, DATETIME_FORMAT, FIELD_DATETIME, FIELD_LEVEL, FIELD_TARGET};
use crate::domain::owner::Owner;
use crate::domain::render::render;
use crate::domain::severity::Severity;
use crate::domain::template::Template;
use std::fmt;
use std::sync::Arc;

/// Emission mode, selected at construction.
#[derive(Debug, Clone)]
enum Mode {
    /// Render a pattern and write to the owner's severity sink.
    Template,
    /// Serialize an audit record and write to a named sink.
    Audit {
        /// Name of the audit channel the record is routed to.
        sink_name: Arc<str>,
    },
}

/// A logger handle bound to one severity level and one owner identity.
///
/// Handles are created lazily by the [`LoggerCache`](crate::LoggerCache) and
/// shared process-wide; two call sites with the same severity and owner
/// observe the same handle state.
#[derive(Debug, Clone)]
pub struct ChannelLogger {
    severity: Severity,
    owner: Owner,
    mode: Mode,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
}

impl ChannelLogger {
    /// Create a template-mode handle and bind it to the sink.
    pub(crate) fn template(
        severity: Severity,
        owner: Owner,
        sink: Arc<dyn Sink>,
        clock: Arc<dyn Clock>,
        metrics: Metrics,
    ) -> Self {
        sink.bind(severity, &owner);
        ChannelLogger {
            severity,
            owner,
            mode: Mode::Template,
            sink,
            clock,
            metrics,
        }
    }

    /// Create an audit-mode handle routed to `sink_name`.
    pub(crate) fn audit(
        owner: Owner,
        sink_name: Arc<str>,
        sink: Arc<dyn Sink>,
        clock: Arc<dyn Clock>,
        metrics: Metrics,
    ) -> Self {
        sink.bind(Severity::Info, &owner);
        ChannelLogger {
            severity: Severity::Info,
            owner,
            mode: Mode::Audit { sink_name },
            sink,
            clock,
            metrics,
        }
    }

    /// The severity this handle is bound to.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The owner identity this handle is scoped to.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Render a template against positional arguments and emit the text.
    ///
    /// Argument-count mismatches are not validated: extra arguments are
    /// ignored and missing arguments leave the `{}` token literal.
    pub fn emit(&self, template: &Template, args: &[&dyn fmt::Display]) {
        let text = render(template.pattern, args);
        self.write_rendered(&text);
    }

    /// Render a caller-supplied raw pattern and emit the text.
    pub fn emit_pattern(&self, pattern: &str, args: &[&dyn fmt::Display]) {
        let text = render(pattern, args);
        self.write_rendered(&text);
    }

    /// Serialize an audit record to the named audit sink, tagged with the
    /// calling severity.
    ///
    /// The record is augmented with `target` (owner identity), `datetime`
    /// (UTC, millisecond precision) and `level` — each only if the caller has
    /// not already supplied that field. Serialization or write failures are
    /// swallowed and counted.
    ///
    /// Convention: successful state-changing actions emit at `Info`;
    /// security-relevant denials and stop/restart events emit at `Warn`.
    pub fn emit_audit(&self, severity: Severity, mut record: AuditRecord) {
        let sink_name = match &self.mode {
            Mode::Audit { sink_name } => Arc::clone(sink_name),
            // Template-mode handles still honor audit emission but have no
            // configured channel; route to the conventional default.
            Mode::Template => Arc::from("audit"),
        };

        record.set_if_absent(FIELD_TARGET, self.owner.as_str());
        record.set_if_absent(
            FIELD_DATETIME,
            self.clock.now_utc().format(DATETIME_FORMAT).to_string(),
        );
        record.set_if_absent(FIELD_LEVEL, severity.as_str());

        match record.to_json() {
            Ok(text) => match self.sink.write_named(&sink_name, severity, &text) {
                Ok(()) => self.metrics.record_emitted(),
                Err(_) => self.metrics.record_sink_error(),
            },
            Err(_) => self.metrics.record_sink_error(),
        }
    }

    /// Whether debug output is currently enabled for this owner.
    ///
    /// Reflects the live enablement state of the underlying sink; callers use
    /// it to skip constructing expensive debug arguments.
    pub fn is_debug_enabled(&self) -> bool {
        self.sink.enabled(Severity::Debug, &self.owner)
    }

    /// Whether this handle's own severity is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.sink.enabled(self.severity, &self.owner)
    }

    /// Write pre-rendered text to the sink, swallowing failures.
    pub(crate) fn write_rendered(&self, text: &str) {
        match self.sink.write(self.severity, &self.owner, text) {
            Ok(()) => self.metrics.record_emitted(),
            Err(_) => self.metrics.record_sink_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::templates;
    use crate::infrastructure::mocks::{CaptureSink, FixedClock};
    use chrono::TimeZone;

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap(),
        ))
    }

    fn template_logger(sink: &CaptureSink) -> ChannelLogger {
        ChannelLogger::template(
            Severity::Info,
            Owner::named("tests::logger"),
            Arc::new(sink.clone()),
            fixed_clock(),
            Metrics::new(),
        )
    }

    fn audit_logger(sink: &CaptureSink) -> ChannelLogger {
        ChannelLogger::audit(
            Owner::named("tests::logger"),
            Arc::from("audit"),
            Arc::new(sink.clone()),
            fixed_clock(),
            Metrics::new(),
        )
    }

    #[test]
    fn test_emit_renders_template() {
        let sink = CaptureSink::new();
        let logger = template_logger(&sink);

        logger.emit(&templates::CREATE_USER, &[&"u1", &"admin"]);

        let events = sink.captured();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text, "User u1 created by admin");
        assert_eq!(events[0].severity, Severity::Info);
        assert_eq!(events[0].owner, "tests::logger");
        assert_eq!(events[0].sink_name, None);
    }

    #[test]
    fn test_emit_pattern_raw() {
        let sink = CaptureSink::new();
        let logger = template_logger(&sink);

        logger.emit_pattern("Inspect V:{} generated", &[&42]);
        assert_eq!(sink.captured()[0].text, "Inspect V:42 generated");
    }

    #[test]
    fn test_emit_audit_augments_and_serializes() {
        let sink = CaptureSink::new();
        let logger = audit_logger(&sink);

        logger.emit_audit(
            Severity::Info,
            AuditRecord::new("user", "create").field("user_id", "u1"),
        );

        let events = sink.captured();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sink_name.as_deref(), Some("audit"));

        let parsed: std::collections::BTreeMap<String, String> =
            serde_json::from_str(&events[0].text).unwrap();
        assert_eq!(parsed["operation"], "user");
        assert_eq!(parsed["action"], "create");
        assert_eq!(parsed["user_id"], "u1");
        assert_eq!(parsed["target"], "tests::logger");
        assert_eq!(parsed["datetime"], "2024-03-01 12:30:45.000");
        assert_eq!(parsed["level"], "INFO");
    }

    #[test]
    fn test_emit_audit_keeps_caller_supplied_reserved_fields() {
        let sink = CaptureSink::new();
        let logger = audit_logger(&sink);

        logger.emit_audit(
            Severity::Warn,
            AuditRecord::new("service", "stop").field("target", "explicit-target"),
        );

        let parsed: std::collections::BTreeMap<String, String> =
            serde_json::from_str(&sink.captured()[0].text).unwrap();
        assert_eq!(parsed["target"], "explicit-target");
        assert_eq!(parsed["level"], "WARN");
    }

    #[test]
    fn test_sink_failure_is_swallowed_and_counted() {
        let sink = CaptureSink::new();
        sink.fail_writes(true);
        let metrics = Metrics::new();
        let logger = ChannelLogger::template(
            Severity::Error,
            Owner::named("tests::logger"),
            Arc::new(sink.clone()),
            fixed_clock(),
            metrics.clone(),
        );

        // Must not panic or return an error
        logger.emit(&templates::SERVER_DOWN, &[]);

        assert_eq!(sink.count(), 0);
        assert_eq!(metrics.sink_errors(), 1);
        assert_eq!(metrics.emitted(), 0);
    }

    #[test]
    fn test_is_debug_enabled_reflects_sink_state() {
        let sink = CaptureSink::new();
        let logger = template_logger(&sink);

        assert!(logger.is_debug_enabled());
        sink.set_enabled(Severity::Debug, false);
        assert!(!logger.is_debug_enabled());
    }

    #[test]
    fn test_construction_binds_to_sink() {
        let sink = CaptureSink::new();
        let _logger = template_logger(&sink);
        assert_eq!(sink.bind_count(), 1);
    }
}
