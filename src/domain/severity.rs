//! Severity levels for logger handles.
//!
//! Severity is a closed set. Call sites that carry a severity as a string tag
//! (configuration values, alternate-level logging) parse it with
//! [`Severity::parse`]; unknown tags degrade to [`Severity::Info`] at the
//! consumption site rather than failing the call.

use std::fmt;

/// The severity a logger handle is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Finest-grained diagnostics
    Trace,
    /// Developer diagnostics
    Debug,
    /// Normal operational messages
    Info,
    /// Degraded or security-relevant conditions
    Warn,
    /// Failures
    Error,
}

impl Severity {
    /// All severities, in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Stable upper-case label, used in audit records and sink output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Parse a severity tag, case-insensitively.
    ///
    /// Returns `None` for unrecognized tags; callers decide how to degrade
    /// (the logger cache falls back to `Info` and logs a diagnostic).
    pub fn parse(tag: &str) -> Option<Severity> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Severity::Trace),
            "debug" => Some(Severity::Debug),
            "info" => Some(Severity::Info),
            "warn" | "warning" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    /// Parse a severity tag, degrading to `Info` for unrecognized input.
    pub fn parse_or_default(tag: &str) -> Severity {
        Severity::parse(tag).unwrap_or(Severity::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
