//! Configuration consumption.
//!
//! The facade consumes an opaque key→value source (the host's config object);
//! loading and validating config files is the host's concern. Missing or
//! malformed values degrade to defaults with a diagnostic — configuration
//! problems never fail a logging call.

use std::time::Duration;

/// Config key for the audit sink name.
pub const KEY_AUDIT_SINK: &str = "log.audit.sink";
/// Config key for the accumulation worker queue capacity.
pub const KEY_QUEUE_CAPACITY: &str = "log.queue.capacity";
/// Config key for the shutdown drain grace period, in milliseconds.
pub const KEY_SHUTDOWN_GRACE_MS: &str = "log.shutdown.grace_ms";

/// Runtime settings for the logging facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogwardConfig {
    /// Name of the sink audit records are routed to.
    pub audit_sink: String,
    /// Bound on the accumulation worker queue.
    pub queue_capacity: usize,
    /// Grace period for draining the worker on shutdown.
    pub shutdown_grace: Duration,
}

impl Default for LogwardConfig {
    fn default() -> Self {
        LogwardConfig {
            audit_sink: "audit".to_string(),
            queue_capacity: 1024,
            shutdown_grace: Duration::from_millis(5000),
        }
    }
}

impl LogwardConfig {
    /// Read settings from an opaque key→value source.
    ///
    /// `get` returns the raw string value for a key, or `None` when the key
    /// is not set. Unset keys take their defaults; malformed values degrade
    /// to defaults and log a diagnostic.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = LogwardConfig::default();

        let audit_sink = match get(KEY_AUDIT_SINK) {
            Some(name) if !name.trim().is_empty() => name,
            Some(_) => {
                tracing::warn!(
                    target: "logward",
                    key = KEY_AUDIT_SINK,
                    "empty audit sink name in config, using default"
                );
                defaults.audit_sink.clone()
            }
            None => defaults.audit_sink.clone(),
        };

        let queue_capacity = parse_or_default(
            get(KEY_QUEUE_CAPACITY),
            KEY_QUEUE_CAPACITY,
            defaults.queue_capacity,
        );

        let grace_ms = parse_or_default(
            get(KEY_SHUTDOWN_GRACE_MS),
            KEY_SHUTDOWN_GRACE_MS,
            defaults.shutdown_grace.as_millis() as u64,
        );

        LogwardConfig {
            audit_sink,
            queue_capacity,
            shutdown_grace: Duration::from_millis(grace_ms),
        }
    }
}

fn parse_or_default<T: std::str::FromStr + Copy>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        None => default,
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(
                    target: "logward",
                    key,
                    value = %value,
                    "malformed config value, using default"
                );
                default
            }
        },
    }
}
