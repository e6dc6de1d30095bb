//! # logward
//!
//! Structured, multi-severity logging facade: named message templates with
//! positional rendering, severity-routed logger handles, structured audit
//! records, and accumulation throttling for high-frequency events.
//!
//! The crate decides *what* to write and *how often* — never where bytes
//! land. The production [`Sink`] adapter forwards everything to the
//! `tracing` ecosystem; hosts that need a different transport (files, a
//! message bus) implement [`Sink`] themselves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logward::Logward;
//!
//! // One runtime per application, created at bootstrap
//! let logward = Logward::new();
//!
//! // Facades are scoped to an owner identity and cheap to create
//! let logger = logward.logger("server::rest");
//! logger.log_rest_server_start();
//!
//! // Or customize:
//! let logward = Logward::builder()
//!     .with_audit_sink_name("compliance")
//!     .with_queue_capacity(4096)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Message Templates
//!
//! Messages are rendered from a catalog of named templates with ordinal `{}`
//! placeholders. Rendering is lenient the way slf4j is: extra arguments are
//! ignored, missing arguments leave the placeholder literal, and rendering
//! never fails.
//!
//! ```rust
//! use logward::{render, templates, TemplateRegistry};
//!
//! let registry = TemplateRegistry::new();
//! let template = registry.lookup("CREATE_USER");
//! assert_eq!(render(template.pattern, &[&"u1", &"admin"]), "User u1 created by admin");
//!
//! // Lookups are total: unknown names resolve to the UNKNOWN sentinel
//! assert_eq!(registry.lookup("nope"), &templates::UNKNOWN);
//! ```
//!
//! ## Audit Records
//!
//! Audit entries are structured field→value payloads tagged with `operation`
//! and `action`, routed to a named audit sink distinct from the owner's
//! severity sinks. At emission each record is augmented with `target` (the
//! owner identity), `datetime` (UTC, millisecond precision) and `level` —
//! unless the caller already supplied those fields (first-write-wins).
//!
//! ```rust,no_run
//! # let logward = logward::Logward::new();
//! let logger = logward.logger("auth::service");
//!
//! // Generated from the audit table: operation "user", action "create"
//! logger.audit().log_create_user("u1", "admin");
//!
//! // Denials and stop/restart events use WARN by convention
//! logger.audit().log_user_access_denied("u1", "write", "graph/g1");
//! ```
//!
//! Serialization is canonical JSON with sorted keys; caller-defined fields
//! round-trip unchanged. Audit delivery is fire-and-forget: sink failures
//! are swallowed at the emission boundary and surface only as
//! [`Metrics::sink_errors`].
//!
//! ## Accumulation Throttling
//!
//! High-frequency events can be accumulated so only every Nth occurrence per
//! (owner, template) key is emitted. The counter update is one atomic step
//! per key, so N events at threshold T trip exactly `floor(N / T)` times
//! under any concurrent interleaving; each trip deletes the counter and the
//! next event starts a fresh cycle. Thresholds 0 and 1 mean "always emit".
//!
//! ```rust,no_run
//! # let logward = logward::Logward::new();
//! let importer = logward.logger("import::vertices");
//!
//! // IMPORT_VERTEX declares threshold 1000: one line per 1000 imports
//! for vertex in 0..100_000 {
//!     importer.accumulate_import_vertices(&[&vertex, &"graph-1"]);
//! }
//! ```
//!
//! With the `async` feature (default), tripped emissions are dispatched to a
//! bounded queue with a single consumer task so bookkeeping never blocks the
//! call site; per-key FIFO keeps the threshold crossings deterministic.
//! Drain the queue before process exit:
//!
//! ```rust,no_run
//! # async fn shutdown(logward: logward::Logward) {
//! logward.shutdown().await.ok();
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Nothing in the logging path ever returns an error or panics into caller
//! business logic:
//! - unknown severity tags degrade to `INFO` and log a diagnostic,
//! - placeholder/argument mismatches render best-effort,
//! - sink and serialization failures are swallowed and counted,
//! - throttle bookkeeping cannot fail.
//!
//! Only [`LogwardBuilder::build`] is fallible, and only for invalid
//! configuration values.
//!
//! ## Memory
//!
//! Throttle counters are created on demand and deleted when they trip. A
//! counter whose key stops occurring mid-cycle is retained indefinitely —
//! there is no TTL or eviction — so unbounded key cardinality (e.g. a
//! per-request owner identity) grows the counter map without bound. Keep
//! owner identities and template names low-cardinality, and monitor
//! [`AccumulationThrottle::len`] if in doubt.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    audit::{
        AuditRecord, DATETIME_FORMAT, FIELD_ACTION, FIELD_DATETIME, FIELD_LEVEL, FIELD_OPERATION,
        FIELD_TARGET,
    },
    owner::Owner,
    render::render,
    severity::Severity,
    template::{templates, Template, TemplateRegistry},
};

pub use application::{
    cache::LoggerCache,
    config::{LogwardConfig, KEY_AUDIT_SINK, KEY_QUEUE_CAPACITY, KEY_SHUTDOWN_GRACE_MS},
    facade::{AuditLog, ClientLog, CommonLog, ServerLog, ServiceLogger},
    logger::ChannelLogger,
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, CounterStore, Sink, SinkError, ThrottleKey},
    throttle::AccumulationThrottle,
};

#[cfg(feature = "async")]
pub use application::worker::{EmitJob, JobSender, ShutdownError, WorkerHandle};

pub use infrastructure::{
    clock::SystemClock,
    runtime::{BuildError, Logward, LogwardBuilder},
    sink::TracingSink,
    store::DashCounterStore,
};
