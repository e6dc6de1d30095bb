//! Domain facades - typed logging methods over the core.
//!
//! This layer is pure routing: each public method maps a business event onto
//! a (severity, template, argument set) or an audit record, then calls
//! through the channel logger and throttle. The mapping is data, not logic —
//! the `message_methods!` and `audit_methods!` tables below *are* the
//! contract surface, and each facade is generated from its table.

use crate::application::cache::LoggerCache;
use crate::application::logger::ChannelLogger;
use crate::application::ports::CounterStore;
use crate::application::throttle::AccumulationThrottle;
use crate::domain::owner::Owner;
use crate::domain::render::render;
use crate::domain::template::{templates, TemplateRegistry};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "async")]
use crate::application::worker::{EmitJob, JobSender};

pub mod audit;
pub mod client;
pub mod common;
pub mod server;

pub use audit::AuditLog;
pub use client::ClientLog;
pub use common::CommonLog;
pub use server::ServerLog;

/// Generate template-mode facade methods from a
/// `method => handle, TEMPLATE(args...)` table.
macro_rules! message_methods {
    ($( $(#[$meta:meta])* $method:ident => $handle:ident, $template:ident ( $($arg:ident),* ); )*) => {
        $(
            $(#[$meta])*
            pub fn $method(&self $(, $arg: &str)*) {
                self.$handle.emit(
                    &$crate::domain::template::templates::$template,
                    &[$(&$arg as &dyn ::std::fmt::Display),*],
                );
            }
        )*
    };
}

/// Generate audit-record facade methods from a
/// `method => severity, "operation", "action" (fields...)` table.
macro_rules! audit_methods {
    ($( $(#[$meta:meta])* $method:ident => $severity:ident, $operation:literal, $action:literal ( $($field:ident),* ); )*) => {
        $(
            $(#[$meta])*
            pub fn $method(&self $(, $field: &str)*) {
                let record = $crate::domain::audit::AuditRecord::new($operation, $action)
                    $(.field(stringify!($field), $field))*;
                self.handle.emit_audit($crate::domain::severity::Severity::$severity, record);
            }
        )*
    };
}

pub(crate) use audit_methods;
pub(crate) use message_methods;

/// The general-purpose facade for one owner identity.
///
/// Bundles the four severity handles, the domain sub-facades, and the
/// accumulation path. Obtained from [`Logward::logger`](crate::Logward::logger);
/// cheap to clone and share.
#[derive(Debug, Clone)]
pub struct ServiceLogger {
    owner: Owner,
    debug: Arc<ChannelLogger>,
    info: Arc<ChannelLogger>,
    warn: Arc<ChannelLogger>,
    error: Arc<ChannelLogger>,
    audit: AuditLog,
    common: CommonLog,
    server: ServerLog,
    client: ClientLog,
    cache: Arc<LoggerCache>,
    templates: Arc<TemplateRegistry>,
    throttle: AccumulationThrottle<Arc<dyn CounterStore>>,
    #[cfg(feature = "async")]
    jobs: Option<JobSender>,
}

impl ServiceLogger {
    pub(crate) fn new(
        owner: Owner,
        cache: Arc<LoggerCache>,
        templates: Arc<TemplateRegistry>,
        throttle: AccumulationThrottle<Arc<dyn CounterStore>>,
    ) -> Self {
        use crate::domain::severity::Severity;

        let debug = cache.get(Severity::Debug, &owner);
        let info = cache.get(Severity::Info, &owner);
        let warn = cache.get(Severity::Warn, &owner);
        let error = cache.get(Severity::Error, &owner);

        let audit = AuditLog::new(cache.audit(&owner));
        let common = CommonLog::new(Arc::clone(&info), Arc::clone(&warn));
        let server = ServerLog::new(Arc::clone(&error));
        let client = ClientLog::new(Arc::clone(&debug), Arc::clone(&info));

        ServiceLogger {
            owner,
            debug,
            info,
            warn,
            error,
            audit,
            common,
            server,
            client,
            cache,
            templates,
            throttle,
            #[cfg(feature = "async")]
            jobs: None,
        }
    }

    #[cfg(feature = "async")]
    pub(crate) fn with_jobs(mut self, jobs: Option<JobSender>) -> Self {
        self.jobs = jobs;
        self
    }

    /// The owner identity this facade is scoped to.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Whether debug output is currently enabled for this owner.
    ///
    /// Check before constructing expensive debug arguments.
    pub fn is_debug_enabled(&self) -> bool {
        self.debug.is_debug_enabled()
    }

    /// Log through an alternate severity carried as a string tag.
    ///
    /// Unknown tags degrade to `Info` (with a diagnostic); unknown template
    /// names resolve to the `UNKNOWN` sentinel. The call never fails.
    pub fn log(&self, severity_tag: &str, template_name: &str, args: &[&dyn fmt::Display]) {
        let handle = self.cache.get_by_tag(severity_tag, &self.owner);
        handle.emit(self.templates.lookup(template_name), args);
    }

    /// REST server initialized.
    pub fn log_rest_server_start(&self) {
        self.info.emit(&templates::START_REST_SERVER, &[]);
    }

    /// Server is going down.
    pub fn log_server_shutdown(&self) {
        self.warn.emit(&templates::SERVER_DOWN, &[]);
    }

    /// General critical error, for use in catch-all error paths.
    pub fn log_critical_error(&self, error: &dyn fmt::Display, additional_info: &dyn fmt::Display) {
        self.error
            .emit(&templates::CRITICAL_ERROR, &[error, additional_info]);
    }

    /// General debug info; the caller identifies itself as `executor`.
    pub fn log_debug(&self, executor: &str, message: &str, context: &str) {
        self.debug
            .emit(&templates::DEBUG_LOG, &[&executor, &message, &context]);
    }

    /// Debug with a caller-supplied pattern, prefixed with the executor name.
    pub fn log_custom_debug(&self, pattern: &str, executor: &str, args: &[&dyn fmt::Display]) {
        let formatted = format!("DEBUG [{{}}] {}", pattern);
        let mut all: Vec<&dyn fmt::Display> = Vec::with_capacity(args.len() + 1);
        all.push(&executor);
        all.extend_from_slice(args);
        self.debug.emit_pattern(&formatted, &all);
    }

    /// A vertex was imported into a database.
    pub fn log_import_vertex(&self, vertex: &dyn fmt::Display, db_name: &str) {
        self.info
            .emit(&templates::IMPORT_VERTEX, &[vertex, &db_name]);
    }

    /// An edge was imported into a database.
    pub fn log_import_edge(&self, edge: &dyn fmt::Display, db_name: &str) {
        self.info.emit(&templates::IMPORT_EDGE, &[edge, &db_name]);
    }

    /// RESTful API access log.
    pub fn log_api_access(
        &self,
        method: &str,
        url: &str,
        status_code: u16,
        user_id: &str,
        role_id: &str,
        request_time_ms: u64,
    ) {
        self.info.emit(
            &templates::ACCESS_LOG,
            &[
                &method,
                &url,
                &status_code,
                &user_id,
                &role_id,
                &request_time_ms,
            ],
        );
    }

    /// Register one occurrence of a high-frequency event; only every Nth
    /// occurrence per (owner, template) is actually emitted.
    ///
    /// Tripped emissions are dispatched to the background worker when one is
    /// running, so this call never blocks on the sink.
    pub fn accumulate(&self, template_name: &str, args: &[&dyn fmt::Display]) {
        let template = *self.templates.lookup(template_name);
        if !self.throttle.should_emit(&self.owner, &template) {
            return;
        }
        let text = render(template.pattern, args);

        #[cfg(feature = "async")]
        if let Some(jobs) = &self.jobs {
            jobs.submit(EmitJob {
                logger: Arc::clone(&self.info),
                text,
            });
            return;
        }

        self.info.write_rendered(&text);
    }

    /// Accumulate vertex-import occurrences.
    pub fn accumulate_import_vertices(&self, args: &[&dyn fmt::Display]) {
        self.accumulate(templates::IMPORT_VERTEX.name, args);
    }

    /// Accumulate edge-import occurrences.
    pub fn accumulate_import_edges(&self, args: &[&dyn fmt::Display]) {
        self.accumulate(templates::IMPORT_EDGE.name, args);
    }

    /// Audit-record methods.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Common infrastructure messages.
    pub fn common(&self) -> &CommonLog {
        &self.common
    }

    /// Server-side transaction messages.
    pub fn server(&self) -> &ServerLog {
        &self.server
    }

    /// Client access messages.
    pub fn client(&self) -> &ClientLog {
        &self.client
    }
}
