//! Bootstrap runtime for the logging facade.
//!
//! [`Logward`] owns the template registry, the logger cache, the throttle
//! counters and the background worker. It is an explicit, constructor-injected
//! object with a defined lifetime — created at application bootstrap, drained
//! at shutdown — rather than an ambient static singleton, so tests can
//! instantiate isolated instances per case.

use crate::application::cache::LoggerCache;
use crate::application::config::LogwardConfig;
use crate::application::facade::ServiceLogger;
use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, CounterStore, Sink};
use crate::application::throttle::AccumulationThrottle;
use crate::domain::owner::Owner;
use crate::domain::template::{Template, TemplateRegistry};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::sink::TracingSink;
use crate::infrastructure::store::DashCounterStore;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "async")]
use crate::application::worker::{self, JobSender, ShutdownError, WorkerHandle};
#[cfg(feature = "async")]
use std::sync::Mutex;

/// Error returned when building a [`Logward`] instance fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Worker queue capacity must be greater than zero
    ZeroQueueCapacity,
    /// Shutdown grace period must be greater than zero
    ZeroShutdownGrace,
    /// The audit sink name must be non-empty
    EmptyAuditSinkName,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::ZeroQueueCapacity => {
                write!(f, "queue capacity must be greater than 0")
            }
            BuildError::ZeroShutdownGrace => {
                write!(f, "shutdown grace period must be greater than 0")
            }
            BuildError::EmptyAuditSinkName => {
                write!(f, "audit sink name must not be empty")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// The logging facade runtime.
///
/// # Examples
/// ```no_run
/// use logward::Logward;
///
/// let logward = Logward::new();
/// let logger = logward.logger("server::rest");
/// logger.log_rest_server_start();
/// logger.audit().log_create_user("u1", "admin");
/// ```
#[derive(Debug)]
pub struct Logward {
    templates: Arc<TemplateRegistry>,
    cache: Arc<LoggerCache>,
    throttle: AccumulationThrottle<Arc<dyn CounterStore>>,
    metrics: Metrics,
    #[cfg(feature = "async")]
    jobs: Option<JobSender>,
    #[cfg(feature = "async")]
    worker: Mutex<Option<WorkerHandle>>,
}

impl Logward {
    /// Create a runtime with defaults: the `tracing` sink, the system clock
    /// and the built-in template catalog.
    pub fn new() -> Self {
        LogwardBuilder::default().assemble()
    }

    /// Start building a customized runtime.
    pub fn builder() -> LogwardBuilder {
        LogwardBuilder::default()
    }

    /// Get the facade for an owner identity.
    ///
    /// Facades for the same identity share their underlying handles through
    /// the logger cache.
    pub fn logger(&self, owner: impl Into<Owner>) -> ServiceLogger {
        let logger = ServiceLogger::new(
            owner.into(),
            Arc::clone(&self.cache),
            Arc::clone(&self.templates),
            self.throttle.clone(),
        );
        #[cfg(feature = "async")]
        let logger = logger.with_jobs(self.jobs.clone());
        logger
    }

    /// Get the facade for a type, using its fully-qualified name as identity.
    pub fn logger_for<T: ?Sized>(&self) -> ServiceLogger {
        self.logger(Owner::of::<T>())
    }

    /// The template registry.
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// The logger cache.
    pub fn cache(&self) -> &LoggerCache {
        &self.cache
    }

    /// The accumulation throttle.
    pub fn throttle(&self) -> &AccumulationThrottle<Arc<dyn CounterStore>> {
        &self.throttle
    }

    /// Self-observability counters.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Stop accepting accumulation jobs and drain the worker queue.
    ///
    /// Idempotent; returns `Ok(())` when no worker is running. Call before
    /// process exit so queued accumulation emissions reach the sink.
    #[cfg(feature = "async")]
    pub async fn shutdown(&self) -> Result<(), ShutdownError> {
        let handle = match self.worker.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        match handle {
            Some(handle) => handle.shutdown().await,
            None => Ok(()),
        }
    }
}

impl Default for Logward {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`Logward`] runtime.
pub struct LogwardBuilder {
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    extra_templates: Vec<Template>,
    config: LogwardConfig,
    #[cfg(feature = "async")]
    worker_enabled: bool,
}

impl Default for LogwardBuilder {
    fn default() -> Self {
        LogwardBuilder {
            sink: Arc::new(TracingSink::new()),
            clock: Arc::new(SystemClock::new()),
            extra_templates: Vec::new(),
            config: LogwardConfig::default(),
            #[cfg(feature = "async")]
            worker_enabled: true,
        }
    }
}

impl LogwardBuilder {
    /// Set the sink writes are routed to.
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set a custom clock (mainly for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register host-defined templates alongside the built-in catalog.
    pub fn with_templates(mut self, templates: &[Template]) -> Self {
        self.extra_templates.extend_from_slice(templates);
        self
    }

    /// Apply a consumed configuration wholesale.
    pub fn with_config(mut self, config: LogwardConfig) -> Self {
        self.config = config;
        self
    }

    /// Route audit records to a named sink channel.
    ///
    /// The value will be validated when `build()` is called.
    pub fn with_audit_sink_name(mut self, name: impl Into<String>) -> Self {
        self.config.audit_sink = name.into();
        self
    }

    /// Bound the accumulation worker queue.
    ///
    /// The value will be validated when `build()` is called.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Bound the shutdown drain.
    ///
    /// The value will be validated when `build()` is called.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.config.shutdown_grace = grace;
        self
    }

    /// Disable the background worker; tripped accumulation emissions are
    /// written synchronously at the call site.
    #[cfg(feature = "async")]
    pub fn without_worker(mut self) -> Self {
        self.worker_enabled = false;
        self
    }

    /// Validate the configuration and assemble the runtime.
    pub fn build(self) -> Result<Logward, BuildError> {
        if self.config.queue_capacity == 0 {
            return Err(BuildError::ZeroQueueCapacity);
        }
        if self.config.shutdown_grace.is_zero() {
            return Err(BuildError::ZeroShutdownGrace);
        }
        if self.config.audit_sink.trim().is_empty() {
            return Err(BuildError::EmptyAuditSinkName);
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> Logward {
        let metrics = Metrics::new();
        let templates = Arc::new(TemplateRegistry::with_templates(&self.extra_templates));
        let cache = Arc::new(LoggerCache::new(
            Arc::clone(&self.sink),
            Arc::clone(&self.clock),
            metrics.clone(),
            self.config.audit_sink.as_str(),
        ));
        let store: Arc<dyn CounterStore> = Arc::new(DashCounterStore::new());
        let throttle = AccumulationThrottle::new(store, metrics.clone());

        // The worker needs a running tokio runtime; without one, tripped
        // emissions degrade to synchronous writes
        #[cfg(feature = "async")]
        let (jobs, worker) = if self.worker_enabled
            && tokio::runtime::Handle::try_current().is_ok()
        {
            let (sender, handle) = worker::spawn(
                self.config.queue_capacity,
                self.config.shutdown_grace,
                metrics.clone(),
            );
            (Some(sender), Some(handle))
        } else {
            (None, None)
        };

        Logward {
            templates,
            cache,
            throttle,
            metrics,
            #[cfg(feature = "async")]
            jobs,
            #[cfg(feature = "async")]
            worker: Mutex::new(worker),
        }
    }
}
