//! Named message templates and the template registry.
//!
//! A template pairs a stable name with a positional message pattern and an
//! optional accumulation threshold. The registry is built once at bootstrap
//! and is read-only afterwards; lookups are total and resolve unknown names
//! to the [`UNKNOWN`](templates::UNKNOWN) sentinel instead of failing.

use ahash::RandomState;
use std::collections::HashMap;
use std::fmt;

/// A named, parameterized message pattern with an optional emit-rate threshold.
///
/// Template names are stable lookup keys across process restarts; they must
/// not be renumbered or reused for different messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Stable name, the registry lookup key.
    pub name: &'static str,
    /// Message pattern with ordinal `{}` placeholders.
    pub pattern: &'static str,
    /// Accumulation threshold; 0 means "always emit".
    pub threshold: u32,
}

impl Template {
    /// Define a template without an accumulation threshold.
    pub const fn new(name: &'static str, pattern: &'static str) -> Self {
        Template {
            name,
            pattern,
            threshold: 0,
        }
    }

    /// Define a template with an accumulation threshold.
    pub const fn with_threshold(name: &'static str, pattern: &'static str, threshold: u32) -> Self {
        Template {
            name,
            pattern,
            threshold,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

macro_rules! catalog {
    ($( $(#[$meta:meta])* $name:ident => $template:expr; )*) => {
        $( $(#[$meta])* pub const $name: Template = $template; )*

        /// Every built-in template, in declaration order.
        pub const BUILTIN: &[Template] = &[$($name),*];
    };
}

/// The built-in template catalog.
///
/// Grouped by the domain area the messages belong to. Thresholds are only
/// declared for high-frequency import events; everything else always emits.
pub mod templates {
    use super::Template;

    catalog! {
        /// Sentinel returned for unregistered names.
        UNKNOWN => Template::new("UNKNOWN", "");

        // General
        ACCESS_LOG => Template::new(
            "ACCESS_LOG",
            "{} /{} Status: {} - user: {} - roles: {} in {} ms",
        );
        START_REST_SERVER => Template::new("START_REST_SERVER", "restServer has been initialized!");
        SERVER_DOWN => Template::new("SERVER_DOWN", "Server down!");
        CRITICAL_ERROR => Template::new("CRITICAL_ERROR", "Critical error {} with additional info: {}");
        DEBUG_LOG => Template::new("DEBUG_LOG", "DEBUG [{}] {} - {}");

        // Data import
        IMPORT_VERTEX => Template::with_threshold("IMPORT_VERTEX", "Imported vertex {} into {}", 1000);
        IMPORT_EDGE => Template::with_threshold("IMPORT_EDGE", "Imported edge {} into {}", 1000);

        // User management
        CREATE_USER => Template::new("CREATE_USER", "User {} created by {}");
        UPDATE_USER => Template::new("UPDATE_USER", "User {} has been updated by {}");
        DELETE_USER => Template::new("DELETE_USER", "User {} has been deleted by {}");

        // Group management
        CREATE_GROUP => Template::new("CREATE_GROUP", "Group {} has been created by {}");
        UPDATE_GROUP => Template::new("UPDATE_GROUP", "Group {} has been updated by {}");
        DELETE_GROUP => Template::new("DELETE_GROUP", "Group {} has been deleted by {}");

        // Role management
        CREATE_ROLE => Template::new("CREATE_ROLE", "Role {} has been created by {}");
        UPDATE_ROLE => Template::new("UPDATE_ROLE", "Role {} has been updated by {}");
        DELETE_ROLE => Template::new("DELETE_ROLE", "Role {} has been deleted by {}");
        CREATE_REF_ROLE => Template::new("CREATE_REF_ROLE", "Ref role {} has been created for role {}");
        UPDATE_REF_ROLE => Template::new("UPDATE_REF_ROLE", "Ref role {} has been updated");
        DELETE_REF_ROLE => Template::new("DELETE_REF_ROLE", "Ref role {} has been deleted");
        EXPORT_ROLE => Template::new("EXPORT_ROLE", "Role {} has been exported by {}");

        // Password management
        UPDATE_PASSWORD => Template::new("UPDATE_PASSWORD", "User {} has changed password");
        RESET_PASSWORD => Template::new("RESET_PASSWORD", "User {} has reset password");

        // Authorization
        USER_LOGIN => Template::new("USER_LOGIN", "User {} has been logged in via {} at {}");
        USER_LOGOUT => Template::new("USER_LOGOUT", "User {} has been logged out");
        USER_DISPOSE => Template::new("USER_DISPOSE", "User {} has been disposed by {}");
        USER_LOCK => Template::new("USER_LOCK", "User {} has been locked by {}");
        USER_UNLOCK => Template::new("USER_UNLOCK", "User {} has been unlocked by {}");
        USER_ACCESS_DENIED => Template::new(
            "USER_ACCESS_DENIED",
            "User {} has been denied access {} on {}",
        );
        GENERATE_AUTH_KEY => Template::new("GENERATE_AUTH_KEY", "User {} has generated new auth key");

        // User group management
        CREATE_USER_GROUP => Template::new("CREATE_USER_GROUP", "User group {} has been created by {}");
        UPDATE_USER_GROUP => Template::new("UPDATE_USER_GROUP", "User group {} has been updated by {}");
        DELETE_USER_GROUP => Template::new("DELETE_USER_GROUP", "User group {} has been deleted by {}");

        // Tenant management
        UPDATE_TENANT_CONFIG => Template::new("UPDATE_TENANT_CONFIG", "Tenant {} config has been updated");
        CREATE_TENANT => Template::new("CREATE_TENANT", "Tenant {} has been created by {}");
        UPDATE_TENANT => Template::new("UPDATE_TENANT", "Tenant {} has been updated by {}");
        REMOVE_TENANT => Template::new("REMOVE_TENANT", "Tenant {} has been removed by {}");

        // Cluster management
        SYNC_CLUSTER_CONFIG => Template::new("SYNC_CLUSTER_CONFIG", "Cluster config synchronized by {}");
        SYNC_OPS_COMMAND => Template::new("SYNC_OPS_COMMAND", "Process synchronized ops command {} by {}");
        ASYNC_OPS_COMMAND => Template::new("ASYNC_OPS_COMMAND", "Process asynchronized ops command {} by {}");
        IMPORT_CERT_LICENSE => Template::new("IMPORT_CERT_LICENSE", "License {} has been imported by {}");

        // Service management
        ADD_SERVICE => Template::new("ADD_SERVICE", "Service {} has been added to instance {}");
        REMOVE_SERVICE => Template::new("REMOVE_SERVICE", "Service {} has been removed from instance {}");
        START_SERVICE => Template::new("START_SERVICE", "Service {} has been started");
        STOP_SERVICE => Template::new("STOP_SERVICE", "Service {} has been stopped");
        RESTART_SERVICE => Template::new("RESTART_SERVICE", "Service {} has been restarted");
        SYNC_SERVICE_CONFIG => Template::new("SYNC_SERVICE_CONFIG", "Service {} config has been synchronized");
        EXPORT_SERVICE_LOG => Template::new("EXPORT_SERVICE_LOG", "Service {} log has been exported by {}");
        SERVICE_HEALTH_CHECK_START => Template::new("SERVICE_HEALTH_CHECK_START", "Service {} health check started");
        SERVICE_HEALTH_CHECK_RESULT => Template::new("SERVICE_HEALTH_CHECK_RESULT", "Service {} health check finished");

        // Instance management
        CREATE_INSTANCE => Template::new("CREATE_INSTANCE", "Instance {} has been created");
        DELETE_INSTANCE => Template::new("DELETE_INSTANCE", "Instance {} has been deleted by {}");
        START_INSTANCE => Template::new("START_INSTANCE", "Instance {} has been started by {}");
        STOP_INSTANCE => Template::new("STOP_INSTANCE", "Instance {} has been stopped by {}");
        RESTART_INSTANCE => Template::new("RESTART_INSTANCE", "Instance {} has been restarted by {}");
        SYNC_INSTANCE_CONFIG => Template::new("SYNC_INSTANCE_CONFIG", "Instance {} config has been synchronized by {}");
        INSTANCE_PROVIDE_SERVICE => Template::new("INSTANCE_PROVIDE_SERVICE", "Instance {} begins to provide service {}");
        INSTANCE_WITHDRAW_SERVICE => Template::new("INSTANCE_WITHDRAW_SERVICE", "Instance {} withdraws service {}");
        EXPORT_INSTANCE_LOG => Template::new("EXPORT_INSTANCE_LOG", "Instance log has been exported by {}");

        // Client
        REST_CLIENT_ACCESS => Template::new("REST_CLIENT_ACCESS", "Rest client access {}");

        // Thread pool
        PAUSABLE_THREAD_PAUSED => Template::new("PAUSABLE_THREAD_PAUSED", "PausableScheduledThreadPool paused");
        PAUSABLE_THREAD_RESUMED => Template::new("PAUSABLE_THREAD_RESUMED", "PausableScheduledThreadPool resumed");
        PAUSABLE_THREAD_INTERRUPTED => Template::new("PAUSABLE_THREAD_INTERRUPTED", "PausableScheduledThreadPool interrupted");

        // Timing and configuration
        WASTE_TIME_COST => Template::new("WASTE_TIME_COST", "Waste time cost {}/{} for {} with each cost {} ms");
        REDUNDANT_CONFIG_OPTION => Template::new("REDUNDANT_CONFIG_OPTION", "Redundant config option: {}");

        // Reflection diagnostics
        NO_STATIC_METHOD => Template::new("NO_STATIC_METHOD", "Class {} does not have static method {}");
        CANNOT_CALL_METHOD => Template::new("CANNOT_CALL_METHOD", "Cannot call method {} of class {}");
        ILLEGAL_ACCESS => Template::new("ILLEGAL_ACCESS", "Illegal access to method {} of class {}");
        ALREADY_REGISTERED => Template::new("ALREADY_REGISTERED", "Module {} has already been registered by {}");

        // Transactions
        COMMIT_FAILED => Template::new("COMMIT_FAILED", "Transaction commit failed: {}");
        ROLLBACK_FAILED => Template::new("ROLLBACK_FAILED", "Transaction rollback failed: {}");
    }
}

/// Immutable catalog of named message templates with name lookup.
///
/// Built once before any logger handle is requested; there is no write path
/// after construction, so concurrent lookups need no synchronization.
#[derive(Debug)]
pub struct TemplateRegistry {
    by_name: HashMap<&'static str, Template, RandomState>,
}

impl TemplateRegistry {
    /// Build a registry over the built-in catalog.
    pub fn new() -> Self {
        Self::with_templates(&[])
    }

    /// Build a registry over the built-in catalog plus host-defined templates.
    ///
    /// Duplicate names keep the first registration.
    pub fn with_templates(extra: &[Template]) -> Self {
        let mut by_name =
            HashMap::with_capacity_and_hasher(templates::BUILTIN.len() + extra.len(), RandomState::new());
        for template in templates::BUILTIN.iter().chain(extra) {
            by_name.entry(template.name).or_insert(*template);
        }
        TemplateRegistry { by_name }
    }

    /// Look up a template by name.
    ///
    /// Total: unregistered names resolve to the `UNKNOWN` sentinel, never an
    /// error.
    pub fn lookup(&self, name: &str) -> &Template {
        self.by_name.get(name).unwrap_or(&templates::UNKNOWN)
    }

    /// The accumulation threshold declared for a template name, 0 by default.
    pub fn threshold(&self, name: &str) -> u32 {
        self.lookup(name).threshold
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the registry is empty (it never is in practice).
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
