//! Audit facade - structured audit records for compliance-relevant events.
//!
//! Every method builds an [`AuditRecord`](crate::AuditRecord) from its table
//! entry and emits it through the owner's audit-mode handle. Successful
//! state-changing actions emit at `Info`; security-relevant denials and
//! stop/restart events emit at `Warn`.

use super::audit_methods;
use crate::application::logger::ChannelLogger;
use std::sync::Arc;

/// Audit-record methods, scoped to one owner identity.
#[derive(Debug, Clone)]
pub struct AuditLog {
    handle: Arc<ChannelLogger>,
}

impl AuditLog {
    pub(crate) fn new(handle: Arc<ChannelLogger>) -> Self {
        AuditLog { handle }
    }

    // User management
    audit_methods! {
        /// A user was created.
        log_create_user => Info, "user", "create" (user_id, creator_id);
        /// A user was updated.
        log_update_user => Info, "user", "update" (user_id, executor_id);
        /// A user was deleted.
        log_delete_user => Info, "user", "delete" (user_id, executor_id);
    }

    // Group management
    audit_methods! {
        /// A group was created.
        log_create_group => Info, "group", "create" (group_id, creator_id);
        /// A group was updated.
        log_update_group => Info, "group", "update" (group_id, executor_id);
        /// A group was deleted.
        log_delete_group => Info, "group", "delete" (group_id, executor_id);
    }

    // Role management
    audit_methods! {
        /// A role was created.
        log_create_role => Info, "role", "create" (role_id, creator_id);
        /// A role was updated.
        log_update_role => Info, "role", "update" (role_id, executor_id);
        /// A role was deleted.
        log_delete_role => Info, "role", "delete" (role_id, executor_id);
        /// A ref role was created for a role.
        log_create_ref_role => Info, "ref_role", "create" (ref_role_id, role_id);
        /// A ref role was updated.
        log_update_ref_role => Info, "ref_role", "update" (ref_role_id);
        /// A ref role was deleted.
        log_delete_ref_role => Info, "ref_role", "delete" (ref_role_id);
        /// Role info was exported.
        log_export_role => Info, "role", "export" (role_id, executor_id);
    }

    // Password management
    audit_methods! {
        /// A user changed their password.
        log_update_password => Info, "password", "update" (user_id);
        /// A user's password was reset.
        log_reset_password => Info, "password", "reset" (user_id);
    }

    // Authorization
    audit_methods! {
        /// A user logged in via a device.
        log_user_login => Info, "user", "login" (user_id, device_info, path);
        /// A user logged out.
        log_user_logout => Info, "user", "logout" (user_id);
        /// A user was disposed and can no longer be used.
        log_user_disposed => Info, "user", "dispose" (user_id, executor_id);
        /// A user was locked temporarily.
        log_user_locked => Info, "user", "lock" (user_id, executor_id);
        /// A user was unlocked.
        log_user_unlocked => Info, "user", "unlock" (user_id, executor_id);
        /// A user's access was denied.
        log_user_access_denied => Warn, "user", "access_denied" (user_id, access, resource);
        /// A user generated a new auth key.
        log_user_generate_auth_key => Info, "auth_key", "generate" (user_id);
    }

    // User group management
    audit_methods! {
        /// A user group was created.
        log_create_user_group => Info, "user_group", "create" (group_id, creator_id);
        /// A user group was updated.
        log_update_user_group => Info, "user_group", "update" (group_id, executor_id);
        /// A user group was deleted.
        log_delete_user_group => Info, "user_group", "delete" (group_id, executor_id);
    }

    // Tenant management
    audit_methods! {
        /// A tenant's config was updated.
        log_update_tenant_config => Info, "tenant", "update_config" (tenant_id);
        /// A tenant was created.
        log_create_tenant => Info, "tenant", "create" (tenant_id, creator_id);
        /// A tenant was updated.
        log_update_tenant => Info, "tenant", "update" (tenant_id, executor_id);
        /// A tenant was removed (not deleted).
        log_remove_tenant => Info, "tenant", "remove" (tenant_id, executor_id);
    }

    // Cluster management
    audit_methods! {
        /// Cluster config was synchronized.
        log_sync_cluster_config => Info, "cluster", "sync_config" (executor_id);
        /// An ops command was processed synchronously.
        log_process_sync_cmd => Info, "ops_command", "sync" (cmd_key, executor_id);
        /// An ops command was processed asynchronously.
        log_process_async_cmd => Info, "ops_command", "async" (cmd_key, executor_id);
        /// A certification license was imported.
        log_import_license => Info, "license", "import" (license_type, executor_id);
    }

    // Service management
    audit_methods! {
        /// A service was added to an instance.
        log_add_service => Info, "service", "add" (service_id, instance_id);
        /// A service was removed from an instance.
        log_remove_service => Info, "service", "remove" (service_id, instance_id);
        /// A service started.
        log_start_service => Info, "service", "start" (service_id);
        /// A service stopped.
        log_stop_service => Warn, "service", "stop" (service_id);
        /// A service restarted.
        log_restart_service => Warn, "service", "restart" (service_id);
        /// A service's config was synchronized.
        log_sync_service_config => Info, "service", "sync_config" (service_id);
        /// A service's log was exported.
        log_export_service_log => Info, "service", "export_log" (service_id, executor_id);
        /// A service health check started.
        log_start_health_check => Info, "service", "health_check_start" (service_id);
        /// A service health check finished.
        log_finalize_health_check => Info, "service", "health_check_result" (service_id);
    }

    // Instance management
    audit_methods! {
        /// An instance was created.
        log_create_instance => Info, "instance", "create" (instance_id, executor_id);
        /// An instance was deleted.
        log_delete_instance => Info, "instance", "delete" (instance_id, executor_id);
        /// An instance started.
        log_start_instance => Info, "instance", "start" (instance_id, executor_id);
        /// An instance stopped.
        log_stop_instance => Warn, "instance", "stop" (instance_id, executor_id);
        /// An instance restarted.
        log_restart_instance => Warn, "instance", "restart" (instance_id, executor_id);
        /// An instance's config was synchronized.
        log_sync_instance_config => Info, "instance", "sync_config" (instance_id, executor_id);
        /// An instance begins to provide a service.
        log_provide_service => Info, "instance", "provide_service" (instance_id, service_id);
        /// An instance withdraws a service from the cluster.
        log_withdraw_service => Warn, "instance", "withdraw_service" (instance_id, service_id);
        /// An instance's log was exported.
        log_export_instance_log => Info, "instance", "export_log" (executor_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::metrics::Metrics;
    use crate::domain::owner::Owner;
    use crate::infrastructure::mocks::{CaptureSink, FixedClock};
    use std::collections::BTreeMap;

    fn audit_log(sink: &CaptureSink) -> AuditLog {
        AuditLog::new(Arc::new(ChannelLogger::audit(
            Owner::named("tests::audit"),
            Arc::from("audit"),
            Arc::new(sink.clone()),
            Arc::new(FixedClock::default()),
            Metrics::new(),
        )))
    }

    fn parse(text: &str) -> BTreeMap<String, String> {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_create_user_builds_expected_record() {
        let sink = CaptureSink::new();
        audit_log(&sink).log_create_user("u1", "admin");

        let events = sink.captured();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, crate::Severity::Info);
        assert_eq!(events[0].sink_name.as_deref(), Some("audit"));

        let fields = parse(&events[0].text);
        assert_eq!(fields["operation"], "user");
        assert_eq!(fields["action"], "create");
        assert_eq!(fields["user_id"], "u1");
        assert_eq!(fields["creator_id"], "admin");
        assert_eq!(fields["target"], "tests::audit");
        assert_eq!(fields["level"], "INFO");
    }

    #[test]
    fn test_denials_and_stops_emit_at_warn() {
        let sink = CaptureSink::new();
        let log = audit_log(&sink);

        log.log_user_access_denied("u1", "write", "graph/g1");
        log.log_stop_service("svc-1");
        log.log_restart_instance("inst-1", "admin");

        for event in sink.captured() {
            assert_eq!(event.severity, crate::Severity::Warn);
            assert_eq!(parse(&event.text)["level"], "WARN");
        }
    }

    #[test]
    fn test_state_changes_emit_at_info() {
        let sink = CaptureSink::new();
        let log = audit_log(&sink);

        log.log_start_service("svc-1");
        log.log_create_tenant("t1", "admin");
        log.log_user_login("u1", "macbook", "/login");

        for event in sink.captured() {
            assert_eq!(event.severity, crate::Severity::Info);
        }
    }
}
