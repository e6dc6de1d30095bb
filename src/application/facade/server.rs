//! Server facade - transaction failure messages.

use crate::application::logger::ChannelLogger;
use crate::domain::template::templates;
use std::fmt;
use std::sync::Arc;

/// Server-side transaction messages, scoped to one owner identity.
#[derive(Debug, Clone)]
pub struct ServerLog {
    error: Arc<ChannelLogger>,
}

impl ServerLog {
    pub(crate) fn new(error: Arc<ChannelLogger>) -> Self {
        ServerLog { error }
    }

    /// A transaction commit failed.
    pub fn log_commit_failed(&self, error: &dyn fmt::Display) {
        self.error.emit(&templates::COMMIT_FAILED, &[error]);
    }

    /// A transaction rollback failed.
    pub fn log_rollback_failed(&self, error: &dyn fmt::Display) {
        self.error.emit(&templates::ROLLBACK_FAILED, &[error]);
    }
}
