//! Common facade - infrastructure messages shared across the system.

use super::message_methods;
use crate::application::logger::ChannelLogger;
use crate::domain::template::templates;
use std::sync::Arc;

/// Common infrastructure messages, scoped to one owner identity.
#[derive(Debug, Clone)]
pub struct CommonLog {
    info: Arc<ChannelLogger>,
    warn: Arc<ChannelLogger>,
}

impl CommonLog {
    pub(crate) fn new(info: Arc<ChannelLogger>, warn: Arc<ChannelLogger>) -> Self {
        CommonLog { info, warn }
    }

    message_methods! {
        /// The pausable scheduled thread pool paused.
        log_thread_paused => info, PAUSABLE_THREAD_PAUSED ();
        /// The pausable scheduled thread pool resumed.
        log_thread_resumed => info, PAUSABLE_THREAD_RESUMED ();
        /// The pausable scheduled thread pool was interrupted.
        log_thread_interrupted => warn, PAUSABLE_THREAD_INTERRUPTED ();
        /// A config option is redundant.
        log_redundant_option => warn, REDUNDANT_CONFIG_OPTION (key);
        /// A class is missing an expected static method.
        log_no_static_method => warn, NO_STATIC_METHOD (holder, method_name);
        /// A method could not be called.
        log_cannot_call_method => warn, CANNOT_CALL_METHOD (method_name, holder);
        /// A method was accessed illegally.
        log_illegal_access => warn, ILLEGAL_ACCESS (method_name, holder);
        /// A module was registered twice.
        log_already_registered => warn, ALREADY_REGISTERED (module_name, module);
    }

    /// Wasted time cost measurement.
    pub fn log_waste_time_cost(&self, cost: f64, base_cost: f64, name: &str, each_cost_ms: u64) {
        self.info.emit(
            &templates::WASTE_TIME_COST,
            &[&cost, &base_cost, &name, &each_cost_ms],
        );
    }
}
