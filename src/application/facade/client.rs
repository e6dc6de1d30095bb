//! Client facade - REST client access messages.

use super::message_methods;
use crate::application::logger::ChannelLogger;
use std::fmt;
use std::sync::Arc;

/// Client access messages, scoped to one owner identity.
#[derive(Debug, Clone)]
pub struct ClientLog {
    debug: Arc<ChannelLogger>,
    info: Arc<ChannelLogger>,
}

impl ClientLog {
    pub(crate) fn new(debug: Arc<ChannelLogger>, info: Arc<ChannelLogger>) -> Self {
        ClientLog { debug, info }
    }

    message_methods! {
        /// A REST client accessed the server.
        log_rest_client_access => info, REST_CLIENT_ACCESS (detail);
    }

    /// Client-side debug with a caller-supplied pattern.
    pub fn log_client_debug(&self, pattern: &str, args: &[&dyn fmt::Display]) {
        self.debug.emit_pattern(pattern, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::metrics::Metrics;
    use crate::domain::owner::Owner;
    use crate::domain::severity::Severity;
    use crate::infrastructure::mocks::{CaptureSink, FixedClock};

    fn client_log(sink: &CaptureSink) -> ClientLog {
        let owner = Owner::named("tests::client");
        let handle = |severity| {
            Arc::new(ChannelLogger::template(
                severity,
                owner.clone(),
                Arc::new(sink.clone()),
                Arc::new(FixedClock::default()),
                Metrics::new(),
            ))
        };
        ClientLog::new(handle(Severity::Debug), handle(Severity::Info))
    }

    #[test]
    fn test_rest_client_access() {
        let sink = CaptureSink::new();
        client_log(&sink).log_rest_client_access("GET /vertices");
        let events = sink.captured();
        assert_eq!(events[0].severity, Severity::Info);
        assert_eq!(events[0].text, "Rest client access GET /vertices");
    }

    #[test]
    fn test_client_debug_uses_raw_pattern() {
        let sink = CaptureSink::new();
        client_log(&sink).log_client_debug("retrying {} of {}", &[&2, &5]);
        let events = sink.captured();
        assert_eq!(events[0].severity, Severity::Debug);
        assert_eq!(events[0].text, "retrying 2 of 5");
    }
}
