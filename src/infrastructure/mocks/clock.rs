//! Mock clock for testing.

use crate::application::ports::Clock;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// Mock clock for testing.
///
/// Allows tests to control the audit timestamp explicitly, enabling
/// deterministic assertions on the `datetime` field.
///
/// # Thread Safety
///
/// `FixedClock` is thread-safe and can be cloned to share across threads.
/// All clones share the same underlying time value.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current_time: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    /// Create a clock fixed at a specific time.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self
            .current_time
            .lock()
            .expect("FixedClock mutex poisoned - a test thread panicked while holding the lock");
        *time += duration;
    }

    /// Set the clock to a specific time.
    pub fn set(&self, time: DateTime<Utc>) {
        let mut current = self
            .current_time
            .lock()
            .expect("FixedClock mutex poisoned - a test thread panicked while holding the lock");
        *current = time;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self
            .current_time
            .lock()
            .expect("FixedClock mutex poisoned - a test thread panicked while holding the lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let clock = FixedClock::new(start);

        assert_eq!(clock.now_utc(), start);

        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now_utc(), start + Duration::seconds(90));

        let later = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.now_utc(), later);
    }
}
