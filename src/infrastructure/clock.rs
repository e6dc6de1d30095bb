//! Clock adapters for audit timestamps.
//!
//! Provides `SystemClock` for production use.
//!
//! # Testing
//!
//! See `FixedClock` (in `crate::infrastructure::mocks`) for a controllable
//! test clock. Available with the `test-helpers` feature or in test builds.

use crate::application::ports::Clock;
use chrono::{DateTime, Utc};

/// System clock implementation using `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
