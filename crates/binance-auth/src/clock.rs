//! Time sources for request timestamps
//!
//! Signed requests carry a `timestamp` parameter in milliseconds since the
//! Unix epoch. The server rejects requests whose timestamp falls outside
//! `recvWindow`, so the clock is injected rather than read ad hoc.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    /// Current time in milliseconds
    fn now_millis(&self) -> i64;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

/// Wall-clock time for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

/// Clock frozen at a given instant
///
/// Used for reproducible signatures in tests and for replaying recorded
/// requests. The instant can be moved with [`FixedClock::set`].
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Move the clock to a new instant
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Advance the clock by `delta` milliseconds
    pub fn advance(&self, delta: i64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
