//! Timestamp source abstraction
//!
//! Components take `now: i64` parameters (Unix seconds); only the facade
//! consults a clock, and it clamps successive readings so order timestamps
//! are monotonically non-decreasing even if the host clock steps backwards.

use parking_lot::Mutex;
use std::sync::Arc;

/// A source of Unix-second timestamps
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall-clock time via chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A settable clock for tests
///
/// Cloneable; clones share the same instant, so a test can keep a handle
/// and advance time while the exchange owns another handle.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<i64>>,
}

impl ManualClock {
    /// Create a clock pinned at `now`
    pub fn starting_at(now: i64) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Set the current instant
    pub fn set(&self, now: i64) {
        *self.now.lock() = now;
    }

    /// Move the instant forward by `seconds`
    pub fn advance(&self, seconds: i64) {
        *self.now.lock() += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_plausible() {
        // 2020-01-01 as a sanity floor
        assert!(SystemClock.now() > 1_577_836_800);
    }

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::starting_at(1_000);
        assert_eq!(clock.now(), 1_000);

        clock.advance(60);
        assert_eq!(clock.now(), 1_060);

        clock.set(500);
        assert_eq!(clock.now(), 500);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(10);
        let handle = clock.clone();
        handle.advance(5);
        assert_eq!(clock.now(), 15);
    }
}
