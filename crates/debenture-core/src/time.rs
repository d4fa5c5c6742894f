//! Time source abstraction.
//!
//! The ledger consumes "current time" as a given primitive. Production
//! code uses [`SystemClock`]; tests use [`ManualClock`] to advance time
//! deterministically across claim periods and maturity boundaries.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock whose time only moves when told to.
///
/// # Example
///
/// ```rust
/// use debenture_core::time::{Clock, ManualClock};
/// use chrono::Duration;
///
/// let clock = ManualClock::starting_now();
/// let before = clock.now();
/// clock.advance(Duration::days(30));
/// assert_eq!(clock.now() - before, Duration::days(30));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a manual clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Creates a manual clock frozen at the current wall-clock time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        *self.now.lock() += delta;
    }

    /// Sets the clock to an absolute time.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
