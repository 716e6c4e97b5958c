//! # Clock Seam
//!
//! Working-branch names embed a unix-millisecond timestamp to guarantee
//! uniqueness across publish attempts. Code that names branches takes a
//! [`Clock`] so tests can pin or step time and assert on exact names.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

/// Source of the current time for branch naming and publish timestamps.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds since the unix epoch, as embedded in branch names.
    fn unix_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall-clock time. The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests.
///
/// Holds milliseconds since the epoch; `advance_millis` steps time forward
/// so successive publishes observe distinct timestamps.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given unix-millisecond instant.
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(start_millis),
        }
    }

    /// Move the clock forward.
    pub fn advance_millis(&self, delta: i64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }

    /// Pin the clock to an exact instant.
    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.millis.load(Ordering::SeqCst);
        // Out-of-range millis cannot be produced by `new`/`advance_millis`
        // in any realistic test; fall back to the epoch rather than panic.
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    fn unix_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
