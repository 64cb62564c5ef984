//! Clock Module
//!
//! Time sources for the limiter. Readings are offsets from an arbitrary
//! epoch; only differences between readings matter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// == Clock Trait ==
/// A capability providing "current time".
///
/// Readings are not required to be monotonic. The limiter treats a reading
/// earlier than the previous one as zero elapsed time.
pub trait Clock: Send + Sync {
    /// Returns the current reading.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

// == System Clock ==
/// Monotonic system time, read as the time elapsed since the clock was
/// created.
///
/// Built on `Instant`, so stepping the wall clock (NTP, an operator) does
/// not move it.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    anchor: Instant,
}

impl SystemClock {
    // == Constructor ==
    /// Creates a clock reading zero now.
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.anchor.elapsed()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to the limiter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    // == Constructor ==
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock reading `start`.
    pub fn starting_at(start: Duration) -> Self {
        let clock = Self::new();
        clock.set(start);
        clock
    }

    // == Advance ==
    /// Moves the clock forward by `by`, saturating at the maximum reading.
    pub fn advance(&self, by: Duration) {
        let delta = duration_to_nanos(by);
        // fetch_update only fails when the closure returns None
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_add(delta))
            });
    }

    // == Rewind ==
    /// Moves the clock backward by `by`, stopping at zero.
    pub fn rewind(&self, by: Duration) {
        let delta = duration_to_nanos(by);
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(delta))
            });
    }

    // == Set ==
    /// Jumps the clock to `to`, forward or backward.
    pub fn set(&self, to: Duration) {
        self.nanos.store(duration_to_nanos(to), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
