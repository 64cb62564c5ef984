//! Admission Gate Module
//!
//! Thread-safe token-bucket admission gate over an injected clock.

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::limiter::{Bucket, Clock, SystemClock};

// == Limiter Stats ==
/// Admission counters for a `Limiter`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LimiterStats {
    /// Calls that were granted
    pub admitted: u64,
    /// Calls that were refused
    pub denied: u64,
}

#[derive(Debug)]
struct State {
    bucket: Bucket,
    stats: LimiterStats,
}

// == Limiter ==
/// Token-bucket rate limiter.
///
/// The bucket starts full and refills continuously at `refill_rate` tokens
/// per second up to `capacity`. Decisions are immediate; nothing blocks
/// waiting for tokens.
///
/// ```
/// use std::time::Duration;
/// use recency_gate::{Limiter, ManualClock};
///
/// let clock = ManualClock::new();
/// let limiter = Limiter::with_clock(2.0, 1.0, clock.clone()).unwrap();
/// assert!(limiter.allow());
/// assert!(limiter.allow());
/// assert!(!limiter.allow());
///
/// clock.advance(Duration::from_secs(1));
/// assert!(limiter.allow());
/// ```
#[derive(Debug)]
pub struct Limiter<C = SystemClock> {
    state: Mutex<State>,
    clock: C,
    /// Maximum tokens (burst size)
    capacity: f64,
    /// Tokens added per second
    refill_rate: f64,
}

impl Limiter<SystemClock> {
    // == Constructor ==
    /// Creates a full limiter driven by monotonic system time.
    ///
    /// # Errors
    /// `Error::InvalidArgument` if `capacity` or `refill_rate` is negative,
    /// NaN or infinite.
    pub fn new(capacity: f64, refill_rate: f64) -> Result<Self> {
        Self::with_clock(capacity, refill_rate, SystemClock::new())
    }
}

impl<C: Clock> Limiter<C> {
    // == Constructor With Clock ==
    /// Creates a full limiter reading time from `clock`.
    ///
    /// # Errors
    /// `Error::InvalidArgument` if `capacity` or `refill_rate` is negative,
    /// NaN or infinite.
    pub fn with_clock(capacity: f64, refill_rate: f64, clock: C) -> Result<Self> {
        validate_non_negative("limiter capacity", capacity)?;
        validate_non_negative("limiter refill rate", refill_rate)?;

        debug!(capacity, refill_rate, "limiter created");

        let bucket = Bucket::new(capacity, refill_rate, clock.now());
        Ok(Self {
            state: Mutex::new(State {
                bucket,
                stats: LimiterStats::default(),
            }),
            clock,
            capacity,
            refill_rate,
        })
    }

    // == Allow ==
    /// Tries to spend one token.
    pub fn allow(&self) -> bool {
        self.allow_n(1.0)
    }

    // == Allow N ==
    /// Tries to spend `cost` tokens.
    ///
    /// Returns false when the balance is short, when `cost` exceeds capacity,
    /// on a zero-capacity limiter, and for negative or NaN costs. The refill
    /// computed for this call is kept even when it is denied.
    pub fn allow_n(&self, cost: f64) -> bool {
        // Read under the lock so readings reach the bucket in order
        let mut state = self.state.lock();
        let now = self.clock.now();

        let admitted = state.bucket.try_consume(cost, now);
        if admitted {
            state.stats.admitted += 1;
        } else {
            state.stats.denied += 1;
            trace!(cost, tokens = state.bucket.tokens(), "admission denied");
        }
        admitted
    }

    // == Tokens ==
    /// Refreshes the balance against the clock and returns it.
    ///
    /// The refresh is stored, exactly as an admission check would store it.
    pub fn tokens(&self) -> f64 {
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.bucket.refill(now);
        state.bucket.tokens()
    }

    // == Stats ==
    pub fn stats(&self) -> LimiterStats {
        self.state.lock().stats.clone()
    }

    // == Accessors ==
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn refill_rate(&self) -> f64 {
        self.refill_rate
    }

    /// Returns the clock this limiter reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn validate_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{} must be a finite number >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}
