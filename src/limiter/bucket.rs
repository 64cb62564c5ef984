//! Token Bucket Module
//!
//! Refill and spend arithmetic for a single bucket. Time is passed in, so
//! this type has no clock and no locking.

use std::time::Duration;

// == Bucket ==
/// Token balance with linear refill up to a hard ceiling.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bucket {
    /// Maximum tokens (burst size)
    capacity: f64,
    /// Tokens added per second
    refill_rate: f64,
    /// Current balance, always within [0, capacity]
    tokens: f64,
    /// Clock reading of the last refresh
    last_refill: Duration,
}

impl Bucket {
    // == Constructor ==
    /// Creates a full bucket whose refill clock starts at `now`.
    ///
    /// Callers validate `capacity` and `refill_rate` as finite and >= 0.
    pub fn new(capacity: f64, refill_rate: f64, now: Duration) -> Self {
        Self {
            capacity,
            refill_rate,
            tokens: capacity,
            last_refill: now,
        }
    }

    // == Refill ==
    /// Credits `elapsed * refill_rate` tokens, capped at capacity, and
    /// stores `now` as the new refresh time.
    ///
    /// A reading earlier than the last one counts as zero elapsed time.
    pub fn refill(&mut self, now: Duration) {
        let elapsed = now.saturating_sub(self.last_refill);

        let added = elapsed.as_secs_f64() * self.refill_rate;
        self.tokens = (self.tokens + added).min(self.capacity);
        self.last_refill = now;
    }

    // == Try Consume ==
    /// Refills at `now`, then spends `cost` tokens if the balance covers it.
    ///
    /// A zero-capacity bucket admits nothing, not even zero-cost work.
    /// Negative and NaN costs are refused. The refill is kept either way.
    pub fn try_consume(&mut self, cost: f64, now: Duration) -> bool {
        self.refill(now);

        if self.capacity == 0.0 || cost.is_nan() || cost < 0.0 {
            return false;
        }

        if self.tokens >= cost {
            // max() guards against rounding below zero
            self.tokens = (self.tokens - cost).max(0.0);
            true
        } else {
            false
        }
    }

    // == Accessors ==
    pub fn tokens(&self) -> f64 {
        self.tokens
    }

    #[cfg(test)]
    pub fn last_refill(&self) -> Duration {
        self.last_refill
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const T0: Duration = Duration::from_secs(100);

    #[test]
    fn test_bucket_starts_full() {
        let bucket = Bucket::new(5.0, 1.0, T0);
        assert_eq!(bucket.tokens(), 5.0);
        assert_eq!(bucket.last_refill(), T0);
    }

    #[test]
    fn test_refill_is_linear_and_capped() {
        let mut bucket = Bucket::new(10.0, 2.0, T0);
        assert!(bucket.try_consume(10.0, T0));

        bucket.refill(T0 + Duration::from_millis(1500));
        assert_eq!(bucket.tokens(), 3.0);

        bucket.refill(T0 + Duration::from_secs(60));
        assert_eq!(bucket.tokens(), 10.0);
    }

    #[test]
    fn test_backward_reading_credits_nothing() {
        let mut bucket = Bucket::new(10.0, 1.0, T0);
        assert!(bucket.try_consume(10.0, T0));

        let rewound = T0 - Duration::from_secs(30);
        bucket.refill(rewound);
        assert_eq!(bucket.tokens(), 0.0);
        assert_eq!(bucket.last_refill(), rewound);

        // Elapsed time is measured from the rewound reading
        bucket.refill(rewound + Duration::from_secs(4));
        assert_eq!(bucket.tokens(), 4.0);
    }

    #[test]
    fn test_denial_after_rewind_stores_timestamp() {
        let mut bucket = Bucket::new(2.0, 1.0, T0);
        assert!(bucket.try_consume(2.0, T0));

        let rewound = T0 - Duration::from_secs(60);
        assert!(!bucket.try_consume(1.0, rewound));
        assert_eq!(bucket.last_refill(), rewound);
    }

    #[test]
    fn test_denial_keeps_refill() {
        let mut bucket = Bucket::new(4.0, 1.0, T0);
        assert!(bucket.try_consume(4.0, T0));

        assert!(!bucket.try_consume(3.0, T0 + Duration::from_secs(2)));
        assert_eq!(bucket.tokens(), 2.0);

        assert!(bucket.try_consume(3.0, T0 + Duration::from_secs(3)));
        assert_eq!(bucket.tokens(), 0.0);
    }

    #[test]
    fn test_zero_capacity_denies_zero_cost() {
        let mut bucket = Bucket::new(0.0, 5.0, T0);
        assert!(!bucket.try_consume(0.0, T0 + Duration::from_secs(10)));
        assert_eq!(bucket.tokens(), 0.0);
    }

    #[test]
    fn test_invalid_costs_are_refused() {
        let mut bucket = Bucket::new(3.0, 0.0, T0);

        assert!(!bucket.try_consume(-1.0, T0));
        assert!(!bucket.try_consume(f64::NAN, T0));
        assert_eq!(bucket.tokens(), 3.0);
    }

    #[test]
    fn test_zero_cost_admitted_when_empty() {
        let mut bucket = Bucket::new(1.0, 0.0, T0);
        assert!(bucket.try_consume(1.0, T0));
        assert!(bucket.try_consume(0.0, T0));
    }
}
