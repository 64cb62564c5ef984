//! Property-Based Tests for Limiter Module
//!
//! Drives the limiter with arbitrary costs and clock movements.

use proptest::prelude::*;
use std::time::Duration;

use crate::limiter::{Limiter, ManualClock};

#[derive(Debug, Clone)]
enum Step {
    Advance(u64),
    Rewind(u64),
    AllowN(f64),
    Observe,
}

/// Millisecond clock moves mixed with admissions, including invalid costs
fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u64..5_000).prop_map(Step::Advance),
        (0u64..5_000).prop_map(Step::Rewind),
        (0.0f64..12.0).prop_map(Step::AllowN),
        Just(Step::AllowN(-1.0)),
        Just(Step::AllowN(f64::NAN)),
        Just(Step::Observe),
    ]
}

fn fresh(capacity: f64, refill_rate: f64) -> (Limiter<ManualClock>, ManualClock) {
    let clock = ManualClock::starting_at(Duration::from_secs(10_000));
    let limiter = Limiter::with_clock(capacity, refill_rate, clock.clone()).unwrap();
    (limiter, clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // **Property 1: Balance Bounds**
    // *For any* sequence of calls and clock behaviour, including backward
    // jumps, 0 <= tokens() <= capacity SHALL hold at every observation.
    #[test]
    fn prop_balance_bounds(
        capacity in 0.0f64..10.0,
        refill_rate in 0.0f64..50.0,
        steps in prop::collection::vec(step_strategy(), 1..80)
    ) {
        let (limiter, clock) = fresh(capacity, refill_rate);

        for step in steps {
            match step {
                Step::Advance(ms) => clock.advance(Duration::from_millis(ms)),
                Step::Rewind(ms) => clock.rewind(Duration::from_millis(ms)),
                Step::AllowN(cost) => {
                    limiter.allow_n(cost);
                }
                Step::Observe => {}
            }
            let tokens = limiter.tokens();
            prop_assert!(tokens >= 0.0, "balance {} went negative", tokens);
            prop_assert!(tokens <= capacity, "balance {} exceeds capacity {}", tokens, capacity);
        }
    }

    // **Property 2: Unsatisfiable Cost**
    // *For any* cost above capacity, allow_n SHALL return false regardless of
    // elapsed time.
    #[test]
    fn prop_cost_above_capacity_denied(
        capacity in 0.0f64..10.0,
        excess in 0.001f64..10.0,
        refill_rate in 0.0f64..100.0,
        waits in prop::collection::vec(0u64..100_000, 1..10)
    ) {
        let (limiter, clock) = fresh(capacity, refill_rate);

        for ms in waits {
            clock.advance(Duration::from_millis(ms));
            prop_assert!(!limiter.allow_n(capacity + excess));
        }
    }

    // **Property 3: Zero Capacity**
    // *For any* refill rate, a zero-capacity limiter SHALL deny every call.
    #[test]
    fn prop_zero_capacity_denies(
        refill_rate in 0.0f64..1_000.0,
        steps in prop::collection::vec(step_strategy(), 1..40)
    ) {
        let (limiter, clock) = fresh(0.0, refill_rate);

        for step in steps {
            match step {
                Step::Advance(ms) => clock.advance(Duration::from_millis(ms)),
                Step::Rewind(ms) => clock.rewind(Duration::from_millis(ms)),
                Step::AllowN(cost) => {
                    prop_assert!(!limiter.allow_n(cost));
                }
                Step::Observe => {
                    prop_assert!(!limiter.allow());
                }
            }
        }
    }

    // **Property 4: Burst Size**
    // *For any* integral capacity, exactly `capacity` unit admissions SHALL
    // succeed at a single instant.
    #[test]
    fn prop_burst_equals_capacity(capacity in 0u32..50, refill_rate in 0.0f64..10.0) {
        let (limiter, _clock) = fresh(f64::from(capacity), refill_rate);

        let admitted = (0..capacity + 5).filter(|_| limiter.allow()).count();
        prop_assert_eq!(admitted, capacity as usize);
    }
}
