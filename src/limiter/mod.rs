//! Limiter Module
//!
//! Provides a token-bucket rate limiter with an injectable clock.
//!
//! The bucket arithmetic stays private to the crate; a balance can only be
//! created through the validating `Limiter` constructors:
//!
//! ```compile_fail
//! use recency_gate::limiter::Bucket;
//! ```

mod bucket;
mod clock;
mod gate;

#[cfg(test)]
mod property_tests;

// Crate-internal building blocks
pub(crate) use bucket::Bucket;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use gate::{Limiter, LimiterStats};
