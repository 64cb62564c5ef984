//! Recency Gate - bounded caching and rate limiting primitives
//!
//! Provides a thread-safe LRU cache and a token-bucket rate limiter with an
//! injectable clock. Both are plain in-process types meant to be shared
//! through an `Arc`.

pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;

pub use cache::{CacheStats, CacheStore};
pub use config::Config;
pub use error::{Error, Result};
pub use limiter::{Clock, Limiter, LimiterStats, ManualClock, SystemClock};
