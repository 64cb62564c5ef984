//! Cache Module
//!
//! Provides a bounded, thread-safe in-memory cache with LRU eviction.
//!
//! Recency bookkeeping is internal to `CacheStore`:
//!
//! ```compile_fail
//! use recency_gate::cache::RecencyList;
//! ```
//!
//! ```compile_fail
//! use recency_gate::cache::Entry;
//! ```

mod entry;
mod lru;
mod stats;
mod store;


// Crate-internal building blocks
pub(crate) use entry::Entry;
pub(crate) use lru::RecencyList;

// Re-export public types
pub use stats::CacheStats;
pub use store::CacheStore;
