//! Error types for the cache and limiter primitives
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for the crate.
///
/// Only construction can fail. Cache misses and limiter denials are
/// reported as `Option`/`bool` results, never through this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A constructor or configuration parameter is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;
