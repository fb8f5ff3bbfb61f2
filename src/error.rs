//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Lookup misses and deletes of unknown keys are normal outcomes reported
//! through `Option`/`bool` return values, not errors. The only real failure
//! mode is construction-time misconfiguration.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache was constructed with a capacity of zero
    #[error("invalid capacity: {0} (capacity must be greater than zero)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
