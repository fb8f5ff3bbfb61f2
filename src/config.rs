//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::policy::PolicyKind;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold (must be > 0)
    pub capacity: usize,
    /// Eviction policy used under capacity pressure
    pub policy: PolicyKind,
    /// Background cleanup interval; `None` or zero disables the cleaner
    pub cleanup_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_EVICTION_POLICY` - One of LRU, FIFO, LFU (default: LRU;
    ///   unrecognized names fall back to LRU with a warning)
    /// - `CACHE_CLEANUP_INTERVAL_SECS` - Cleanup frequency in seconds
    ///   (default: 1; 0 disables the background cleaner)
    pub fn from_env() -> Self {
        let cleanup_secs: u64 = env::var("CACHE_CLEANUP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            policy: env::var("CACHE_EVICTION_POLICY")
                .ok()
                .map(|v| PolicyKind::from_name(&v))
                .unwrap_or_default(),
            cleanup_interval: (cleanup_secs > 0).then(|| Duration::from_secs(cleanup_secs)),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            policy: PolicyKind::Lru,
            cleanup_interval: Some(Duration::from_secs(1)),
        }
    }
}
