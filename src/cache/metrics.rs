//! Cache Metrics Module
//!
//! Tracks cache performance counters: hits, misses, evictions, and the
//! current number of live entries.
//!
//! Counters are plain atomics so they can be read and incremented
//! concurrently without taking the cache lock.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Metrics ==
/// Lock-free cache performance counters.
///
/// Hits, misses, and evictions increase monotonically; `live` is a gauge
/// updated by the store after every mutation.
#[derive(Debug, Default)]
pub struct Metrics {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    live: AtomicU64,
}

impl Metrics {
    /// Creates a new Metrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    // == Set Live ==
    /// Updates the live-entry gauge.
    pub fn set_live(&self, count: usize) {
        self.live.store(count as u64, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            live_count: self.live.load(Ordering::Relaxed),
        }
    }
}

// == Metrics Snapshot ==
/// A consistent point-in-time view of the cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted under capacity pressure
    pub evictions: u64,
    /// Current number of live entries in the cache
    pub live_count: u64,
}

impl MetricsSnapshot {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
