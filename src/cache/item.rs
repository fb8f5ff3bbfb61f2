//! Cache Item Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Item ==
/// Represents a single cache entry with value and expiration metadata.
///
/// The key is not duplicated here; the owning map's key is the entry's
/// identity. An item with no expiration (`expires_at == None`) never
/// expires.
#[derive(Debug, Clone)]
pub struct CacheItem<V> {
    /// The stored value
    pub value: V,
    /// Creation instant
    pub created_at: Instant,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<V> CacheItem<V> {
    // == Constructor ==
    /// Creates a new cache item with an optional TTL.
    ///
    /// A `ttl` of `None` or `Duration::ZERO` produces an item that never
    /// expires.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let now = Instant::now();
        let expires_at = ttl.filter(|d| !d.is_zero()).map(|d| now + d);

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the item has expired.
    ///
    /// An item is expired iff it has an expiration and that instant is
    /// strictly in the past. An item without an expiration never expires.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() > at,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the item has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}
