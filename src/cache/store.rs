//! Cache Store Module
//!
//! The synchronous cache core: a key→item map bound to one eviction
//! policy, with capacity enforcement, lazy TTL checks, and expired-entry
//! sweeping. `Cache` wraps a `CacheStore` in a lock for concurrent use.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::cache::{CacheItem, Metrics, MetricsSnapshot};
use crate::error::{CacheError, Result};
use crate::policy::{build_policy, EvictionPolicy, PolicyKind};

// == Cache Store ==
/// Single-writer cache core combining the item map with an eviction
/// policy and TTL expiration.
///
/// The map and the policy's tracking state form one logical unit: they
/// are only ever mutated together, so every mapped key has exactly one
/// tracking entry in the policy and vice versa.
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheItem<V>>,
    /// Victim-selection strategy
    policy: Box<dyn EvictionPolicy<K>>,
    /// Performance counters
    metrics: Arc<Metrics>,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and policy.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize, policy: PolicyKind) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            entries: HashMap::new(),
            policy: build_policy(policy),
            metrics: Arc::new(Metrics::new()),
            capacity,
        })
    }

    // == Set ==
    /// Stores a key-value pair with an optional TTL.
    ///
    /// A fresh item replaces any prior item for the same key; a `ttl` of
    /// `None` or zero means the item never expires. If the insertion
    /// pushed the store over capacity, exactly one victim is evicted and
    /// returned so the caller can dispatch its eviction callback.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) -> Option<(K, V)> {
        self.policy.update(&key);
        self.entries.insert(key, CacheItem::new(value, ttl));

        let mut evicted = None;
        if self.entries.len() > self.capacity {
            evicted = self.evict_one();
        }

        self.metrics.set_live(self.entries.len());
        debug_assert_eq!(self.entries.len(), self.policy.len());
        evicted
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An absent key is a miss. A present-but-expired item is also a miss
    /// and is *not* removed here: lazy expiration only hides the entry,
    /// leaving removal to the sweep, a colliding set, or capacity
    /// eviction. A live hit notifies the policy.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(item) if !item.is_expired() => {
                self.policy.access(key);
                self.metrics.record_hit();
                Some(item.value.clone())
            }
            _ => {
                self.metrics.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether an entry was removed; deleting an unknown key is a
    /// silent no-op. An explicit delete is not an eviction: the caller
    /// must not fire the eviction callback for it.
    pub fn delete(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.policy.remove(key);
        self.metrics.set_live(self.entries.len());
        removed
    }

    // == Sweep Expired ==
    /// Removes all currently-expired entries from the map and policy.
    ///
    /// Returns the removed pairs so the caller can dispatch eviction
    /// callbacks. Sweep removals do not advance the eviction counter,
    /// which tracks capacity pressure only.
    pub fn sweep_expired(&mut self) -> Vec<(K, V)> {
        let stale: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, item)| item.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let mut removed = Vec::with_capacity(stale.len());
        for key in stale {
            if let Some(item) = self.entries.remove(&key) {
                self.policy.remove(&key);
                removed.push((key, item.value));
            }
        }

        self.metrics.set_live(self.entries.len());
        removed
    }

    // == Evict One ==
    /// Asks the policy for a victim and removes it from the map.
    ///
    /// The consistency invariant makes a victimless answer (or a victim
    /// missing from the map) unreachable; if it happens anyway the
    /// divergence is surfaced loudly rather than swallowed.
    fn evict_one(&mut self) -> Option<(K, V)> {
        let Some(victim) = self.policy.evict() else {
            error!("over capacity but the eviction policy tracks no keys");
            debug_assert!(false, "map/policy bookkeeping diverged: no victim");
            return None;
        };

        match self.entries.remove(&victim) {
            Some(item) => {
                self.metrics.record_eviction();
                Some((victim, item.value))
            }
            None => {
                error!("eviction victim missing from the item map");
                debug_assert!(false, "map/policy bookkeeping diverged: stale victim");
                None
            }
        }
    }

    // == Metrics ==
    /// Returns a snapshot of the performance counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Returns a handle to the shared counters for lock-free reads.
    pub(crate) fn metrics_handle(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    // == Length ==
    /// Returns the current number of entries, live or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the fixed capacity the store was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
