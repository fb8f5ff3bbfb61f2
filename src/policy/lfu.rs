//! LFU Policy Module
//!
//! Implements least-frequently-used victim selection.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::policy::EvictionPolicy;

// == LFU Policy ==
/// Tracks per-key access counts for LFU eviction.
///
/// A key's count starts at 1 when it is first set and increments on every
/// access; re-setting an existing key does not reset its count. Ties on
/// the minimum count are broken deterministically: the earliest-arrived
/// key among the least-frequent wins, tracked by a separate arrival
/// order.
#[derive(Debug, Default)]
pub struct LfuPolicy<K> {
    /// Access count per tracked key
    counts: HashMap<K, u64>,
    /// Keys in arrival order, for deterministic tie-breaking
    arrival: VecDeque<K>,
}

impl<K> LfuPolicy<K> {
    // == Constructor ==
    /// Creates a new empty LFU policy.
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            arrival: VecDeque::new(),
        }
    }
}

impl<K> LfuPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Returns the tracked access count for a key, if any.
    pub fn count(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Eq + Hash + Clone + Send + Sync,
{
    fn update(&mut self, key: &K) {
        // First set counts as one use; overwrites keep the existing count
        if !self.counts.contains_key(key) {
            self.counts.insert(key.clone(), 1);
            self.arrival.push_back(key.clone());
        }
    }

    fn access(&mut self, key: &K) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
        }
    }

    fn remove(&mut self, key: &K) {
        if self.counts.remove(key).is_some() {
            self.arrival.retain(|k| k != key);
        }
    }

    fn evict(&mut self) -> Option<K> {
        let victim = self
            .arrival
            .iter()
            .min_by_key(|k| self.counts.get(*k).copied().unwrap_or(0))
            .cloned()?;

        self.counts.remove(&victim);
        self.arrival.retain(|k| k != &victim);
        Some(victim)
    }

    fn len(&self) -> usize {
        self.counts.len()
    }
}
