//! Eviction Policy Module
//!
//! Defines the victim-selection capability used by the cache under
//! capacity pressure, with three implementations: LRU, FIFO, and LFU.
//!
//! Policies track keys only. The cache's key→item map owns the values;
//! the map/policy consistency invariant (every mapped key has exactly one
//! tracking entry, and vice versa) lets `evict` return just the key and
//! the cache resolve the item from the map.

use std::str::FromStr;

mod fifo;
mod lfu;
mod lru;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;

// == Eviction Policy Trait ==
/// Victim-selection strategy for a bounded cache.
///
/// The cache calls `update` on every set, `access` on every successful
/// get of a live entry, and `remove` whenever a key leaves the cache for
/// any reason. Policies hold no synchronization of their own; the cache
/// mutates the policy and its map under a single lock.
pub trait EvictionPolicy<K>: Send + Sync {
    /// Registers a new key, or refreshes an existing key's tracking
    /// metadata in a policy-specific way.
    fn update(&mut self, key: &K);

    /// Records an access to a live key. May reorder (LRU), increment
    /// a frequency (LFU), or do nothing (FIFO).
    fn access(&mut self, key: &K);

    /// Drops all tracking state for a key. Removing an unknown key is a
    /// no-op.
    fn remove(&mut self, key: &K);

    /// Selects and removes exactly one victim key under the policy's
    /// rule. Returns `None` when no keys are tracked.
    fn evict(&mut self) -> Option<K>;

    /// Returns the number of tracked keys.
    fn len(&self) -> usize;

    /// Returns true if no keys are tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Policy Kind ==
/// Selects which eviction policy a cache is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    /// Least recently used: victim = key least recently set or accessed
    #[default]
    Lru,
    /// First in, first out: victim = oldest-inserted key, access ignored
    Fifo,
    /// Least frequently used: victim = key with the lowest access count
    Lfu,
}

impl PolicyKind {
    /// Parses a policy name, falling back to LRU on an unrecognized
    /// value.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!("unrecognized eviction policy {name:?}, falling back to LRU");
            PolicyKind::Lru
        })
    }
}

impl FromStr for PolicyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LRU" => Ok(PolicyKind::Lru),
            "FIFO" => Ok(PolicyKind::Fifo),
            "LFU" => Ok(PolicyKind::Lfu),
            _ => Err(()),
        }
    }
}

// == Policy Construction ==
/// Builds a boxed policy instance for the given kind.
pub(crate) fn build_policy<K>(kind: PolicyKind) -> Box<dyn EvictionPolicy<K>>
where
    K: Eq + std::hash::Hash + Clone + Send + Sync + 'static,
{
    match kind {
        PolicyKind::Lru => Box::new(LruPolicy::new()),
        PolicyKind::Fifo => Box::new(FifoPolicy::new()),
        PolicyKind::Lfu => Box::new(LfuPolicy::new()),
    }
}
