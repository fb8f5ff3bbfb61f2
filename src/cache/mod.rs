//! Cache Module
//!
//! Provides in-memory caching with pluggable eviction policies and TTL
//! expiration.
//!
//! [`CacheStore`] is the synchronous single-writer core; [`Cache`] wraps
//! it for concurrent use behind a single lock and owns the optional
//! background cleanup task.

mod item;
mod metrics;
mod store;


// Re-export public types
pub use item::CacheItem;
pub use metrics::{Metrics, MetricsSnapshot};
pub use store::CacheStore;

use std::hash::Hash;
use std::sync::{Arc, Mutex, RwLock as StdRwLock};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{spawn_cleanup_task, CleanerHandle};

/// Callback invoked with the evicted key and value whenever an entry is
/// removed by capacity pressure or by the expiration sweep.
pub type EvictCallback<K, V> = Arc<dyn Fn(K, V) + Send + Sync + 'static>;

/// Shared slot holding the registered eviction callback, if any.
pub(crate) type EvictCallbackSlot<K, V> = Arc<StdRwLock<Option<EvictCallback<K, V>>>>;

// == Cache ==
/// Concurrency-safe cache handle.
///
/// Cloning a `Cache` yields another handle to the same underlying store;
/// handles can be shared freely across tasks and threads. The item map
/// and the eviction policy's bookkeeping are guarded together by a single
/// lock, so their mutual consistency is never observable mid-update.
/// Counters are separate atomics and never contend with cache
/// operations.
pub struct Cache<K, V> {
    /// Store guarded as one unit: map + policy mutate together
    store: Arc<RwLock<CacheStore<K, V>>>,
    /// Lock-free handle to the store's counters
    metrics: Arc<Metrics>,
    /// Registered eviction callback; last registration wins
    on_evict: EvictCallbackSlot<K, V>,
    /// Background cleaner, present until `stop` takes it
    cleaner: Arc<Mutex<Option<CleanerHandle>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a new cache from the given configuration.
    ///
    /// When `cleanup_interval` is set to a non-zero duration, a
    /// background cleanup task is spawned; this requires a running Tokio
    /// runtime. With no interval the cache relies solely on lazy
    /// miss-on-read and capacity eviction.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` when the configured capacity
    /// is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        let store = CacheStore::new(config.capacity, config.policy)?;
        let metrics = store.metrics_handle();
        let store = Arc::new(RwLock::new(store));
        let on_evict: EvictCallbackSlot<K, V> = Arc::new(StdRwLock::new(None));

        let cleaner = config
            .cleanup_interval
            .filter(|interval| !interval.is_zero())
            .map(|interval| {
                spawn_cleanup_task(Arc::clone(&store), Arc::clone(&on_evict), interval)
            });

        Ok(Self {
            store,
            metrics,
            on_evict,
            cleaner: Arc::new(Mutex::new(cleaner)),
        })
    }

    // == Set ==
    /// Stores a key-value pair with an optional TTL.
    ///
    /// A `ttl` of `None` or zero means the entry never expires. If the
    /// insertion pushed the cache over capacity, exactly one entry is
    /// evicted and the eviction callback (if registered) is invoked with
    /// it after the lock is released.
    pub async fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        let evicted = {
            let mut store = self.store.write().await;
            store.set(key, value, ttl)
        };

        if let Some((key, value)) = evicted {
            self.notify_evicted(key, value);
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` for absent keys and for entries whose TTL has
    /// passed; an expired entry is hidden, not removed. Takes the write
    /// lock because a hit updates the policy's tracking metadata.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.store.write().await.get(key)
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Deleting an unknown key is a no-op. Explicit deletion never
    /// invokes the eviction callback.
    pub async fn delete(&self, key: &K) {
        self.store.write().await.delete(key);
    }

    // == On Evict ==
    /// Registers the eviction callback.
    ///
    /// The callback is invoked with the removed key and value whenever an
    /// entry is evicted under capacity pressure or removed by the
    /// expiration sweep — never for an explicit `delete`. Exactly one
    /// callback is held; the last registration wins.
    ///
    /// Callbacks run outside the cache lock, so re-entering the cache
    /// from a callback is allowed. Dispatch is fire-and-forget: a
    /// panicking callback is the caller's responsibility.
    pub fn on_evict<F>(&self, hook: F)
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        *self.on_evict.write().expect("eviction callback lock poisoned") = Some(Arc::new(hook));
    }

    // == Metrics ==
    /// Returns a snapshot of the hit/miss/eviction counters and the live
    /// entry count. Reads atomics only; never blocks cache operations.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    // == Length ==
    /// Returns the current number of entries, live or stale.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Stop ==
    /// Shuts down the background cleanup task.
    ///
    /// Signals the cleaner and waits for its current iteration (if any)
    /// to finish; after this returns, no further cleaner-driven mutation
    /// can occur. Calling `stop` again, or on a cache built without a
    /// cleanup interval, is a no-op.
    pub async fn stop(&self) {
        let handle = self
            .cleaner
            .lock()
            .expect("cleaner handle lock poisoned")
            .take();

        if let Some(handle) = handle {
            handle.shutdown().await;
        }
    }

    /// Invokes the registered eviction callback, if any.
    fn notify_evicted(&self, key: K, value: V) {
        let hook = self
            .on_evict
            .read()
            .expect("eviction callback lock poisoned")
            .clone();
        if let Some(hook) = hook {
            hook(key, value);
        }
    }
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
            on_evict: Arc::clone(&self.on_evict),
            cleaner: Arc::clone(&self.cleaner),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(capacity: usize, policy: PolicyKind) -> CacheConfig {
        CacheConfig {
            capacity,
            policy,
            cleanup_interval: None,
        }
    }

    #[tokio::test]
    async fn test_cache_set_get_delete() {
        let cache: Cache<String, u32> = Cache::new(config(10, PolicyKind::Lru)).unwrap();

        cache.set("a".to_string(), 1, None).await;
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));

        cache.delete(&"a".to_string()).await;
        assert_eq!(cache.get(&"a".to_string()).await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_invalid_capacity() {
        let result: Result<Cache<String, u32>> = Cache::new(config(0, PolicyKind::Lru));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cache_eviction_fires_callback() {
        let cache: Cache<String, u32> = Cache::new(config(1, PolicyKind::Lru)).unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let fired = Arc::clone(&fired);
            let seen = Arc::clone(&seen);
            cache.on_evict(move |key, value| {
                fired.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push((key, value));
            });
        }

        cache.set("a".to_string(), 1, None).await;
        cache.set("b".to_string(), 2, None).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().unwrap().as_slice(), &[("a".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_cache_delete_does_not_fire_callback() {
        let cache: Cache<String, u32> = Cache::new(config(10, PolicyKind::Lru)).unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = Arc::clone(&fired);
            cache.on_evict(move |_, _| {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        cache.set("a".to_string(), 1, None).await;
        cache.delete(&"a".to_string()).await;
        cache.delete(&"a".to_string()).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_last_callback_registration_wins() {
        let cache: Cache<String, u32> = Cache::new(config(1, PolicyKind::Lru)).unwrap();

        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        {
            let first = Arc::clone(&first);
            cache.on_evict(move |_, _| {
                first.fetch_add(1, Ordering::SeqCst);
            });
        }
        {
            let second = Arc::clone(&second);
            cache.on_evict(move |_, _| {
                second.fetch_add(1, Ordering::SeqCst);
            });
        }

        cache.set("a".to_string(), 1, None).await;
        cache.set("b".to_string(), 2, None).await;

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_callback_may_reenter_cache() {
        let cache: Cache<String, u32> = Cache::new(config(1, PolicyKind::Lru)).unwrap();

        let observed = Arc::new(Mutex::new(Vec::new()));
        {
            let cache = cache.clone();
            let observed = Arc::clone(&observed);
            cache.clone().on_evict(move |key, value| {
                // Hooks run outside the store lock, so a metrics read (or
                // any other cache call) from inside one must not deadlock
                let snapshot = cache.metrics();
                observed.lock().unwrap().push((key, value, snapshot.evictions));
            });
        }

        cache.set("a".to_string(), 1, None).await;
        cache.set("b".to_string(), 2, None).await;

        let observed = observed.lock().unwrap();
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].0, "a");
    }

    #[tokio::test]
    async fn test_cache_stop_without_cleaner_is_noop() {
        let cache: Cache<String, u32> = Cache::new(config(10, PolicyKind::Lru)).unwrap();

        cache.stop().await;
        cache.stop().await;
    }

    #[tokio::test]
    async fn test_cache_clone_shares_state() {
        let cache: Cache<String, u32> = Cache::new(config(10, PolicyKind::Lru)).unwrap();
        let other = cache.clone();

        cache.set("a".to_string(), 1, None).await;

        assert_eq!(other.get(&"a".to_string()).await, Some(1));
        assert_eq!(other.metrics().hits, 1);
    }
}
