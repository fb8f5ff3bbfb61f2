//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries,
//! independent of the read path.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStore, EvictCallbackSlot};

// == Cleaner Handle ==
/// Handle to a running cleanup task: a cancellation signal plus the join
/// handle awaited on shutdown.
///
/// `shutdown` delivers the guarantee `Cache::stop` promises: once it
/// returns, the task has fully exited and no further sweep can mutate the
/// cache. Dropping an un-stopped handle aborts the task instead, so an
/// owner that never calls `stop` does not leak it.
pub(crate) struct CleanerHandle {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl CleanerHandle {
    /// Signals the task to stop and waits for it to finish.
    pub(crate) async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for CleanerHandle {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

// == Spawn Cleanup Task ==
/// Spawns a background task that sweeps expired entries every `interval`.
///
/// Each tick takes the store's write lock only for the sweep itself; the
/// eviction callback is dispatched for every removed entry after the lock
/// is released. Must be called within a Tokio runtime.
pub(crate) fn spawn_cleanup_task<K, V>(
    store: Arc<RwLock<CacheStore<K, V>>>,
    on_evict: EvictCallbackSlot<K, V>,
    interval: Duration,
) -> CleanerHandle
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let (shutdown, mut signal) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!("starting TTL cleanup task with interval {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let removed = store.write().await.sweep_expired();

                    if removed.is_empty() {
                        debug!("TTL cleanup: no expired entries found");
                    } else {
                        info!("TTL cleanup: removed {} expired entries", removed.len());
                    }

                    let hook = on_evict
                        .read()
                        .expect("eviction callback lock poisoned")
                        .clone();
                    if let Some(hook) = hook {
                        for (key, value) in removed {
                            hook(key, value);
                        }
                    }
                }
                _ = signal.changed() => {
                    debug!("TTL cleanup task stopped");
                    break;
                }
            }
        }
    });

    CleanerHandle {
        shutdown,
        handle: Some(handle),
    }
}
