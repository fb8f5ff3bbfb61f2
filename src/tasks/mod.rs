//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at a configured interval

mod cleanup;

pub(crate) use cleanup::{spawn_cleanup_task, CleanerHandle};
