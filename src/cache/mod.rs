//! Key/value cache used for read-through job caches and rate-limit counters.
//!
//! Services only talk to [`Cache`], which never fails: every backend error is
//! logged and reported as a miss. The rate limiter goes to the
//! [`CacheStore`] directly so it can decide how to treat errors itself.

pub mod keys;
pub mod memory_store;
pub mod redis_store;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::error::Result;

pub use memory_store::MemoryCacheStore;
pub use redis_store::RedisCacheStore;

pub const JOB_DETAIL_TTL_SECONDS: u64 = 3600;
pub const JOB_SEARCH_TTL_SECONDS: u64 = 300;
pub const RECRUITER_JOBS_TTL_SECONDS: u64 = 300;
pub const ACTIVE_JOBS_COUNT_TTL_SECONDS: u64 = 600;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes every key starting with `prefix`, returning how many went.
    async fn delete_prefix(&self, prefix: &str) -> Result<u64>;

    /// Increments the counter and (re)sets its expiry in one atomic step.
    async fn incr_with_expiry(&self, key: &str, window_seconds: u64) -> Result<i64>;
}

#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCacheStore::new()))
    }

    pub fn store(&self) -> Arc<dyn CacheStore> {
        self.store.clone()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(key = %key, "Cache HIT");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                self.delete(key).await;
                None
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: u64) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache value could not be encoded");
                return;
            }
        };
        if let Err(e) = self.store.set(key, raw, ttl_seconds).await {
            tracing::warn!(key = %key, error = %e, "Cache write failed");
        }
    }

    pub async fn delete(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            tracing::warn!(key = %key, error = %e, "Cache delete failed");
        }
    }

    pub async fn clear_prefix(&self, prefix: &str) {
        match self.store.delete_prefix(prefix).await {
            Ok(removed) => tracing::debug!(prefix = %prefix, removed, "Cache prefix cleared"),
            Err(e) => tracing::warn!(prefix = %prefix, error = %e, "Cache prefix clear failed"),
        }
    }
}
