use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::CacheStore;
use crate::error::Result;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

const MIN_SWEEP_AT: usize = 64;

#[derive(Default)]
struct Entries {
    map: HashMap<String, Entry>,
    /// Expired entries are swept once the map reaches this size; the
    /// threshold then resets to twice the surviving count.
    sweep_at: usize,
}

impl Entries {
    fn insert(&mut self, key: &str, entry: Entry, now: Instant) {
        self.map.insert(key.to_string(), entry);
        if self.map.len() >= self.sweep_at {
            self.map.retain(|_, e| e.is_live(now));
            self.sweep_at = (self.map.len() * 2).max(MIN_SWEEP_AT);
        }
    }
}

/// Process-local cache with Redis-like TTL semantics.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<Entries>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.map.values().filter(|e| e.is_live(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        match entries.map.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.map.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.insert(
            key,
            Entry {
                value,
                expires_at: now + Duration::from_secs(ttl_seconds),
            },
            now,
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.lock().await.map.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64> {
        let mut entries = self.entries.lock().await;
        let before = entries.map.len();
        entries.map.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.map.len()) as u64)
    }

    async fn incr_with_expiry(&self, key: &str, window_seconds: u64) -> Result<i64> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let current = entries
            .map
            .get(key)
            .filter(|entry| entry.is_live(now))
            .and_then(|entry| entry.value.parse::<i64>().ok())
            .unwrap_or(0);
        let next = current + 1;
        entries.insert(
            key,
            Entry {
                value: next.to_string(),
                expires_at: now + Duration::from_secs(window_seconds),
            },
            now,
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn zero_ttl_entries_are_never_visible() {
        let store = MemoryCacheStore::new();
        assert_ok!(store.set("k", "v".into(), 0).await);
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn prefix_delete_leaves_other_keys() {
        let store = MemoryCacheStore::new();
        store.set("jobs:search:a", "1".into(), 60).await.unwrap();
        store.set("jobs:search:b", "2".into(), 60).await.unwrap();
        store.set("job:detail:1", "3".into(), 60).await.unwrap();

        assert_eq!(store.delete_prefix("jobs:search:").await.unwrap(), 2);
        assert_eq!(store.get("job:detail:1").await.unwrap(), Some("3".into()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn counters_start_at_one_and_climb() {
        let store = MemoryCacheStore::new();
        assert_eq!(store.incr_with_expiry("rate", 60).await.unwrap(), 1);
        assert_eq!(store.incr_with_expiry("rate", 60).await.unwrap(), 2);
        assert_eq!(store.get("rate").await.unwrap(), Some("2".into()));
    }

    #[tokio::test]
    async fn expired_counters_are_swept_on_write() {
        let store = MemoryCacheStore::new();
        store.set("job:detail:1", "kept".into(), 60).await.unwrap();
        for i in 0..1000 {
            let key = format!("rate_limit:strict:10.0.{}.{}:/login", i / 256, i % 256);
            store.incr_with_expiry(&key, 0).await.unwrap();
        }

        let stored = store.entries.lock().await.map.len();
        assert!(stored <= MIN_SWEEP_AT, "{} entries still stored", stored);
        assert_eq!(store.get("job:detail:1").await.unwrap(), Some("kept".into()));
    }

    #[tokio::test]
    async fn expired_counters_restart() {
        let store = MemoryCacheStore::new();
        store.incr_with_expiry("rate", 0).await.unwrap();
        assert_eq!(store.incr_with_expiry("rate", 60).await.unwrap(), 1);
    }
}
