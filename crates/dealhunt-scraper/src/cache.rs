//! Keyed in-memory cache with per-entry time-to-live.
//!
//! Entries expire a fixed duration after being written and are dropped
//! lazily on read. There is no eviction pressure beyond the TTL; the key
//! space is one entry per distinct search query, which is tiny at this
//! scale. Each [`crate::Aggregator`] owns its own instance rather than
//! sharing a process-wide singleton, so tests get isolation for free.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the live value under `key`, removing it if expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` under `key`, resetting its TTL. Last write wins.
    pub async fn set(&self, key: &str, value: V) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_stored_value_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("k", 42).await;
        assert_eq!(cache.get("k").await, Some(42));
    }

    #[tokio::test]
    async fn get_misses_unknown_key() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.set("k", 42).await;
        assert_eq!(cache.get("k").await, None);
        // The expired entry is removed on read, not merely skipped.
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn set_overwrites_existing_entry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("k", 1).await;
        cache.set("k", 2).await;
        assert_eq!(cache.get("k").await, Some(2));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_keys_do_not_collide() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1).await;
        cache.set("b", 2).await;
        assert_eq!(cache.get("a").await, Some(1));
        assert_eq!(cache.get("b").await, Some(2));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
