use std::num::NonZeroUsize;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lru::LruCache;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::types::PriceInfo;

#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    info: PriceInfo<Decimal, Decimal>,
    fetched_at: DateTime<Utc>,
}

/// LRU price cache whose entries expire after a fixed TTL.
#[derive(Debug)]
pub struct PriceCache {
    entries: RwLock<LruCache<String, CachedPrice>>,
    ttl: Duration,
}

impl PriceCache {
    /// A zero TTL turns the cache into a pass-through.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub async fn get(&self, address: &str) -> Option<PriceInfo<Decimal, Decimal>> {
        self.get_at(address, Utc::now()).await
    }

    pub async fn insert(&self, address: String, info: PriceInfo<Decimal, Decimal>) {
        self.insert_at(address, info, Utc::now()).await
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub(crate) async fn get_at(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> Option<PriceInfo<Decimal, Decimal>> {
        // Write lock: a hit bumps the entry's recency
        let mut entries = self.entries.write().await;
        let cached = *entries.get(address)?;
        // Clock skew can make the age negative; count that as fresh
        let age = (now - cached.fetched_at).to_std().unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            entries.pop(address);
            return None;
        }
        Some(cached.info)
    }

    pub(crate) async fn insert_at(
        &self,
        address: String,
        info: PriceInfo<Decimal, Decimal>,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries
            .write()
            .await
            .put(address, CachedPrice { info, fetched_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(price: i64) -> PriceInfo<Decimal, Decimal> {
        PriceInfo::new(Decimal::from(price), Decimal::from(1000))
    }

    #[tokio::test]
    async fn returns_fresh_entries() {
        let cache = PriceCache::new(10, Duration::from_secs(30));
        cache.insert("a".to_string(), info(5)).await;
        assert_eq!(cache.get("a").await, Some(info(5)));
        assert_eq!(cache.get("b").await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_evicted() {
        let cache = PriceCache::new(10, Duration::from_secs(30));
        let fetched = Utc::now();
        cache.insert_at("a".to_string(), info(5), fetched).await;

        let later = fetched + chrono::Duration::seconds(29);
        assert_eq!(cache.get_at("a", later).await, Some(info(5)));

        let expired = fetched + chrono::Duration::seconds(30);
        assert_eq!(cache.get_at("a", expired).await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn zero_ttl_never_hits() {
        let cache = PriceCache::new(10, Duration::ZERO);
        cache.insert("a".to_string(), info(1)).await;
        assert_eq!(cache.get("a").await, None);
    }

    #[tokio::test]
    async fn least_recently_used_entry_is_dropped_at_capacity() {
        let cache = PriceCache::new(2, Duration::from_secs(60));
        cache.insert("a".to_string(), info(1)).await;
        cache.insert("b".to_string(), info(2)).await;
        // Touch "a" so "b" becomes the eviction candidate
        assert!(cache.get("a").await.is_some());
        cache.insert("c".to_string(), info(3)).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("a").await.is_some());
        assert!(cache.get("b").await.is_none());
        assert!(cache.get("c").await.is_some());
    }
}
