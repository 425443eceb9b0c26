use dashmap::DashMap;
use tracing::debug;

use super::{CacheEntry, CacheFuture, ResponseCache, policy};
use crate::Response;

/// In-process [`ResponseCache`] backed by a concurrent map.
///
/// Expired entries are dropped lazily on lookup; [`purge_expired`](Self::purge_expired)
/// sweeps the rest.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before.saturating_sub(self.entries.len())
    }

    fn get_fresh(&self, key: &str) -> Option<Response> {
        let hit = self
            .entries
            .get(key)
            .and_then(|entry| (!entry.is_expired()).then(|| entry.response.clone()));

        if hit.is_none() {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
        }
        hit
    }

    fn insert(&self, key: String, response: Response) {
        let Some(ttl) = policy::shared_max_age(response.headers()) else {
            debug!(key = %key, "response not storable, skipping cache write");
            return;
        };
        self.entries.insert(key, CacheEntry::new(response, ttl));
    }
}

impl ResponseCache for MemoryCache {
    fn lookup<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Response>> {
        Box::pin(async move { Ok(self.get_fresh(key)) })
    }

    fn put(&self, key: String, response: Response) -> CacheFuture<'_, ()> {
        Box::pin(async move {
            self.insert(key, response);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatusCode;
    use std::time::Duration;

    fn cacheable(body: &str) -> Response {
        Response::new(StatusCode::Ok)
            .header("Content-Type", "application/json")
            .header("Cache-Control", "s-maxage=30")
            .body(body)
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = MemoryCache::new();
        let key = "http://localhost/a/b";

        assert!(cache.lookup(key).await.unwrap().is_none());
        cache.put(key.to_owned(), cacheable("[]")).await.unwrap();

        let hit = cache.lookup(key).await.unwrap().unwrap();
        assert_eq!(hit.content(), b"[]");
        assert_eq!(hit.headers().get("cache-control"), Some("s-maxage=30"));
    }

    #[tokio::test]
    async fn keys_are_exact_urls() {
        let cache = MemoryCache::new();
        cache
            .put("http://localhost/a/b".to_owned(), cacheable("[]"))
            .await
            .unwrap();

        assert!(cache.lookup("http://localhost/a/b?x=1").await.unwrap().is_none());
        assert!(cache.lookup("http://localhost/a/B").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn last_write_wins() {
        let cache = MemoryCache::new();
        let key = "http://localhost/a/b".to_owned();
        cache.put(key.clone(), cacheable("[1]")).await.unwrap();
        cache.put(key.clone(), cacheable("[2]")).await.unwrap();

        let hit = cache.lookup(&key).await.unwrap().unwrap();
        assert_eq!(hit.content(), b"[2]");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn unstorable_response_is_skipped() {
        let cache = MemoryCache::new();
        let response = Response::new(StatusCode::BadRequest).body(r#"{"error":"x"}"#);
        cache.put("k".to_owned(), response).await.unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_s_maxage() {
        let cache = MemoryCache::new();
        cache.put("k".to_owned(), cacheable("[]")).await.unwrap();

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(cache.lookup("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.lookup("k").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn purge_drops_only_expired() {
        let cache = MemoryCache::new();
        cache.put("old".to_owned(), cacheable("[]")).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;
        cache.put("new".to_owned(), cacheable("[]")).await.unwrap();
        tokio::time::advance(Duration::from_secs(15)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup("new").await.unwrap().is_some());
    }
}
