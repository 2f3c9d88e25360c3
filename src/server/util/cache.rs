//! Short-TTL in-memory cache for transformed response payloads.
//!
//! The cache stores an opaque JSON copy of a response body keyed by a string,
//! never the underlying entities. Entries accumulate for the life of the
//! process; the key space is bounded in practice by page/limit combinations.
//! Writes do not invalidate cached reads, so readers may observe data up to
//! one TTL stale (accepted given TTLs on the order of a minute).
//!
//! Two concurrent callers missing on the same key both invoke `compute`;
//! there is no in-flight de-duplication.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::{de::DeserializeOwned, Serialize};

use crate::server::error::Error;

struct CacheEntry {
    value: serde_json::Value,
    stored_at: Instant,
}

/// Process-wide get-or-compute cache guarded by a mutex; the lock is held
/// only for map lookups and inserts, never across the compute future.
#[derive(Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key` if it is younger than `ttl`,
    /// otherwise invokes `compute`, stores the result, and returns it.
    ///
    /// A failed `compute` stores nothing, so the next caller retries.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        {
            let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

            if let Some(entry) = entries.get(key) {
                if entry.stored_at.elapsed() < ttl {
                    return Ok(serde_json::from_value(entry.value.clone())?);
                }
            }
        }

        let value = compute().await?;
        let raw = serde_json::to_value(&value)?;

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: raw,
                stored_at: Instant::now(),
            },
        );

        Ok(value)
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    async fn counted_compute(counter: &AtomicU32) -> Result<u32, Error> {
        Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Two calls within the TTL invoke compute exactly once
    #[tokio::test]
    async fn fresh_entry_skips_compute() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);
        let ttl = Duration::from_secs(60);

        let first: u32 = cache
            .get_or_compute("key", ttl, || counted_compute(&calls))
            .await
            .unwrap();
        let second: u32 = cache
            .get_or_compute("key", ttl, || counted_compute(&calls))
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// A call after the TTL has elapsed invokes compute a second time
    #[tokio::test]
    async fn expired_entry_recomputes() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);
        let ttl = Duration::from_millis(20);

        let _: u32 = cache
            .get_or_compute("key", ttl, || counted_compute(&calls))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        let second: u32 = cache
            .get_or_compute("key", ttl, || counted_compute(&calls))
            .await
            .unwrap();

        assert_eq!(second, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    /// Distinct keys compute independently
    #[tokio::test]
    async fn keys_are_independent() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);
        let ttl = Duration::from_secs(60);

        let _: u32 = cache
            .get_or_compute("a", ttl, || counted_compute(&calls))
            .await
            .unwrap();
        let _: u32 = cache
            .get_or_compute("b", ttl, || counted_compute(&calls))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    /// A failed compute stores nothing; the next call retries
    #[tokio::test]
    async fn failed_compute_is_not_cached() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);
        let ttl = Duration::from_secs(60);

        let failed: Result<u32, Error> = cache
            .get_or_compute("key", ttl, || async {
                Err(Error::ParseError("boom".to_string()))
            })
            .await;
        assert!(failed.is_err());

        let value: u32 = cache
            .get_or_compute("key", ttl, || counted_compute(&calls))
            .await
            .unwrap();

        assert_eq!(value, 1);
    }

    /// Clearing the cache forces recomputation
    #[tokio::test]
    async fn clear_forces_recompute() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);
        let ttl = Duration::from_secs(60);

        let _: u32 = cache
            .get_or_compute("key", ttl, || counted_compute(&calls))
            .await
            .unwrap();

        cache.clear();

        let _: u32 = cache
            .get_or_compute("key", ttl, || counted_compute(&calls))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
