//! In-memory cache store implementation
//!
//! This module provides a thread-safe in-memory implementation of the CacheStore trait,
//! suitable for development and testing environments. Locks only exclude tasks of
//! the same process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

use super::{CacheStore, CachedResponse, LockToken};

/// Errors that can occur during in-memory cache operations
#[derive(Debug, Error)]
pub enum InMemoryCacheError {
    /// Lock poisoned error
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

struct Entry {
    value: CachedResponse,
    stored_at: Instant,
    expires_at: Instant,
}

struct HeldLock {
    token: LockToken,
    expires_at: Instant,
}

/// In-memory cache store using Arc<RwLock<HashMap>>
///
/// All data is lost when the process terminates.
#[derive(Clone, Default)]
pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    locks: Arc<Mutex<HashMap<String, HeldLock>>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T: std::fmt::Display>(e: T) -> InMemoryCacheError {
    InMemoryCacheError::LockPoisoned(e.to_string())
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    type Error = InMemoryCacheError;

    async fn health_check(&self) -> Result<bool, Self::Error> {
        let _entries = self.entries.read().map_err(poisoned)?;
        Ok(true)
    }

    async fn get(
        &self,
        key: &str,
        max_age: Duration,
    ) -> Result<Option<CachedResponse>, Self::Error> {
        let entries = self.entries.read().map_err(poisoned)?;
        let now = Instant::now();

        Ok(entries
            .get(key)
            .filter(|entry| now < entry.expires_at && now - entry.stored_at < max_age)
            .map(|entry| entry.value.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: CachedResponse,
        ttl: Duration,
    ) -> Result<(), Self::Error> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let now = Instant::now();

        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value,
                stored_at: now,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn try_lock(&self, key: &str, lease: Duration) -> Result<Option<LockToken>, Self::Error> {
        let mut locks = self.locks.lock().map_err(poisoned)?;
        let now = Instant::now();

        if locks.get(key).is_some_and(|held| held.expires_at > now) {
            return Ok(None);
        }

        let token = LockToken::generate();
        locks.insert(
            key.to_string(),
            HeldLock {
                token: token.clone(),
                expires_at: now + lease,
            },
        );
        Ok(Some(token))
    }

    async fn unlock(&self, key: &str, token: &LockToken) -> Result<(), Self::Error> {
        let mut locks = self.locks.lock().map_err(poisoned)?;

        if locks.get(key).is_some_and(|held| &held.token == token) {
            locks.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(6);

    fn response(body: &str) -> CachedResponse {
        CachedResponse {
            status: 200,
            body: Some(body.to_string()),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = InMemoryCacheStore::new();
        store.set("key", response("{}"), TTL).await.unwrap();

        assert!(store.health_check().await.unwrap());
        // The read guard taken by the check is released
        assert_eq!(store.get("key", TTL).await.unwrap(), Some(response("{}")));
        store.set("key", response("[]"), TTL).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = InMemoryCacheStore::new();

        assert_eq!(store.get("GET-/system/block", TTL).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryCacheStore::new();

        store
            .set("GET-/system/block", response("{}"), TTL)
            .await
            .unwrap();

        let result = store.get("GET-/system/block", TTL).await.unwrap();
        assert_eq!(result, Some(response("{}")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let store = InMemoryCacheStore::new();
        store.set("key", response("{}"), TTL).await.unwrap();

        tokio::time::advance(TTL - Duration::from_millis(1)).await;
        assert!(store.get("key", TTL).await.unwrap().is_some());

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(store.get("key", TTL).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_age_bounds_freshness() {
        let store = InMemoryCacheStore::new();
        store.set("key", response("{}"), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;

        // Stored long ago enough to be stale for a stricter reader
        assert!(store.get("key", Duration::from_secs(1)).await.unwrap().is_none());
        assert!(store.get("key", TTL).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lock_is_exclusive_until_released() {
        let store = InMemoryCacheStore::new();
        let lease = Duration::from_secs(30);

        let token = store.try_lock("key", lease).await.unwrap().unwrap();
        assert!(store.try_lock("key", lease).await.unwrap().is_none());

        // Other keys are independent
        assert!(store.try_lock("other", lease).await.unwrap().is_some());

        store.unlock("key", &token).await.unwrap();
        assert!(store.try_lock("key", lease).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unlock_with_foreign_token_is_ignored() {
        let store = InMemoryCacheStore::new();
        let lease = Duration::from_secs(30);

        let _token = store.try_lock("key", lease).await.unwrap().unwrap();
        store.unlock("key", &LockToken::generate()).await.unwrap();

        assert!(store.try_lock("key", lease).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_lock_expires() {
        let store = InMemoryCacheStore::new();
        let lease = Duration::from_secs(30);

        let _abandoned = store.try_lock("key", lease).await.unwrap().unwrap();

        tokio::time::advance(lease + Duration::from_millis(1)).await;
        assert!(store.try_lock("key", lease).await.unwrap().is_some());
    }
}
