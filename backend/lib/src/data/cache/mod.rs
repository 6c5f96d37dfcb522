//! Response cache data access module
//!
//! This module provides the key-value store the resource engine caches
//! responses in, together with the per-key lock used to collapse concurrent
//! computations of the same response.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod boxed;
pub mod memory;
pub mod redis;

pub use boxed::{BoxedCacheStore, BoxedCacheStoreWrapper};
pub use memory::InMemoryCacheStore;
pub use self::redis::RedisCacheStore;

/// A response as stored in the cache.
///
/// `body` is the exact JSON text that was sent, so hits are replayed byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub body: Option<String>,
}

/// Proof of ownership of a computation lock, required to release it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockToken(String);

impl LockToken {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cache store trait for the response cache
///
/// Implementations expire entries on their own once their TTL elapses; nothing
/// is ever deleted explicitly.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Error type for cache operations
    type Error: Error + Send + Sync + 'static;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<bool, Self::Error>;

    /// Get the value stored under `key` if it was stored less than `max_age` ago
    async fn get(&self, key: &str, max_age: Duration)
        -> Result<Option<CachedResponse>, Self::Error>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: CachedResponse, ttl: Duration)
        -> Result<(), Self::Error>;

    /// Try to take the computation lock of `key`
    ///
    /// Returns `None` when another holder owns a lock whose `lease` has not run out yet.
    async fn try_lock(&self, key: &str, lease: Duration) -> Result<Option<LockToken>, Self::Error>;

    /// Release the computation lock of `key`, if it is still owned by `token`
    async fn unlock(&self, key: &str, token: &LockToken) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub fn test_cache() -> Arc<dyn BoxedCacheStore> {
    Arc::new(BoxedCacheStoreWrapper::new(InMemoryCacheStore::new()))
}

/// Wraps any store into the type-erased form used across service boundaries
pub fn boxed<S>(store: S) -> Arc<dyn BoxedCacheStore>
where
    S: CacheStore + 'static,
{
    Arc::new(BoxedCacheStoreWrapper::new(store))
}
