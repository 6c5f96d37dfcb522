//! Type-erased cache store implementation

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;

use super::{CacheStore, CachedResponse, LockToken};

/// A boxed cache error that can wrap any store implementation's error type
pub type BoxedCacheError = Box<dyn StdError + Send + Sync>;

/// Type-erased cache store trait for use across service boundaries
#[async_trait]
pub trait BoxedCacheStore: Send + Sync {
    async fn health_check(&self) -> Result<bool, BoxedCacheError>;

    async fn get(
        &self,
        key: &str,
        max_age: Duration,
    ) -> Result<Option<CachedResponse>, BoxedCacheError>;

    async fn set(
        &self,
        key: &str,
        value: CachedResponse,
        ttl: Duration,
    ) -> Result<(), BoxedCacheError>;

    async fn try_lock(&self, key: &str, lease: Duration)
        -> Result<Option<LockToken>, BoxedCacheError>;

    async fn unlock(&self, key: &str, token: &LockToken) -> Result<(), BoxedCacheError>;
}

/// Wrapper struct that implements BoxedCacheStore for any CacheStore implementation
pub struct BoxedCacheStoreWrapper<S: CacheStore> {
    inner: S,
}

impl<S: CacheStore> BoxedCacheStoreWrapper<S> {
    pub fn new(store: S) -> Self {
        Self { inner: store }
    }

    fn wrap_err<E: StdError + Send + Sync + 'static>(err: E) -> BoxedCacheError {
        Box::new(err) as BoxedCacheError
    }
}

#[async_trait]
impl<S> BoxedCacheStore for BoxedCacheStoreWrapper<S>
where
    S: CacheStore + Send + Sync,
    S::Error: StdError + Send + Sync + 'static,
{
    async fn health_check(&self) -> Result<bool, BoxedCacheError> {
        self.inner.health_check().await.map_err(Self::wrap_err)
    }

    async fn get(
        &self,
        key: &str,
        max_age: Duration,
    ) -> Result<Option<CachedResponse>, BoxedCacheError> {
        self.inner.get(key, max_age).await.map_err(Self::wrap_err)
    }

    async fn set(
        &self,
        key: &str,
        value: CachedResponse,
        ttl: Duration,
    ) -> Result<(), BoxedCacheError> {
        self.inner.set(key, value, ttl).await.map_err(Self::wrap_err)
    }

    async fn try_lock(
        &self,
        key: &str,
        lease: Duration,
    ) -> Result<Option<LockToken>, BoxedCacheError> {
        self.inner.try_lock(key, lease).await.map_err(Self::wrap_err)
    }

    async fn unlock(&self, key: &str, token: &LockToken) -> Result<(), BoxedCacheError> {
        self.inner.unlock(key, token).await.map_err(Self::wrap_err)
    }
}
