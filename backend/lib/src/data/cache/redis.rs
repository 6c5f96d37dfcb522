//! Redis cache store implementation
//!
//! Entries are stored with a server-side expiration equal to their TTL. The
//! computation lock is a separate `<key>.lock` entry taken with `SET NX PX`, so
//! concurrent misses are collapsed across every process sharing the server.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ::redis::{aio::ConnectionManager, Client, RedisError, Script};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CacheStore, CachedResponse, LockToken};
use crate::constants::cache::LOCK_KEY_SUFFIX;

/// Deletes the lock only if it still holds the caller's token
const RELEASE_LOCK_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

#[derive(Debug, Error)]
pub enum RedisCacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Malformed cache entry: {0}")]
    Codec(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    /// Milliseconds since the unix epoch
    stored_at: u64,
    response: CachedResponse,
}

/// Cache store backed by a Redis server
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: ConnectionManager,
}

impl RedisCacheStore {
    /// Connect to the Redis server at `url`
    pub async fn connect(url: &str) -> Result<Self, RedisCacheError> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn lock_key(key: &str) -> String {
        format!("{key}{LOCK_KEY_SUFFIX}")
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn millis(duration: Duration) -> u64 {
    // PX rejects 0
    (duration.as_millis() as u64).max(1)
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    type Error = RedisCacheError;

    async fn health_check(&self) -> Result<bool, Self::Error> {
        let mut conn = self.conn.clone();
        let pong: String = ::redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }

    async fn get(
        &self,
        key: &str,
        max_age: Duration,
    ) -> Result<Option<CachedResponse>, Self::Error> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = ::redis::cmd("GET").arg(key).query_async(&mut conn).await?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let entry: StoredEntry = serde_json::from_str(&raw)?;
        let age = now_millis().saturating_sub(entry.stored_at);

        Ok((u128::from(age) < max_age.as_millis()).then_some(entry.response))
    }

    async fn set(
        &self,
        key: &str,
        value: CachedResponse,
        ttl: Duration,
    ) -> Result<(), Self::Error> {
        let mut conn = self.conn.clone();
        let entry = serde_json::to_string(&StoredEntry {
            stored_at: now_millis(),
            response: value,
        })?;

        let _: () = ::redis::cmd("SET")
            .arg(key)
            .arg(entry)
            .arg("PX")
            .arg(millis(ttl))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn try_lock(&self, key: &str, lease: Duration) -> Result<Option<LockToken>, Self::Error> {
        let mut conn = self.conn.clone();
        let token = LockToken::generate();

        let acquired: Option<String> = ::redis::cmd("SET")
            .arg(Self::lock_key(key))
            .arg(token.as_str())
            .arg("NX")
            .arg("PX")
            .arg(millis(lease))
            .query_async(&mut conn)
            .await?;

        Ok(acquired.map(|_| token))
    }

    async fn unlock(&self, key: &str, token: &LockToken) -> Result<(), Self::Error> {
        let mut conn = self.conn.clone();

        let _: i64 = Script::new(RELEASE_LOCK_SCRIPT)
            .key(Self::lock_key(key))
            .arg(token.as_str())
            .invoke_async(&mut conn)
            .await?;
        Ok(())
    }
}
