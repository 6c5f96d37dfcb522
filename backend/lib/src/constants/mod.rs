//! Configuration constants for the explorer API

#[cfg(any(test, feature = "mocks"))]
pub mod sample;

/// Default server configuration
pub mod server {
    /// Default HTTP listening host
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default HTTP server port
    pub const DEFAULT_PORT: u16 = 8080;

    /// Service name reported by the health endpoint and the JSON logs
    pub const SERVICE_NAME: &str = "explorer-api";
}

/// Database configuration
pub mod database {
    /// Default PostgreSQL database URL
    pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/explorer";

    /// Maximum pooled connections in production
    pub const POOL_MAX_SIZE: u32 = 32;

    /// Limit used when a query must return every matching row
    pub const UNBOUNDED: i64 = i64::MAX;
}

/// Response cache configuration
pub mod cache {
    /// Default Redis URL, used when the redis backend is selected
    pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/10";

    /// Default freshness of list responses
    pub const DEFAULT_LIST_TTL_SECS: u64 = 6;

    /// Default freshness of detail responses
    pub const DEFAULT_DETAIL_TTL_SECS: u64 = 10;

    /// How long a request waits for a concurrent computation of the same key
    pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5_000;

    /// Lease of a computation lock, after which it is considered abandoned
    pub const DEFAULT_LOCK_LEASE_MS: u64 = 30_000;

    /// Interval between lookups while waiting on a concurrent computation
    pub const DEFAULT_LOCK_POLL_MS: u64 = 25;

    /// Suffix appended to a cache key to derive its lock key
    pub const LOCK_KEY_SUFFIX: &str = ".lock";

    /// Response header carrying the cache status
    pub const CACHE_STATUS_HEADER: &str = "x-cache";

    /// Suggested retry delay when a computation lock could not be acquired in time
    pub const RETRY_AFTER_SECS: u64 = 1;
}

/// API configuration constants
pub mod api {
    /// Default page size for paginated API responses
    pub const DEFAULT_PAGE_SIZE: i64 = 25;

    /// Maximum allowed page size for paginated API responses
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Default SS58 address format (generic Substrate)
    pub const DEFAULT_SS58_FORMAT: u16 = 42;

    /// Authors listed in every envelope's `meta`
    pub const DEFAULT_AUTHORS: &[&str] = &["POLKASCAN", "openAware BV"];

    /// Number of items returned by the `recent_*` relationships
    pub const RECENT_ITEMS: i64 = 10;
}

/// Per-resource cache lifetimes that differ from the configured defaults
pub mod ttl {
    /// Runtime listings change only on runtime upgrades
    pub const RUNTIME_LIST_SECS: u64 = 60;

    /// Runtime call and event metadata listings
    pub const RUNTIME_METADATA_LIST_SECS: u64 = 3600;

    /// Network statistics follow the chain head
    pub const NETWORK_STATS_SECS: u64 = 6;

    /// Account balances follow the chain head
    pub const ACCOUNT_DETAIL_SECS: u64 = 6;
}
