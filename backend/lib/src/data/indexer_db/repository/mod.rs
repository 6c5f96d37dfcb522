//! Repository pattern implementation for database operations.
//!
//! This module provides the read-only abstraction the resources query the
//! indexer database through.
//!
//! ## Key Components
//! - [`SmartPool`] - Connection pool with automatic test transaction support
//! - [`RepositoryError`] - Error types for repository operations
//! - [`IndexerOps`] - Trait defining all database reads
//! - [`Repository`] - PostgreSQL implementation
//!
//! ## Ordering
//! Every `list_*` method returns rows in a stable order, so that slicing with
//! `offset` and `limit` pages through the collection without gaps:
//! - blocks by number, newest first
//! - extrinsics and events by block, newest first, then by position in the block
//! - runtimes by spec version, newest first
//! - runtime calls and events by spec version, module and name
//! - accounts by last update, newest first
//!
//! [`SmartPool`]: pool::SmartPool
//! [`RepositoryError`]: error::RepositoryError
//! [`Repository`]: postgres::Repository

use async_trait::async_trait;
use explorer_indexer_db::models::{
    Account, Block, BlockTotal, Event, Extrinsic, Log, Runtime, RuntimeCall, RuntimeCallParam,
    RuntimeEvent, RuntimeEventAttribute, RuntimeModule,
};

pub mod error;
pub mod pool;
pub mod postgres;

use error::RepositoryResult;

/// Narrows the extrinsic collection, every set field must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtrinsicFilter {
    pub block_id: Option<i32>,
    pub signed: Option<i16>,
    pub module_id: Option<String>,
    pub call_id: Option<String>,
    /// Hex encoded account id of the signer, without `0x` prefix
    pub address: Option<String>,
}

/// Narrows the event collection, every set field must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub block_id: Option<i32>,
    pub system: Option<i16>,
    pub module_id: Option<String>,
    pub event_id: Option<String>,
}

/// Narrows runtime call and runtime event collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeMetadataFilter {
    pub spec_version: Option<i32>,
    pub module_id: Option<String>,
}

/// Read-only operations for indexer data access.
///
/// ## Implementation Notes
/// - Methods follow consistent naming: `get_*` for single rows, `list_*` for collections
/// - Pagination is supported through `offset` and `limit` parameters
/// - Optional return types indicate entities that may not exist
#[async_trait]
pub trait IndexerOps: Send + Sync {
    // ============ Blocks ============

    async fn list_blocks(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Block>>;

    async fn get_block_by_id(&self, id: i32) -> RepositoryResult<Option<Block>>;

    /// Lookup by hash, hex encoded with `0x` prefix
    async fn get_block_by_hash(&self, hash: &str) -> RepositoryResult<Option<Block>>;

    /// Running totals of the highest indexed block
    async fn get_best_block_total(&self) -> RepositoryResult<Option<BlockTotal>>;

    async fn list_block_logs(&self, block_id: i32) -> RepositoryResult<Vec<Log>>;

    // ============ Extrinsics ============

    async fn list_extrinsics(
        &self,
        filter: &ExtrinsicFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<Extrinsic>>;

    async fn get_extrinsic(
        &self,
        block_id: i32,
        extrinsic_idx: i32,
    ) -> RepositoryResult<Option<Extrinsic>>;

    /// Lookup by hash, hex encoded without `0x` prefix
    async fn get_extrinsic_by_hash(&self, hash: &str) -> RepositoryResult<Option<Extrinsic>>;

    // ============ Events ============

    async fn list_events(
        &self,
        filter: &EventFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<Event>>;

    async fn get_event(&self, block_id: i32, event_idx: i32) -> RepositoryResult<Option<Event>>;

    // ============ Runtime metadata ============

    async fn list_runtimes(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Runtime>>;

    async fn get_runtime(&self, spec_version: i32) -> RepositoryResult<Option<Runtime>>;

    async fn get_latest_runtime(&self) -> RepositoryResult<Option<Runtime>>;

    async fn count_runtimes(&self) -> RepositoryResult<i64>;

    async fn list_runtime_modules(&self, spec_version: i32) -> RepositoryResult<Vec<RuntimeModule>>;

    async fn get_runtime_module(
        &self,
        spec_version: i32,
        module_id: &str,
    ) -> RepositoryResult<Option<RuntimeModule>>;

    async fn list_runtime_calls(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<RuntimeCall>>;

    async fn get_runtime_call(
        &self,
        spec_version: i32,
        module_id: &str,
        call_id: &str,
    ) -> RepositoryResult<Option<RuntimeCall>>;

    async fn list_runtime_call_params(
        &self,
        runtime_call_id: i32,
    ) -> RepositoryResult<Vec<RuntimeCallParam>>;

    async fn list_runtime_events(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<RuntimeEvent>>;

    async fn get_runtime_event(
        &self,
        spec_version: i32,
        module_id: &str,
        event_id: &str,
    ) -> RepositoryResult<Option<RuntimeEvent>>;

    async fn list_runtime_event_attributes(
        &self,
        runtime_event_id: i32,
    ) -> RepositoryResult<Vec<RuntimeEventAttribute>>;

    // ============ Accounts ============

    async fn list_accounts(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Account>>;

    /// Lookup by public key, hex encoded without `0x` prefix
    async fn get_account_by_id(&self, id: &str) -> RepositoryResult<Option<Account>>;

    async fn get_account_by_address(&self, address: &str) -> RepositoryResult<Option<Account>>;
}

/// Everything the API needs from a repository
///
/// The indexer owns the database, this side only ever reads from it.
pub trait StorageOperations: IndexerOps {}

impl<T: IndexerOps> StorageOperations for T {}
