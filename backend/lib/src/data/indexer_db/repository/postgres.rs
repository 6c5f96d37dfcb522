//! PostgreSQL repository implementation.
//!
//! This module provides the production repository implementation using
//! PostgreSQL as the backing database through diesel-async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use explorer_indexer_db::{
    models::{
        Account, Block, BlockTotal, Event, Extrinsic, Log, Runtime, RuntimeCall,
        RuntimeCallParam, RuntimeEvent, RuntimeEventAttribute, RuntimeModule,
    },
    schema::{
        data_account, data_block, data_event, data_extrinsic, data_log, runtime, runtime_call,
        runtime_event, runtime_module,
    },
};

use crate::data::indexer_db::repository::{
    error::RepositoryResult, pool::SmartPool, EventFilter, ExtrinsicFilter, IndexerOps,
    RuntimeMetadataFilter,
};

/// PostgreSQL repository implementation.
///
/// Provides all database operations using a connection pool
/// with automatic test transaction management.
pub struct Repository {
    pool: SmartPool,
}

impl Repository {
    /// Create a new Repository connected to `database_url`
    pub async fn new(database_url: &str) -> RepositoryResult<Self> {
        Ok(Self {
            pool: SmartPool::new(database_url).await?,
        })
    }
}

#[async_trait]
impl IndexerOps for Repository {
    // ============ Blocks ============

    async fn list_blocks(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Block>> {
        let mut conn = self.pool.get().await?;

        let blocks = data_block::table
            .order(data_block::id.desc())
            .offset(offset)
            .limit(limit)
            .select(Block::as_select())
            .load(&mut conn)
            .await?;

        Ok(blocks)
    }

    async fn get_block_by_id(&self, id: i32) -> RepositoryResult<Option<Block>> {
        let mut conn = self.pool.get().await?;
        Ok(Block::get_by_id(&mut conn, id).await?)
    }

    async fn get_block_by_hash(&self, hash: &str) -> RepositoryResult<Option<Block>> {
        let mut conn = self.pool.get().await?;
        Ok(Block::get_by_hash(&mut conn, hash).await?)
    }

    async fn get_best_block_total(&self) -> RepositoryResult<Option<BlockTotal>> {
        let mut conn = self.pool.get().await?;
        Ok(BlockTotal::get_best(&mut conn).await?)
    }

    async fn list_block_logs(&self, block_id: i32) -> RepositoryResult<Vec<Log>> {
        let mut conn = self.pool.get().await?;

        let logs = data_log::table
            .filter(data_log::block_id.eq(block_id))
            .order(data_log::log_idx.asc())
            .select(Log::as_select())
            .load(&mut conn)
            .await?;

        Ok(logs)
    }

    // ============ Extrinsics ============

    async fn list_extrinsics(
        &self,
        filter: &ExtrinsicFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<Extrinsic>> {
        let mut conn = self.pool.get().await?;

        let mut query = data_extrinsic::table.into_boxed();
        if let Some(block_id) = filter.block_id {
            query = query.filter(data_extrinsic::block_id.eq(block_id));
        }
        if let Some(signed) = filter.signed {
            query = query.filter(data_extrinsic::signed.eq(signed));
        }
        if let Some(module_id) = &filter.module_id {
            query = query.filter(data_extrinsic::module_id.eq(module_id.clone()));
        }
        if let Some(call_id) = &filter.call_id {
            query = query.filter(data_extrinsic::call_id.eq(call_id.clone()));
        }
        if let Some(address) = &filter.address {
            query = query.filter(data_extrinsic::address.eq(address.clone()));
        }

        let extrinsics = query
            .order((
                data_extrinsic::block_id.desc(),
                data_extrinsic::extrinsic_idx.asc(),
            ))
            .offset(offset)
            .limit(limit)
            .select(Extrinsic::as_select())
            .load(&mut conn)
            .await?;

        Ok(extrinsics)
    }

    async fn get_extrinsic(
        &self,
        block_id: i32,
        extrinsic_idx: i32,
    ) -> RepositoryResult<Option<Extrinsic>> {
        let mut conn = self.pool.get().await?;
        Ok(Extrinsic::get(&mut conn, block_id, extrinsic_idx).await?)
    }

    async fn get_extrinsic_by_hash(&self, hash: &str) -> RepositoryResult<Option<Extrinsic>> {
        let mut conn = self.pool.get().await?;
        Ok(Extrinsic::get_by_hash(&mut conn, hash).await?)
    }

    // ============ Events ============

    async fn list_events(
        &self,
        filter: &EventFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<Event>> {
        let mut conn = self.pool.get().await?;

        let mut query = data_event::table.into_boxed();
        if let Some(block_id) = filter.block_id {
            query = query.filter(data_event::block_id.eq(block_id));
        }
        if let Some(system) = filter.system {
            query = query.filter(data_event::system.eq(system));
        }
        if let Some(module_id) = &filter.module_id {
            query = query.filter(data_event::module_id.eq(module_id.clone()));
        }
        if let Some(event_id) = &filter.event_id {
            query = query.filter(data_event::event_id.eq(event_id.clone()));
        }

        let events = query
            .order((data_event::block_id.desc(), data_event::event_idx.asc()))
            .offset(offset)
            .limit(limit)
            .select(Event::as_select())
            .load(&mut conn)
            .await?;

        Ok(events)
    }

    async fn get_event(&self, block_id: i32, event_idx: i32) -> RepositoryResult<Option<Event>> {
        let mut conn = self.pool.get().await?;
        Ok(Event::get(&mut conn, block_id, event_idx).await?)
    }

    // ============ Runtime metadata ============

    async fn list_runtimes(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Runtime>> {
        let mut conn = self.pool.get().await?;

        let runtimes = runtime::table
            .order(runtime::spec_version.desc())
            .offset(offset)
            .limit(limit)
            .select(Runtime::as_select())
            .load(&mut conn)
            .await?;

        Ok(runtimes)
    }

    async fn get_runtime(&self, spec_version: i32) -> RepositoryResult<Option<Runtime>> {
        let mut conn = self.pool.get().await?;
        Ok(Runtime::get_by_spec_version(&mut conn, spec_version).await?)
    }

    async fn get_latest_runtime(&self) -> RepositoryResult<Option<Runtime>> {
        let mut conn = self.pool.get().await?;
        Ok(Runtime::get_latest(&mut conn).await?)
    }

    async fn count_runtimes(&self) -> RepositoryResult<i64> {
        let mut conn = self.pool.get().await?;
        Ok(Runtime::count(&mut conn).await?)
    }

    async fn list_runtime_modules(&self, spec_version: i32) -> RepositoryResult<Vec<RuntimeModule>> {
        let mut conn = self.pool.get().await?;

        let modules = runtime_module::table
            .filter(runtime_module::spec_version.eq(spec_version))
            .order(runtime_module::id.asc())
            .select(RuntimeModule::as_select())
            .load(&mut conn)
            .await?;

        Ok(modules)
    }

    async fn get_runtime_module(
        &self,
        spec_version: i32,
        module_id: &str,
    ) -> RepositoryResult<Option<RuntimeModule>> {
        let mut conn = self.pool.get().await?;
        Ok(RuntimeModule::get(&mut conn, spec_version, module_id).await?)
    }

    async fn list_runtime_calls(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<RuntimeCall>> {
        let mut conn = self.pool.get().await?;

        let mut query = runtime_call::table.into_boxed();
        if let Some(spec_version) = filter.spec_version {
            query = query.filter(runtime_call::spec_version.eq(spec_version));
        }
        if let Some(module_id) = &filter.module_id {
            query = query.filter(runtime_call::module_id.eq(module_id.clone()));
        }

        let calls = query
            .order((
                runtime_call::spec_version.asc(),
                runtime_call::module_id.asc(),
                runtime_call::call_id.asc(),
            ))
            .offset(offset)
            .limit(limit)
            .select(RuntimeCall::as_select())
            .load(&mut conn)
            .await?;

        Ok(calls)
    }

    async fn get_runtime_call(
        &self,
        spec_version: i32,
        module_id: &str,
        call_id: &str,
    ) -> RepositoryResult<Option<RuntimeCall>> {
        let mut conn = self.pool.get().await?;
        Ok(RuntimeCall::get(&mut conn, spec_version, module_id, call_id).await?)
    }

    async fn list_runtime_call_params(
        &self,
        runtime_call_id: i32,
    ) -> RepositoryResult<Vec<RuntimeCallParam>> {
        let mut conn = self.pool.get().await?;
        Ok(RuntimeCallParam::get_all_by_call(&mut conn, runtime_call_id).await?)
    }

    async fn list_runtime_events(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<RuntimeEvent>> {
        let mut conn = self.pool.get().await?;

        let mut query = runtime_event::table.into_boxed();
        if let Some(spec_version) = filter.spec_version {
            query = query.filter(runtime_event::spec_version.eq(spec_version));
        }
        if let Some(module_id) = &filter.module_id {
            query = query.filter(runtime_event::module_id.eq(module_id.clone()));
        }

        let events = query
            .order((
                runtime_event::spec_version.asc(),
                runtime_event::module_id.asc(),
                runtime_event::event_id.asc(),
            ))
            .offset(offset)
            .limit(limit)
            .select(RuntimeEvent::as_select())
            .load(&mut conn)
            .await?;

        Ok(events)
    }

    async fn get_runtime_event(
        &self,
        spec_version: i32,
        module_id: &str,
        event_id: &str,
    ) -> RepositoryResult<Option<RuntimeEvent>> {
        let mut conn = self.pool.get().await?;
        Ok(RuntimeEvent::get(&mut conn, spec_version, module_id, event_id).await?)
    }

    async fn list_runtime_event_attributes(
        &self,
        runtime_event_id: i32,
    ) -> RepositoryResult<Vec<RuntimeEventAttribute>> {
        let mut conn = self.pool.get().await?;
        Ok(RuntimeEventAttribute::get_all_by_event(&mut conn, runtime_event_id).await?)
    }

    // ============ Accounts ============

    async fn list_accounts(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Account>> {
        let mut conn = self.pool.get().await?;

        let accounts = data_account::table
            .order((data_account::updated_at_block.desc(), data_account::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(Account::as_select())
            .load(&mut conn)
            .await?;

        Ok(accounts)
    }

    async fn get_account_by_id(&self, id: &str) -> RepositoryResult<Option<Account>> {
        let mut conn = self.pool.get().await?;
        Ok(Account::get_by_id(&mut conn, id).await?)
    }

    async fn get_account_by_address(&self, address: &str) -> RepositoryResult<Option<Account>> {
        let mut conn = self.pool.get().await?;
        Ok(Account::get_by_address(&mut conn, address).await?)
    }
}
