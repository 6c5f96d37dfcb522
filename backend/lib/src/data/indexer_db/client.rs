//! Database client wrapper using repository pattern abstraction
//!
//! This module provides a database client that delegates all operations
//! to an underlying repository implementation, allowing for both production
//! PostgreSQL and mock implementations for testing. Repository errors are
//! turned into API errors here.

use std::sync::Arc;

use explorer_indexer_db::models::{
    Account, Block, BlockTotal, Event, Extrinsic, Log, Runtime, RuntimeCall, RuntimeCallParam,
    RuntimeEvent, RuntimeEventAttribute, RuntimeModule,
};

use crate::{
    data::indexer_db::repository::{
        error::RepositoryError, EventFilter, ExtrinsicFilter, RuntimeMetadataFilter,
        StorageOperations,
    },
    error::{Error, Result},
};

fn db_error(e: RepositoryError) -> Error {
    Error::Database(e.to_string())
}

/// Database client that delegates to a repository implementation
///
/// ## Usage Example
/// ```ignore
/// // Production usage with PostgreSQL
/// let repo = Repository::new(&database_url).await?;
/// let client = DBClient::new(Arc::new(repo));
///
/// // Test usage with the sample chain
/// let client = DBClient::new(Arc::new(MockRepository::sample_chain()));
/// ```
#[derive(Clone)]
pub struct DBClient {
    repository: Arc<dyn StorageOperations>,
}

impl DBClient {
    pub fn new(repository: Arc<dyn StorageOperations>) -> Self {
        Self { repository }
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> Result<()> {
        self.repository.count_runtimes().await.map_err(db_error)?;
        Ok(())
    }

    pub async fn list_blocks(&self, offset: i64, limit: i64) -> Result<Vec<Block>> {
        self.repository
            .list_blocks(offset, limit)
            .await
            .map_err(db_error)
    }

    pub async fn get_block_by_id(&self, id: i32) -> Result<Option<Block>> {
        self.repository.get_block_by_id(id).await.map_err(db_error)
    }

    pub async fn get_block_by_hash(&self, hash: &str) -> Result<Option<Block>> {
        self.repository
            .get_block_by_hash(hash)
            .await
            .map_err(db_error)
    }

    pub async fn get_best_block_total(&self) -> Result<Option<BlockTotal>> {
        self.repository
            .get_best_block_total()
            .await
            .map_err(db_error)
    }

    pub async fn list_block_logs(&self, block_id: i32) -> Result<Vec<Log>> {
        self.repository
            .list_block_logs(block_id)
            .await
            .map_err(db_error)
    }

    pub async fn list_extrinsics(
        &self,
        filter: &ExtrinsicFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Extrinsic>> {
        self.repository
            .list_extrinsics(filter, offset, limit)
            .await
            .map_err(db_error)
    }

    pub async fn get_extrinsic(
        &self,
        block_id: i32,
        extrinsic_idx: i32,
    ) -> Result<Option<Extrinsic>> {
        self.repository
            .get_extrinsic(block_id, extrinsic_idx)
            .await
            .map_err(db_error)
    }

    pub async fn get_extrinsic_by_hash(&self, hash: &str) -> Result<Option<Extrinsic>> {
        self.repository
            .get_extrinsic_by_hash(hash)
            .await
            .map_err(db_error)
    }

    pub async fn list_events(
        &self,
        filter: &EventFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Event>> {
        self.repository
            .list_events(filter, offset, limit)
            .await
            .map_err(db_error)
    }

    pub async fn get_event(&self, block_id: i32, event_idx: i32) -> Result<Option<Event>> {
        self.repository
            .get_event(block_id, event_idx)
            .await
            .map_err(db_error)
    }

    pub async fn list_runtimes(&self, offset: i64, limit: i64) -> Result<Vec<Runtime>> {
        self.repository
            .list_runtimes(offset, limit)
            .await
            .map_err(db_error)
    }

    pub async fn get_runtime(&self, spec_version: i32) -> Result<Option<Runtime>> {
        self.repository
            .get_runtime(spec_version)
            .await
            .map_err(db_error)
    }

    pub async fn get_latest_runtime(&self) -> Result<Option<Runtime>> {
        self.repository
            .get_latest_runtime()
            .await
            .map_err(db_error)
    }

    pub async fn count_runtimes(&self) -> Result<i64> {
        self.repository.count_runtimes().await.map_err(db_error)
    }

    pub async fn list_runtime_modules(&self, spec_version: i32) -> Result<Vec<RuntimeModule>> {
        self.repository
            .list_runtime_modules(spec_version)
            .await
            .map_err(db_error)
    }

    pub async fn get_runtime_module(
        &self,
        spec_version: i32,
        module_id: &str,
    ) -> Result<Option<RuntimeModule>> {
        self.repository
            .get_runtime_module(spec_version, module_id)
            .await
            .map_err(db_error)
    }

    pub async fn list_runtime_calls(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<RuntimeCall>> {
        self.repository
            .list_runtime_calls(filter, offset, limit)
            .await
            .map_err(db_error)
    }

    pub async fn get_runtime_call(
        &self,
        spec_version: i32,
        module_id: &str,
        call_id: &str,
    ) -> Result<Option<RuntimeCall>> {
        self.repository
            .get_runtime_call(spec_version, module_id, call_id)
            .await
            .map_err(db_error)
    }

    pub async fn list_runtime_call_params(
        &self,
        runtime_call_id: i32,
    ) -> Result<Vec<RuntimeCallParam>> {
        self.repository
            .list_runtime_call_params(runtime_call_id)
            .await
            .map_err(db_error)
    }

    pub async fn list_runtime_events(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<RuntimeEvent>> {
        self.repository
            .list_runtime_events(filter, offset, limit)
            .await
            .map_err(db_error)
    }

    pub async fn get_runtime_event(
        &self,
        spec_version: i32,
        module_id: &str,
        event_id: &str,
    ) -> Result<Option<RuntimeEvent>> {
        self.repository
            .get_runtime_event(spec_version, module_id, event_id)
            .await
            .map_err(db_error)
    }

    pub async fn list_runtime_event_attributes(
        &self,
        runtime_event_id: i32,
    ) -> Result<Vec<RuntimeEventAttribute>> {
        self.repository
            .list_runtime_event_attributes(runtime_event_id)
            .await
            .map_err(db_error)
    }

    pub async fn list_accounts(&self, offset: i64, limit: i64) -> Result<Vec<Account>> {
        self.repository
            .list_accounts(offset, limit)
            .await
            .map_err(db_error)
    }

    pub async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        self.repository
            .get_account_by_id(id)
            .await
            .map_err(db_error)
    }

    pub async fn get_account_by_address(&self, address: &str) -> Result<Option<Account>> {
        self.repository
            .get_account_by_address(address)
            .await
            .map_err(db_error)
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use super::*;
    use crate::data::indexer_db::mock_repository::MockRepository;

    #[tokio::test]
    async fn repository_failures_become_database_errors() {
        let repo = MockRepository::sample_chain();
        let client = DBClient::new(Arc::new(repo.clone()));

        client.test_connection().await.expect("sample chain is reachable");

        repo.set_unavailable(true);
        let err = client.list_blocks(0, 10).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }
}
