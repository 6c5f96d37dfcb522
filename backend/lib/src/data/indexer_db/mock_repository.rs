//! Mock repository implementation for unit testing and mock mode.
//!
//! Provides an in-memory implementation of the repository pattern that mimics
//! database operations without requiring a real database connection. Rows are
//! returned in the same order as the PostgreSQL repository returns them.

use std::{
    cmp::Reverse,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::DateTime;
use serde_json::json;
use tokio::sync::RwLock;

use explorer_indexer_db::models::{
    Account, Block, BlockTotal, Event, Extrinsic, Log, Runtime, RuntimeCall, RuntimeCallParam,
    RuntimeEvent, RuntimeEventAttribute, RuntimeModule,
};

use crate::constants::sample::{accounts::*, chain::*};
use crate::data::indexer_db::repository::{
    error::{RepositoryError, RepositoryResult},
    EventFilter, ExtrinsicFilter, IndexerOps, RuntimeMetadataFilter,
};

/// Rows held by the mock repository
#[derive(Default)]
pub struct ChainData {
    pub blocks: Vec<Block>,
    pub block_totals: Vec<BlockTotal>,
    pub extrinsics: Vec<Extrinsic>,
    pub events: Vec<Event>,
    pub logs: Vec<Log>,
    pub runtimes: Vec<Runtime>,
    pub runtime_modules: Vec<RuntimeModule>,
    pub runtime_calls: Vec<RuntimeCall>,
    pub runtime_call_params: Vec<RuntimeCallParam>,
    pub runtime_events: Vec<RuntimeEvent>,
    pub runtime_event_attributes: Vec<RuntimeEventAttribute>,
    pub accounts: Vec<Account>,
}

/// Mock repository implementation using in-memory storage
#[derive(Clone, Default)]
pub struct MockRepository {
    data: Arc<RwLock<ChainData>>,
    unavailable: Arc<AtomicBool>,
}

impl MockRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock repository holding the sample chain
    pub fn sample_chain() -> Self {
        Self {
            data: Arc::new(RwLock::new(sample_chain_data())),
            unavailable: Arc::default(),
        }
    }

    /// Make every subsequent query fail, or succeed again
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Replace the rows of the repository
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut ChainData),
    {
        f(&mut *self.data.write().await);
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("mock repository is unavailable"));
        }
        Ok(())
    }
}

fn page<'a, T: Clone + 'a>(rows: impl Iterator<Item = &'a T>, offset: i64, limit: i64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    rows.skip(offset).take(limit).cloned().collect()
}

fn field_matches<T: PartialEq + ?Sized>(expected: Option<&T>, actual: &T) -> bool {
    expected.map_or(true, |expected| expected == actual)
}

#[async_trait]
impl IndexerOps for MockRepository {
    // ============ Blocks ============

    async fn list_blocks(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Block>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut blocks: Vec<&Block> = data.blocks.iter().collect();
        blocks.sort_by_key(|b| Reverse(b.id));

        Ok(page(blocks.into_iter(), offset, limit))
    }

    async fn get_block_by_id(&self, id: i32) -> RepositoryResult<Option<Block>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data.blocks.iter().find(|b| b.id == id).cloned())
    }

    async fn get_block_by_hash(&self, hash: &str) -> RepositoryResult<Option<Block>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data.blocks.iter().find(|b| b.hash == hash).cloned())
    }

    async fn get_best_block_total(&self) -> RepositoryResult<Option<BlockTotal>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data.block_totals.iter().max_by_key(|t| t.id).cloned())
    }

    async fn list_block_logs(&self, block_id: i32) -> RepositoryResult<Vec<Log>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut logs: Vec<Log> = data
            .logs
            .iter()
            .filter(|l| l.block_id == block_id)
            .cloned()
            .collect();
        logs.sort_by_key(|l| l.log_idx);

        Ok(logs)
    }

    // ============ Extrinsics ============

    async fn list_extrinsics(
        &self,
        filter: &ExtrinsicFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<Extrinsic>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut extrinsics: Vec<&Extrinsic> = data
            .extrinsics
            .iter()
            .filter(|e| {
                field_matches(filter.block_id.as_ref(), &e.block_id)
                    && field_matches(filter.signed.as_ref(), &e.signed)
                    && field_matches(filter.module_id.as_deref(), e.module_id.as_str())
                    && field_matches(filter.call_id.as_deref(), e.call_id.as_str())
                    && filter
                        .address
                        .as_deref()
                        .map_or(true, |address| e.address.as_deref() == Some(address))
            })
            .collect();
        extrinsics.sort_by_key(|e| (Reverse(e.block_id), e.extrinsic_idx));

        Ok(page(extrinsics.into_iter(), offset, limit))
    }

    async fn get_extrinsic(
        &self,
        block_id: i32,
        extrinsic_idx: i32,
    ) -> RepositoryResult<Option<Extrinsic>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data
            .extrinsics
            .iter()
            .find(|e| e.block_id == block_id && e.extrinsic_idx == extrinsic_idx)
            .cloned())
    }

    async fn get_extrinsic_by_hash(&self, hash: &str) -> RepositoryResult<Option<Extrinsic>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data
            .extrinsics
            .iter()
            .find(|e| e.extrinsic_hash.as_deref() == Some(hash))
            .cloned())
    }

    // ============ Events ============

    async fn list_events(
        &self,
        filter: &EventFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<Event>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut events: Vec<&Event> = data
            .events
            .iter()
            .filter(|e| {
                field_matches(filter.block_id.as_ref(), &e.block_id)
                    && field_matches(filter.system.as_ref(), &e.system)
                    && field_matches(filter.module_id.as_deref(), e.module_id.as_str())
                    && field_matches(filter.event_id.as_deref(), e.event_id.as_str())
            })
            .collect();
        events.sort_by_key(|e| (Reverse(e.block_id), e.event_idx));

        Ok(page(events.into_iter(), offset, limit))
    }

    async fn get_event(&self, block_id: i32, event_idx: i32) -> RepositoryResult<Option<Event>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data
            .events
            .iter()
            .find(|e| e.block_id == block_id && e.event_idx == event_idx)
            .cloned())
    }

    // ============ Runtime metadata ============

    async fn list_runtimes(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Runtime>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut runtimes: Vec<&Runtime> = data.runtimes.iter().collect();
        runtimes.sort_by_key(|r| Reverse(r.spec_version));

        Ok(page(runtimes.into_iter(), offset, limit))
    }

    async fn get_runtime(&self, spec_version: i32) -> RepositoryResult<Option<Runtime>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data
            .runtimes
            .iter()
            .find(|r| r.spec_version == spec_version)
            .cloned())
    }

    async fn get_latest_runtime(&self) -> RepositoryResult<Option<Runtime>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data.runtimes.iter().max_by_key(|r| r.spec_version).cloned())
    }

    async fn count_runtimes(&self) -> RepositoryResult<i64> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data.runtimes.len() as i64)
    }

    async fn list_runtime_modules(&self, spec_version: i32) -> RepositoryResult<Vec<RuntimeModule>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut modules: Vec<RuntimeModule> = data
            .runtime_modules
            .iter()
            .filter(|m| m.spec_version == spec_version)
            .cloned()
            .collect();
        modules.sort_by_key(|m| m.id);

        Ok(modules)
    }

    async fn get_runtime_module(
        &self,
        spec_version: i32,
        module_id: &str,
    ) -> RepositoryResult<Option<RuntimeModule>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data
            .runtime_modules
            .iter()
            .find(|m| m.spec_version == spec_version && m.module_id == module_id)
            .cloned())
    }

    async fn list_runtime_calls(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<RuntimeCall>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut calls: Vec<&RuntimeCall> = data
            .runtime_calls
            .iter()
            .filter(|c| {
                field_matches(filter.spec_version.as_ref(), &c.spec_version)
                    && field_matches(filter.module_id.as_deref(), c.module_id.as_str())
            })
            .collect();
        calls.sort_by(|a, b| {
            (a.spec_version, &a.module_id, &a.call_id).cmp(&(
                b.spec_version,
                &b.module_id,
                &b.call_id,
            ))
        });

        Ok(page(calls.into_iter(), offset, limit))
    }

    async fn get_runtime_call(
        &self,
        spec_version: i32,
        module_id: &str,
        call_id: &str,
    ) -> RepositoryResult<Option<RuntimeCall>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data
            .runtime_calls
            .iter()
            .find(|c| {
                c.spec_version == spec_version && c.module_id == module_id && c.call_id == call_id
            })
            .cloned())
    }

    async fn list_runtime_call_params(
        &self,
        runtime_call_id: i32,
    ) -> RepositoryResult<Vec<RuntimeCallParam>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut params: Vec<RuntimeCallParam> = data
            .runtime_call_params
            .iter()
            .filter(|p| p.runtime_call_id == runtime_call_id)
            .cloned()
            .collect();
        params.sort_by_key(|p| p.id);

        Ok(params)
    }

    async fn list_runtime_events(
        &self,
        filter: &RuntimeMetadataFilter,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<RuntimeEvent>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut events: Vec<&RuntimeEvent> = data
            .runtime_events
            .iter()
            .filter(|e| {
                field_matches(filter.spec_version.as_ref(), &e.spec_version)
                    && field_matches(filter.module_id.as_deref(), e.module_id.as_str())
            })
            .collect();
        events.sort_by(|a, b| {
            (a.spec_version, &a.module_id, &a.event_id).cmp(&(
                b.spec_version,
                &b.module_id,
                &b.event_id,
            ))
        });

        Ok(page(events.into_iter(), offset, limit))
    }

    async fn get_runtime_event(
        &self,
        spec_version: i32,
        module_id: &str,
        event_id: &str,
    ) -> RepositoryResult<Option<RuntimeEvent>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data
            .runtime_events
            .iter()
            .find(|e| {
                e.spec_version == spec_version && e.module_id == module_id && e.event_id == event_id
            })
            .cloned())
    }

    async fn list_runtime_event_attributes(
        &self,
        runtime_event_id: i32,
    ) -> RepositoryResult<Vec<RuntimeEventAttribute>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut attributes: Vec<RuntimeEventAttribute> = data
            .runtime_event_attributes
            .iter()
            .filter(|a| a.runtime_event_id == runtime_event_id)
            .cloned()
            .collect();
        attributes.sort_by_key(|a| a.index);

        Ok(attributes)
    }

    // ============ Accounts ============

    async fn list_accounts(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Account>> {
        self.check_available()?;
        let data = self.data.read().await;

        let mut accounts: Vec<&Account> = data.accounts.iter().collect();
        accounts.sort_by(|a, b| {
            b.updated_at_block
                .cmp(&a.updated_at_block)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(page(accounts.into_iter(), offset, limit))
    }

    async fn get_account_by_id(&self, id: &str) -> RepositoryResult<Option<Account>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn get_account_by_address(&self, address: &str) -> RepositoryResult<Option<Account>> {
        self.check_available()?;
        let data = self.data.read().await;
        Ok(data.accounts.iter().find(|a| a.address == address).cloned())
    }
}

/// Hash of block `n`, hex encoded with `0x` prefix
pub fn block_hash(n: i32) -> String {
    format!("0x{:064x}", n)
}

/// Hash of the transfer extrinsic of block `n`, hex encoded without prefix
pub fn transfer_hash(n: i32) -> String {
    format!("{:064x}", 0xe000 + n)
}

/// Build the sample chain: [`BLOCK_COUNT`] blocks with a timestamp inherent
/// and a transfer from Alice to Bob each, under a single runtime.
pub fn sample_chain_data() -> ChainData {
    let mut data = ChainData::default();

    for n in 1..=BLOCK_COUNT {
        let timestamp = GENESIS_TIMESTAMP + 6 * i64::from(n - 1);

        data.blocks.push(Block {
            id: n,
            parent_id: n - 1,
            hash: block_hash(n),
            parent_hash: block_hash(n - 1),
            state_root: format!("0x{:064x}", 0x5000 + n),
            extrinsics_root: format!("0x{:064x}", 0xa000 + n),
            count_extrinsics: EXTRINSICS_PER_BLOCK,
            count_extrinsics_unsigned: 1,
            count_extrinsics_signed: 1,
            count_extrinsics_error: 0,
            count_extrinsics_success: EXTRINSICS_PER_BLOCK,
            count_events: EVENTS_PER_BLOCK,
            count_events_system: 2,
            count_events_module: 1,
            count_events_extrinsic: EVENTS_PER_BLOCK,
            count_accounts_new: if n == 1 { 2 } else { 0 },
            count_log: 1,
            datetime: DateTime::from_timestamp(timestamp, 0).map(|dt| dt.naive_utc()),
            spec_version_id: SPEC_VERSION,
            logs: Some(json!(["0x0642414245"])),
            debug_info: Some(json!({ "author": format!("0x{ALICE_ACCOUNT_ID}") })),
        });

        data.block_totals.push(BlockTotal {
            id: n,
            session_id: Some(n / 10),
            total_extrinsics: i64::from(n * EXTRINSICS_PER_BLOCK),
            total_extrinsics_signed: i64::from(n),
            total_events: i64::from(n * EVENTS_PER_BLOCK),
            total_events_module: i64::from(n),
            total_accounts: 2,
        });

        data.extrinsics.push(Extrinsic {
            block_id: n,
            extrinsic_idx: 0,
            extrinsic_hash: None,
            extrinsic_length: Some("10".to_string()),
            extrinsic_version: Some("04".to_string()),
            signed: 0,
            unsigned: 1,
            address: None,
            account_index: None,
            signature: None,
            nonce: None,
            era: None,
            call: Some("0200".to_string()),
            module_id: "timestamp".to_string(),
            call_id: "set".to_string(),
            params: Some(json!([
                { "name": "now", "type": "Compact<Moment>", "value": timestamp }
            ])),
            success: 1,
            error: 0,
            spec_version_id: SPEC_VERSION,
            codec_error: false,
        });

        data.extrinsics.push(Extrinsic {
            block_id: n,
            extrinsic_idx: 1,
            extrinsic_hash: Some(transfer_hash(n)),
            extrinsic_length: Some("145".to_string()),
            extrinsic_version: Some("84".to_string()),
            signed: 1,
            unsigned: 0,
            address: Some(ALICE_ACCOUNT_ID.to_string()),
            account_index: None,
            signature: Some(format!("{:0128x}", n)),
            nonce: Some(n - 1),
            era: Some("00".to_string()),
            call: Some("0600".to_string()),
            module_id: "balances".to_string(),
            call_id: "transfer".to_string(),
            params: Some(json!([
                { "name": "dest", "type": "Address", "value": format!("0x{BOB_ACCOUNT_ID}") },
                { "name": "value", "type": "Compact<Balance>", "value": TRANSFER_VALUE }
            ])),
            success: 1,
            error: 0,
            spec_version_id: SPEC_VERSION,
            codec_error: false,
        });

        let success = |event_idx: i32, extrinsic_idx: i32| Event {
            block_id: n,
            event_idx,
            extrinsic_idx: Some(extrinsic_idx),
            type_: Some("0000".to_string()),
            spec_version_id: SPEC_VERSION,
            module_id: "system".to_string(),
            event_id: "ExtrinsicSuccess".to_string(),
            system: 1,
            module: 0,
            phase: Some(0),
            attributes: Some(json!([
                { "type": "DispatchInfo", "value": { "weight": 10_000, "class": "Normal" } }
            ])),
            codec_error: false,
        };

        data.events.push(success(0, 0));
        data.events.push(Event {
            block_id: n,
            event_idx: 1,
            extrinsic_idx: Some(1),
            type_: Some("0602".to_string()),
            spec_version_id: SPEC_VERSION,
            module_id: "balances".to_string(),
            event_id: "Transfer".to_string(),
            system: 0,
            module: 1,
            phase: Some(0),
            attributes: Some(json!([
                { "type": "AccountId", "value": format!("0x{ALICE_ACCOUNT_ID}") },
                { "type": "AccountId", "value": format!("0x{BOB_ACCOUNT_ID}") },
                { "type": "Balance", "value": TRANSFER_VALUE },
                { "type": "Balance", "value": TRANSFER_FEE }
            ])),
            codec_error: false,
        });
        data.events.push(success(2, 1));

        data.logs.push(Log {
            block_id: n,
            log_idx: 0,
            type_id: 6,
            type_: "PreRuntime".to_string(),
            data: Some(json!({ "engine": "BABE", "data": format!("0x{:08x}", n) })),
        });
    }

    data.runtimes.push(Runtime {
        id: SPEC_VERSION,
        impl_name: Some("substrate-node".to_string()),
        impl_version: Some(1),
        spec_version: SPEC_VERSION,
        spec_name: Some("node".to_string()),
        authoring_version: Some(1),
        apis: Some(json!([["0xdf6acb689907609b", 2]])),
        json_metadata: Some(json!({ "magicNumber": 1_635_018_093 })),
        json_metadata_decoded: Some(json!({ "metadata": { "modules": [] } })),
        count_modules: 3,
        count_call_functions: 2,
        count_storage_functions: 4,
        count_events: 2,
    });

    for (id, module_id, name) in [
        (1, "system", "System"),
        (2, "timestamp", "Timestamp"),
        (3, "balances", "Balances"),
    ] {
        data.runtime_modules.push(RuntimeModule {
            id,
            spec_version: SPEC_VERSION,
            module_id: module_id.to_string(),
            prefix: Some(name.to_string()),
            name: Some(name.to_string()),
            count_call_functions: i32::from(module_id != "system"),
            count_storage_functions: if module_id == "timestamp" { 1 } else { 2 },
            count_events: i32::from(module_id != "timestamp"),
        });
    }

    data.runtime_calls.push(RuntimeCall {
        id: 1,
        spec_version: SPEC_VERSION,
        module_id: "timestamp".to_string(),
        call_id: "set".to_string(),
        index: 0,
        prefix: Some("Timestamp".to_string()),
        code: Some("0x0200".to_string()),
        name: Some("set".to_string()),
        lookup: Some("0200".to_string()),
        documentation: Some(" Set the current time.".to_string()),
        count_params: 1,
    });
    data.runtime_calls.push(RuntimeCall {
        id: 2,
        spec_version: SPEC_VERSION,
        module_id: "balances".to_string(),
        call_id: "transfer".to_string(),
        index: 0,
        prefix: Some("Balances".to_string()),
        code: Some("0x0600".to_string()),
        name: Some("transfer".to_string()),
        lookup: Some("0600".to_string()),
        documentation: Some(" Transfer some liquid free balance to another account.".to_string()),
        count_params: 2,
    });

    for (id, runtime_call_id, name, type_) in [
        (1, 1, "now", "Compact<Moment>"),
        (2, 2, "dest", "Address"),
        (3, 2, "value", "Compact<Balance>"),
    ] {
        data.runtime_call_params.push(RuntimeCallParam {
            id,
            runtime_call_id,
            name: Some(name.to_string()),
            type_: Some(type_.to_string()),
        });
    }

    data.runtime_events.push(RuntimeEvent {
        id: 1,
        spec_version: SPEC_VERSION,
        module_id: "system".to_string(),
        event_id: "ExtrinsicSuccess".to_string(),
        index: 0,
        prefix: Some("System".to_string()),
        code: Some("0x0000".to_string()),
        name: Some("ExtrinsicSuccess".to_string()),
        lookup: Some("0000".to_string()),
        documentation: Some(" An extrinsic completed successfully.".to_string()),
        count_attributes: 1,
    });
    data.runtime_events.push(RuntimeEvent {
        id: 2,
        spec_version: SPEC_VERSION,
        module_id: "balances".to_string(),
        event_id: "Transfer".to_string(),
        index: 2,
        prefix: Some("Balances".to_string()),
        code: Some("0x0602".to_string()),
        name: Some("Transfer".to_string()),
        lookup: Some("0602".to_string()),
        documentation: Some(" Transfer succeeded (from, to, value, fees).".to_string()),
        count_attributes: 4,
    });

    for (id, runtime_event_id, index, type_) in [
        (1, 1, 0, "DispatchInfo"),
        (2, 2, 0, "AccountId"),
        (3, 2, 1, "AccountId"),
        (4, 2, 2, "Balance"),
        (5, 2, 3, "Balance"),
    ] {
        data.runtime_event_attributes.push(RuntimeEventAttribute {
            id,
            runtime_event_id,
            index,
            type_: Some(type_.to_string()),
        });
    }

    let moved = i64::from(BLOCK_COUNT) * TRANSFER_VALUE;
    let fees = i64::from(BLOCK_COUNT) * TRANSFER_FEE;
    for (id, address, balance) in [
        (ALICE_ACCOUNT_ID, ALICE_SS58, 1_000_000_000_000_000 - moved - fees),
        (BOB_ACCOUNT_ID, BOB_SS58, 1_000_000_000_000_000 + moved),
    ] {
        data.accounts.push(Account {
            id: id.to_string(),
            address: address.to_string(),
            is_reaped: false,
            is_validator: false,
            is_nominator: false,
            is_contract: false,
            count_reaped: 0,
            balance: BigDecimal::from(balance),
            created_at_block: 1,
            updated_at_block: BLOCK_COUNT,
        });
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_chain_pages_like_the_database() {
        let repo = MockRepository::sample_chain();

        let first = repo.list_blocks(0, 25).await.unwrap();
        let second = repo.list_blocks(25, 25).await.unwrap();
        let third = repo.list_blocks(50, 25).await.unwrap();

        assert_eq!(first.len(), 25);
        assert_eq!(first[0].id, BLOCK_COUNT);
        assert_eq!(
            second.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![5, 4, 3, 2, 1]
        );
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn extrinsic_filter_narrows_by_signer() {
        let repo = MockRepository::sample_chain();

        let filter = ExtrinsicFilter {
            address: Some(ALICE_ACCOUNT_ID.to_string()),
            ..Default::default()
        };
        let signed = repo.list_extrinsics(&filter, 0, 100).await.unwrap();
        assert_eq!(signed.len(), BLOCK_COUNT as usize);
        assert!(signed.iter().all(|e| e.signed == 1));

        let filter = ExtrinsicFilter {
            address: Some(BOB_ACCOUNT_ID.to_string()),
            ..Default::default()
        };
        assert!(repo.list_extrinsics(&filter, 0, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn events_of_a_block_keep_their_order() {
        let repo = MockRepository::sample_chain();

        let filter = EventFilter {
            block_id: Some(3),
            ..Default::default()
        };
        let events = repo.list_events(&filter, 0, 100).await.unwrap();

        assert_eq!(
            events.iter().map(|e| e.event_idx).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[tokio::test]
    async fn unavailable_repository_fails_queries() {
        let repo = MockRepository::sample_chain();
        repo.set_unavailable(true);

        let err = repo.list_blocks(0, 10).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));

        repo.set_unavailable(false);
        assert!(repo.get_block_by_id(1).await.unwrap().is_some());
    }
}
