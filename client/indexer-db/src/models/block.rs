use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;

use crate::{
    schema::{data_block, data_block_total},
    DbConnection,
};

/// A block as indexed by the harvester.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = data_block)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Block {
    /// The block number.
    pub id: i32,
    pub parent_id: i32,
    pub hash: String,
    pub parent_hash: String,
    pub state_root: String,
    pub extrinsics_root: String,
    pub count_extrinsics: i32,
    pub count_extrinsics_unsigned: i32,
    pub count_extrinsics_signed: i32,
    pub count_extrinsics_error: i32,
    pub count_extrinsics_success: i32,
    pub count_events: i32,
    pub count_events_system: i32,
    pub count_events_module: i32,
    pub count_events_extrinsic: i32,
    pub count_accounts_new: i32,
    pub count_log: i32,
    #[serde(serialize_with = "crate::types::utc_datetime::serialize")]
    pub datetime: Option<NaiveDateTime>,
    pub spec_version_id: i32,
    pub logs: Option<serde_json::Value>,
    pub debug_info: Option<serde_json::Value>,
}

impl Block {
    pub async fn get_by_id<'a>(
        conn: &mut DbConnection<'a>,
        id: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_block::table
            .find(id)
            .select(Block::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn get_by_hash<'a>(
        conn: &mut DbConnection<'a>,
        hash: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_block::table
            .filter(data_block::hash.eq(hash))
            .select(Block::as_select())
            .first(conn)
            .await
            .optional()
    }
}

/// Running totals up to and including a block.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = data_block_total)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlockTotal {
    pub id: i32,
    pub session_id: Option<i32>,
    pub total_extrinsics: i64,
    pub total_extrinsics_signed: i64,
    pub total_events: i64,
    pub total_events_module: i64,
    pub total_accounts: i64,
}

impl BlockTotal {
    /// The totals row of the highest indexed block, if any
    pub async fn get_best<'a>(
        conn: &mut DbConnection<'a>,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_block_total::table
            .order(data_block_total::id.desc())
            .select(BlockTotal::as_select())
            .first(conn)
            .await
            .optional()
    }
}
