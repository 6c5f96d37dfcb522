use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;

use crate::{schema::data_extrinsic, DbConnection};

/// An extrinsic, keyed by the block it was included in and its position there.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = data_extrinsic)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Extrinsic {
    pub block_id: i32,
    pub extrinsic_idx: i32,
    /// Hex encoded, without `0x` prefix
    pub extrinsic_hash: Option<String>,
    pub extrinsic_length: Option<String>,
    pub extrinsic_version: Option<String>,
    pub signed: i16,
    pub unsigned: i16,
    /// Hex encoded account id of the signer, without `0x` prefix
    pub address: Option<String>,
    pub account_index: Option<String>,
    pub signature: Option<String>,
    pub nonce: Option<i32>,
    pub era: Option<String>,
    pub call: Option<String>,
    pub module_id: String,
    pub call_id: String,
    pub params: Option<serde_json::Value>,
    pub success: i16,
    pub error: i16,
    pub spec_version_id: i32,
    pub codec_error: bool,
}

impl Extrinsic {
    pub async fn get<'a>(
        conn: &mut DbConnection<'a>,
        block_id: i32,
        extrinsic_idx: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_extrinsic::table
            .find((block_id, extrinsic_idx))
            .select(Extrinsic::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn get_by_hash<'a>(
        conn: &mut DbConnection<'a>,
        hash: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_extrinsic::table
            .filter(data_extrinsic::extrinsic_hash.eq(hash))
            .select(Extrinsic::as_select())
            .first(conn)
            .await
            .optional()
    }
}
