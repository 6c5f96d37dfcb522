use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;

use crate::{schema::data_event, DbConnection};

/// An event emitted in a block.
///
/// `system` is set for the bookkeeping events emitted by the system module
/// for every extrinsic (`ExtrinsicSuccess`, `ExtrinsicFailed`).
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = data_event)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
    pub block_id: i32,
    pub event_idx: i32,
    pub extrinsic_idx: Option<i32>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub spec_version_id: i32,
    pub module_id: String,
    pub event_id: String,
    pub system: i16,
    pub module: i16,
    pub phase: Option<i16>,
    /// Decoded attributes, a list of `{"type": .., "value": ..}` objects
    pub attributes: Option<serde_json::Value>,
    pub codec_error: bool,
}

impl Event {
    pub async fn get<'a>(
        conn: &mut DbConnection<'a>,
        block_id: i32,
        event_idx: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_event::table
            .find((block_id, event_idx))
            .select(Event::as_select())
            .first(conn)
            .await
            .optional()
    }
}
