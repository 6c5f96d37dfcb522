use diesel::prelude::*;
use serde::Serialize;

use crate::schema::data_log;

/// A digest log item of a block header.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = data_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Log {
    pub block_id: i32,
    pub log_idx: i32,
    pub type_id: i32,
    #[serde(rename = "type")]
    pub type_: String,
    pub data: Option<serde_json::Value>,
}
