use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;

use crate::{schema::data_account, DbConnection};

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = data_account)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Hex encoded public key, without `0x` prefix
    pub id: String,
    /// SS58 address as encoded by the indexer
    pub address: String,
    pub is_reaped: bool,
    pub is_validator: bool,
    pub is_nominator: bool,
    pub is_contract: bool,
    pub count_reaped: i32,
    pub balance: BigDecimal,
    pub created_at_block: i32,
    pub updated_at_block: i32,
}

impl Account {
    pub async fn get_by_id<'a>(
        conn: &mut DbConnection<'a>,
        id: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_account::table
            .find(id)
            .select(Account::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn get_by_address<'a>(
        conn: &mut DbConnection<'a>,
        address: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        data_account::table
            .filter(data_account::address.eq(address))
            .select(Account::as_select())
            .first(conn)
            .await
            .optional()
    }
}
