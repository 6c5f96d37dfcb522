use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;

use crate::{
    schema::{
        runtime, runtime_call, runtime_call_param, runtime_event, runtime_event_attribute,
        runtime_module,
    },
    DbConnection,
};

/// A runtime version seen on chain, with its decoded metadata.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = runtime)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Runtime {
    pub id: i32,
    pub impl_name: Option<String>,
    pub impl_version: Option<i32>,
    pub spec_version: i32,
    pub spec_name: Option<String>,
    pub authoring_version: Option<i32>,
    pub apis: Option<serde_json::Value>,
    pub json_metadata: Option<serde_json::Value>,
    pub json_metadata_decoded: Option<serde_json::Value>,
    pub count_modules: i32,
    pub count_call_functions: i32,
    pub count_storage_functions: i32,
    pub count_events: i32,
}

impl Runtime {
    pub async fn get_by_spec_version<'a>(
        conn: &mut DbConnection<'a>,
        spec_version: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        runtime::table
            .filter(runtime::spec_version.eq(spec_version))
            .select(Runtime::as_select())
            .first(conn)
            .await
            .optional()
    }

    /// The most recent runtime, by spec version
    pub async fn get_latest<'a>(
        conn: &mut DbConnection<'a>,
    ) -> Result<Option<Self>, diesel::result::Error> {
        runtime::table
            .order(runtime::spec_version.desc())
            .select(Runtime::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn count<'a>(conn: &mut DbConnection<'a>) -> Result<i64, diesel::result::Error> {
        runtime::table.count().get_result(conn).await
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = runtime_module)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RuntimeModule {
    pub id: i32,
    pub spec_version: i32,
    pub module_id: String,
    pub prefix: Option<String>,
    pub name: Option<String>,
    pub count_call_functions: i32,
    pub count_storage_functions: i32,
    pub count_events: i32,
}

impl RuntimeModule {
    pub async fn get<'a>(
        conn: &mut DbConnection<'a>,
        spec_version: i32,
        module_id: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        runtime_module::table
            .filter(runtime_module::spec_version.eq(spec_version))
            .filter(runtime_module::module_id.eq(module_id))
            .select(RuntimeModule::as_select())
            .first(conn)
            .await
            .optional()
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = runtime_call)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RuntimeCall {
    pub id: i32,
    pub spec_version: i32,
    pub module_id: String,
    pub call_id: String,
    pub index: i32,
    pub prefix: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub lookup: Option<String>,
    pub documentation: Option<String>,
    pub count_params: i32,
}

impl RuntimeCall {
    pub async fn get<'a>(
        conn: &mut DbConnection<'a>,
        spec_version: i32,
        module_id: &str,
        call_id: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        runtime_call::table
            .filter(runtime_call::spec_version.eq(spec_version))
            .filter(runtime_call::module_id.eq(module_id))
            .filter(runtime_call::call_id.eq(call_id))
            .select(RuntimeCall::as_select())
            .first(conn)
            .await
            .optional()
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = runtime_call_param)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RuntimeCallParam {
    pub id: i32,
    pub runtime_call_id: i32,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

impl RuntimeCallParam {
    pub async fn get_all_by_call<'a>(
        conn: &mut DbConnection<'a>,
        runtime_call_id: i32,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        runtime_call_param::table
            .filter(runtime_call_param::runtime_call_id.eq(runtime_call_id))
            .order(runtime_call_param::id.asc())
            .select(RuntimeCallParam::as_select())
            .load(conn)
            .await
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = runtime_event)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RuntimeEvent {
    pub id: i32,
    pub spec_version: i32,
    pub module_id: String,
    pub event_id: String,
    pub index: i32,
    pub prefix: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub lookup: Option<String>,
    pub documentation: Option<String>,
    pub count_attributes: i32,
}

impl RuntimeEvent {
    pub async fn get<'a>(
        conn: &mut DbConnection<'a>,
        spec_version: i32,
        module_id: &str,
        event_id: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        runtime_event::table
            .filter(runtime_event::spec_version.eq(spec_version))
            .filter(runtime_event::module_id.eq(module_id))
            .filter(runtime_event::event_id.eq(event_id))
            .select(RuntimeEvent::as_select())
            .first(conn)
            .await
            .optional()
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = runtime_event_attribute)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RuntimeEventAttribute {
    pub id: i32,
    pub runtime_event_id: i32,
    pub index: i32,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

impl RuntimeEventAttribute {
    pub async fn get_all_by_event<'a>(
        conn: &mut DbConnection<'a>,
        runtime_event_id: i32,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        runtime_event_attribute::table
            .filter(runtime_event_attribute::runtime_event_id.eq(runtime_event_id))
            .order(runtime_event_attribute::index.asc())
            .select(RuntimeEventAttribute::as_select())
            .load(conn)
            .await
    }
}
