//! Runtime versions and the metadata they declare

use async_trait::async_trait;
use explorer_indexer_db::models::{
    Runtime, RuntimeCall, RuntimeCallParam, RuntimeEvent, RuntimeEventAttribute, RuntimeModule,
};

use super::{
    events::event_object, extrinsics::extrinsic_object, to_objects, AddressCodec, ApiObject,
    DetailResource, ListResource, QueryParams, QuerySource, ResourceDescriptor,
};
use crate::{
    constants::{
        api::RECENT_ITEMS,
        database::UNBOUNDED,
        ttl::{RUNTIME_LIST_SECS, RUNTIME_METADATA_LIST_SECS},
    },
    data::indexer_db::{
        client::DBClient,
        repository::{EventFilter, ExtrinsicFilter, RuntimeMetadataFilter},
    },
    error::Result,
    models::{ResourceId, ResourceObject},
};

impl ApiObject for Runtime {
    const KIND: &'static str = "runtime";
    const EXCLUDED: &'static [&'static str] = &["json_metadata", "json_metadata_decoded"];

    fn object_id(&self) -> ResourceId {
        self.spec_version.into()
    }
}

impl ApiObject for RuntimeModule {
    const KIND: &'static str = "runtimemodule";

    fn object_id(&self) -> ResourceId {
        format!("{}-{}", self.spec_version, self.module_id).into()
    }
}

impl ApiObject for RuntimeCall {
    const KIND: &'static str = "runtimecall";

    fn object_id(&self) -> ResourceId {
        format!("{}-{}-{}", self.spec_version, self.module_id, self.call_id).into()
    }
}

impl ApiObject for RuntimeCallParam {
    const KIND: &'static str = "runtimecallparam";

    fn object_id(&self) -> ResourceId {
        self.id.into()
    }
}

impl ApiObject for RuntimeEvent {
    const KIND: &'static str = "runtimeevent";

    fn object_id(&self) -> ResourceId {
        format!("{}-{}-{}", self.spec_version, self.module_id, self.event_id).into()
    }
}

impl ApiObject for RuntimeEventAttribute {
    const KIND: &'static str = "runtimeeventattribute";

    fn object_id(&self) -> ResourceId {
        self.id.into()
    }
}

/// Narrow a metadata filter to the latest runtime when `filter[latestRuntime]` is set
///
/// Without any runtime indexed yet the filter is left untouched.
async fn apply_metadata_filters(
    db: &DBClient,
    mut filter: RuntimeMetadataFilter,
    params: &QueryParams,
) -> Result<RuntimeMetadataFilter> {
    if params.filter("latestRuntime").is_some() {
        if let Some(latest) = db.get_latest_runtime().await? {
            filter.spec_version = Some(latest.spec_version);
        }
    }

    filter.module_id = params.filter("module_id").map(str::to_string);
    Ok(filter)
}

#[derive(Clone)]
pub struct RuntimeSource {
    db: DBClient,
}

#[async_trait]
impl QuerySource for RuntimeSource {
    type Item = Runtime;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Runtime>> {
        self.db.list_runtimes(offset, limit).await
    }
}

#[derive(Clone)]
pub struct RuntimeList {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl RuntimeList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self {
            db,
            descriptor: descriptor.with_list_ttl_secs(RUNTIME_LIST_SECS),
        }
    }
}

#[async_trait]
impl ListResource for RuntimeList {
    type Item = Runtime;
    type Source = RuntimeSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> RuntimeSource {
        RuntimeSource {
            db: self.db.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RuntimeDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl RuntimeDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self { db, descriptor }
    }
}

#[async_trait]
impl DetailResource for RuntimeDetail {
    type Item = Runtime;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<Runtime>> {
        match item_id.parse() {
            Ok(spec_version) => self.db.get_runtime(spec_version).await,
            Err(_) => Ok(None),
        }
    }

    fn relationships(&self) -> &'static [&'static str] {
        &["modules"]
    }

    async fn get_relationship(
        &self,
        name: &str,
        runtime: &Runtime,
    ) -> Result<Vec<ResourceObject>> {
        match name {
            "modules" => {
                to_objects(&self.db.list_runtime_modules(runtime.spec_version).await?)
            }
            _ => Ok(Vec::new()),
        }
    }
}

/// A module of a runtime, by `{spec_version}-{module_id}`
#[derive(Clone)]
pub struct RuntimeModuleDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl RuntimeModuleDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self { db, descriptor }
    }
}

#[async_trait]
impl DetailResource for RuntimeModuleDetail {
    type Item = RuntimeModule;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<RuntimeModule>> {
        let Some((spec_version, module_id)) = item_id.split_once('-') else {
            return Ok(None);
        };
        let Ok(spec_version) = spec_version.parse() else {
            return Ok(None);
        };

        self.db.get_runtime_module(spec_version, module_id).await
    }

    fn relationships(&self) -> &'static [&'static str] {
        &["calls", "events"]
    }

    async fn get_relationship(
        &self,
        name: &str,
        module: &RuntimeModule,
    ) -> Result<Vec<ResourceObject>> {
        let filter = RuntimeMetadataFilter {
            spec_version: Some(module.spec_version),
            module_id: Some(module.module_id.clone()),
        };

        match name {
            "calls" => to_objects(&self.db.list_runtime_calls(&filter, 0, UNBOUNDED).await?),
            "events" => to_objects(&self.db.list_runtime_events(&filter, 0, UNBOUNDED).await?),
            _ => Ok(Vec::new()),
        }
    }
}

/// Split a `{spec_version}-{module_id}-{name}` identifier
fn split_metadata_id(item_id: &str) -> Option<(i32, &str, &str)> {
    let mut parts = item_id.splitn(3, '-');
    let spec_version = parts.next()?.parse().ok()?;
    let module_id = parts.next()?;
    let name = parts.next()?;

    Some((spec_version, module_id, name))
}

#[derive(Clone)]
pub struct RuntimeCallSource {
    db: DBClient,
    filter: RuntimeMetadataFilter,
}

#[async_trait]
impl QuerySource for RuntimeCallSource {
    type Item = RuntimeCall;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<RuntimeCall>> {
        self.db.list_runtime_calls(&self.filter, offset, limit).await
    }
}

#[derive(Clone)]
pub struct RuntimeCallList {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl RuntimeCallList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self {
            db,
            descriptor: descriptor.with_list_ttl_secs(RUNTIME_METADATA_LIST_SECS),
        }
    }
}

#[async_trait]
impl ListResource for RuntimeCallList {
    type Item = RuntimeCall;
    type Source = RuntimeCallSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> RuntimeCallSource {
        RuntimeCallSource {
            db: self.db.clone(),
            filter: RuntimeMetadataFilter::default(),
        }
    }

    async fn apply_filters(
        &self,
        source: RuntimeCallSource,
        params: &QueryParams,
    ) -> Result<RuntimeCallSource> {
        Ok(RuntimeCallSource {
            filter: apply_metadata_filters(&self.db, source.filter, params).await?,
            db: source.db,
        })
    }
}

#[derive(Clone)]
pub struct RuntimeCallDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl RuntimeCallDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }
}

#[async_trait]
impl DetailResource for RuntimeCallDetail {
    type Item = RuntimeCall;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<RuntimeCall>> {
        match split_metadata_id(item_id) {
            Some((spec_version, module_id, call_id)) => {
                self.db
                    .get_runtime_call(spec_version, module_id, call_id)
                    .await
            }
            None => Ok(None),
        }
    }

    fn relationships(&self) -> &'static [&'static str] {
        &["params", "recent_extrinsics"]
    }

    async fn get_relationship(
        &self,
        name: &str,
        call: &RuntimeCall,
    ) -> Result<Vec<ResourceObject>> {
        match name {
            "params" => to_objects(&self.db.list_runtime_call_params(call.id).await?),
            // across every runtime version
            "recent_extrinsics" => {
                let filter = ExtrinsicFilter {
                    module_id: Some(call.module_id.clone()),
                    call_id: Some(call.call_id.clone()),
                    ..Default::default()
                };

                self.db
                    .list_extrinsics(&filter, 0, RECENT_ITEMS)
                    .await?
                    .iter()
                    .map(|extrinsic| extrinsic_object(extrinsic, &self.codec))
                    .collect()
            }
            _ => Ok(Vec::new()),
        }
    }
}

#[derive(Clone)]
pub struct RuntimeEventSource {
    db: DBClient,
    filter: RuntimeMetadataFilter,
}

#[async_trait]
impl QuerySource for RuntimeEventSource {
    type Item = RuntimeEvent;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<RuntimeEvent>> {
        self.db.list_runtime_events(&self.filter, offset, limit).await
    }
}

#[derive(Clone)]
pub struct RuntimeEventList {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl RuntimeEventList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self {
            db,
            descriptor: descriptor.with_list_ttl_secs(RUNTIME_METADATA_LIST_SECS),
        }
    }
}

#[async_trait]
impl ListResource for RuntimeEventList {
    type Item = RuntimeEvent;
    type Source = RuntimeEventSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> RuntimeEventSource {
        RuntimeEventSource {
            db: self.db.clone(),
            filter: RuntimeMetadataFilter::default(),
        }
    }

    async fn apply_filters(
        &self,
        source: RuntimeEventSource,
        params: &QueryParams,
    ) -> Result<RuntimeEventSource> {
        Ok(RuntimeEventSource {
            filter: apply_metadata_filters(&self.db, source.filter, params).await?,
            db: source.db,
        })
    }
}

#[derive(Clone)]
pub struct RuntimeEventDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl RuntimeEventDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }
}

#[async_trait]
impl DetailResource for RuntimeEventDetail {
    type Item = RuntimeEvent;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<RuntimeEvent>> {
        match split_metadata_id(item_id) {
            Some((spec_version, module_id, event_id)) => {
                self.db
                    .get_runtime_event(spec_version, module_id, event_id)
                    .await
            }
            None => Ok(None),
        }
    }

    fn relationships(&self) -> &'static [&'static str] {
        &["attributes", "recent_events"]
    }

    async fn get_relationship(
        &self,
        name: &str,
        event: &RuntimeEvent,
    ) -> Result<Vec<ResourceObject>> {
        match name {
            "attributes" => to_objects(&self.db.list_runtime_event_attributes(event.id).await?),
            "recent_events" => {
                let filter = EventFilter {
                    module_id: Some(event.module_id.clone()),
                    event_id: Some(event.event_id.clone()),
                    ..Default::default()
                };

                self.db
                    .list_events(&filter, 0, RECENT_ITEMS)
                    .await?
                    .iter()
                    .map(|event| event_object(event, &self.codec))
                    .collect()
            }
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::resources::{
        request::get,
        tests::{descriptor, sample_db},
    };

    #[test]
    fn metadata_ids_keep_dashes_in_the_name() {
        assert_eq!(
            split_metadata_id("1-balances-transfer"),
            Some((1, "balances", "transfer"))
        );
        assert_eq!(
            split_metadata_id("1-balances-transfer-keep-alive"),
            Some((1, "balances", "transfer-keep-alive"))
        );
        assert_eq!(split_metadata_id("1-balances"), None);
        assert_eq!(split_metadata_id("one-balances-transfer"), None);
    }

    #[test]
    fn metadata_lists_are_cached_longer() {
        let runtimes = RuntimeList::new(sample_db(), descriptor());
        let calls = RuntimeCallList::new(sample_db(), descriptor());

        assert_eq!(runtimes.descriptor().list_ttl, Some(Duration::from_secs(60)));
        assert_eq!(calls.descriptor().list_ttl, Some(Duration::from_secs(3600)));
        assert_eq!(calls.descriptor().detail_ttl, descriptor().detail_ttl);
    }

    #[tokio::test]
    async fn runtime_hides_raw_metadata() {
        let detail = RuntimeDetail::new(sample_db(), descriptor());
        let runtime = detail.get_item("1").await.unwrap().unwrap();

        let object = detail.serialize_item(&runtime).await.unwrap();

        assert_eq!(object.id, ResourceId::Number(1));
        assert!(!object.attributes.contains_key("json_metadata"));
        assert!(!object.attributes.contains_key("json_metadata_decoded"));
        assert!(detail.get_item("latest").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn latest_runtime_filter_narrows_calls() {
        let list = RuntimeCallList::new(sample_db(), descriptor());
        let request = get(
            "/system/runtime-call?filter%5BlatestRuntime%5D=true&filter%5Bmodule_id%5D=balances",
        );

        let source = list.apply_filters(list.source(), &request.params).await.unwrap();
        assert_eq!(
            source.filter,
            RuntimeMetadataFilter {
                spec_version: Some(1),
                module_id: Some("balances".to_string()),
            }
        );

        let calls = list.apply_paging(source, &request.params).await.unwrap();
        let ids: Vec<_> = calls.iter().map(|c| c.object_id()).collect();
        assert_eq!(ids, vec![ResourceId::Text("1-balances-transfer".into())]);
    }

    #[tokio::test]
    async fn module_includes_its_calls_and_events() {
        let detail = RuntimeModuleDetail::new(sample_db(), descriptor());
        let module = detail.get_item("1-balances").await.unwrap().unwrap();

        let include = vec!["events".to_string(), "calls".to_string()];
        let relationships = detail.get_relationships(&include, &module).await.unwrap();

        assert_eq!(relationships[0].0, "calls");
        assert_eq!(relationships[0].1[0].kind, "runtimecall");
        assert_eq!(relationships[1].0, "events");
        assert_eq!(relationships[1].1[0].attributes["event_id"], json!("Transfer"));
    }

    #[tokio::test]
    async fn call_includes_params_and_recent_extrinsics() {
        let detail = RuntimeCallDetail::new(sample_db(), descriptor(), AddressCodec::new(42));
        let call = detail.get_item("1-balances-transfer").await.unwrap().unwrap();

        let params = detail.get_relationship("params", &call).await.unwrap();
        let recent = detail.get_relationship("recent_extrinsics", &call).await.unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(recent.len(), RECENT_ITEMS as usize);
        assert_eq!(recent[0].id, ResourceId::Text("30-1".into()));
    }

    #[tokio::test]
    async fn event_includes_attributes_and_recent_events() {
        let detail = RuntimeEventDetail::new(sample_db(), descriptor(), AddressCodec::new(42));
        let event = detail.get_item("1-balances-Transfer").await.unwrap().unwrap();

        let attributes = detail.get_relationship("attributes", &event).await.unwrap();
        let recent = detail.get_relationship("recent_events", &event).await.unwrap();

        assert_eq!(attributes.len(), 4);
        assert_eq!(recent.len(), RECENT_ITEMS as usize);
        assert!(recent.iter().all(|e| e.kind == "event"));
    }
}
