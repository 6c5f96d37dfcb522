//! Resources served by the explorer API
//!
//! A resource describes how one kind of entity is listed and looked up: its
//! backing query, the filters it understands, how an entity is serialized and
//! which relationships can be expanded. The [`ResourceEngine`] drives them and
//! takes care of caching.
//!
//! [`ResourceEngine`]: crate::services::engine::ResourceEngine

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    config::{non_zero_secs, ApiConfig, CacheConfig, Config},
    data::indexer_db::client::DBClient,
    error::{Error, Result},
    models::{ResourceId, ResourceObject},
};

pub mod accounts;
pub mod address;
pub mod blocks;
pub mod events;
pub mod extrinsics;
pub mod pagination;
pub mod request;
pub mod runtime;
pub mod stats;
pub mod transfers;

pub use address::AddressCodec;
pub use pagination::Page;
pub use request::{QueryParams, ResourceRequest};

/// Caching and paging settings of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Freshness of list responses, `None` disables caching
    pub list_ttl: Option<Duration>,
    /// Freshness of detail responses, `None` disables caching
    pub detail_ttl: Option<Duration>,
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// Whether detail lookups that found nothing are cached too
    pub cache_not_found: bool,
}

impl ResourceDescriptor {
    pub fn from_config(cache: &CacheConfig, api: &ApiConfig) -> Self {
        Self {
            list_ttl: cache.list_ttl(),
            detail_ttl: cache.detail_ttl(),
            default_page_size: api.default_page_size,
            max_page_size: api.max_page_size,
            cache_not_found: cache.cache_not_found,
        }
    }

    pub fn with_list_ttl_secs(mut self, secs: u64) -> Self {
        self.list_ttl = non_zero_secs(secs);
        self
    }

    pub fn with_detail_ttl_secs(mut self, secs: u64) -> Self {
        self.detail_ttl = non_zero_secs(secs);
        self
    }
}

impl Default for ResourceDescriptor {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default(), &ApiConfig::default())
    }
}

/// An entity that can be presented as a [`ResourceObject`]
///
/// Attributes are the serde representation of the entity, minus [`Self::EXCLUDED`].
pub trait ApiObject: Serialize {
    const KIND: &'static str;

    /// Fields never exposed as attributes
    const EXCLUDED: &'static [&'static str] = &[];

    fn object_id(&self) -> ResourceId;

    fn to_object(&self) -> Result<ResourceObject> {
        let Value::Object(mut attributes) = serde_json::to_value(self)? else {
            return Err(Error::Internal);
        };

        for field in Self::EXCLUDED {
            attributes.remove(*field);
        }

        Ok(ResourceObject::new(Self::KIND, self.object_id(), attributes))
    }
}

/// An ordered collection of entities that can be sliced
#[async_trait]
pub trait QuerySource: Send + Sync {
    type Item: Send;

    /// Items in `[offset, offset + limit)` of the ordered collection
    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Self::Item>>;
}

/// A paginated, filterable collection
#[async_trait]
pub trait ListResource: Send + Sync {
    type Item: ApiObject + Send + Sync;
    type Source: QuerySource<Item = Self::Item>;

    fn descriptor(&self) -> &ResourceDescriptor;

    /// The unfiltered collection
    fn source(&self) -> Self::Source;

    /// Narrow `source` according to the `filter[...]` parameters
    async fn apply_filters(
        &self,
        source: Self::Source,
        _params: &QueryParams,
    ) -> Result<Self::Source> {
        Ok(source)
    }

    async fn apply_paging(
        &self,
        source: Self::Source,
        params: &QueryParams,
    ) -> Result<Vec<Self::Item>> {
        let page = Page::from_params(params, self.descriptor())?;
        source.slice(page.offset(), page.size).await
    }

    fn serialize_item(&self, item: &Self::Item) -> Result<ResourceObject> {
        item.to_object()
    }

    /// Entries merged into the envelope's `meta`
    fn meta(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// A single entity addressed by an opaque identifier
#[async_trait]
pub trait DetailResource: Send + Sync {
    type Item: ApiObject + Send + Sync;

    fn descriptor(&self) -> &ResourceDescriptor;

    /// Resolve `item_id`, identifiers that cannot be parsed resolve to nothing
    async fn get_item(&self, item_id: &str) -> Result<Option<Self::Item>>;

    /// Names of the relationships that can be expanded, in the order they are included
    fn relationships(&self) -> &'static [&'static str] {
        &[]
    }

    async fn get_relationship(
        &self,
        _name: &str,
        _item: &Self::Item,
    ) -> Result<Vec<ResourceObject>> {
        Ok(Vec::new())
    }

    /// Expand the declared relationships listed in `include`
    async fn get_relationships(
        &self,
        include: &[String],
        item: &Self::Item,
    ) -> Result<Vec<(String, Vec<ResourceObject>)>> {
        let mut expanded = Vec::new();

        for name in self.relationships() {
            if include.iter().any(|requested| requested == name) {
                let related = self.get_relationship(name, item).await?;
                expanded.push((name.to_string(), related));
            }
        }

        Ok(expanded)
    }

    async fn serialize_item(&self, item: &Self::Item) -> Result<ResourceObject> {
        item.to_object()
    }

    fn meta(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// Split a `{first}-{second}` identifier made of two numbers
pub(crate) fn split_pair_id(item_id: &str) -> Option<(i32, i32)> {
    let (first, second) = item_id.split_once('-')?;
    Some((first.parse().ok()?, second.parse().ok()?))
}

/// Serialize every entity of `items`
pub fn to_objects<T: ApiObject>(items: &[T]) -> Result<Vec<ResourceObject>> {
    items.iter().map(ApiObject::to_object).collect()
}

/// Every resource of the API, built once at startup
#[derive(Clone)]
pub struct Resources {
    pub blocks: blocks::BlockList,
    pub block: blocks::BlockDetail,
    pub extrinsics: extrinsics::ExtrinsicList,
    pub extrinsic: extrinsics::ExtrinsicDetail,
    pub events: events::EventList,
    pub event: events::EventDetail,
    pub runtimes: runtime::RuntimeList,
    pub runtime: runtime::RuntimeDetail,
    pub runtime_module: runtime::RuntimeModuleDetail,
    pub runtime_calls: runtime::RuntimeCallList,
    pub runtime_call: runtime::RuntimeCallDetail,
    pub runtime_events: runtime::RuntimeEventList,
    pub runtime_event: runtime::RuntimeEventDetail,
    pub network_stats: stats::NetworkStatsDetail,
    pub accounts: accounts::AccountList,
    pub account: accounts::AccountDetail,
    pub transfers: transfers::TransferList,
}

impl Resources {
    pub fn new(db: DBClient, config: &Config) -> Self {
        let descriptor = ResourceDescriptor::from_config(&config.cache, &config.api);
        let codec = AddressCodec::new(config.api.ss58_format);

        Self {
            blocks: blocks::BlockList::new(db.clone(), descriptor.clone()),
            block: blocks::BlockDetail::new(db.clone(), descriptor.clone(), codec),
            extrinsics: extrinsics::ExtrinsicList::new(db.clone(), descriptor.clone(), codec),
            extrinsic: extrinsics::ExtrinsicDetail::new(db.clone(), descriptor.clone(), codec),
            events: events::EventList::new(db.clone(), descriptor.clone(), codec),
            event: events::EventDetail::new(db.clone(), descriptor.clone(), codec),
            runtimes: runtime::RuntimeList::new(db.clone(), descriptor.clone()),
            runtime: runtime::RuntimeDetail::new(db.clone(), descriptor.clone()),
            runtime_module: runtime::RuntimeModuleDetail::new(db.clone(), descriptor.clone()),
            runtime_calls: runtime::RuntimeCallList::new(db.clone(), descriptor.clone()),
            runtime_call: runtime::RuntimeCallDetail::new(db.clone(), descriptor.clone(), codec),
            runtime_events: runtime::RuntimeEventList::new(db.clone(), descriptor.clone()),
            runtime_event: runtime::RuntimeEventDetail::new(db.clone(), descriptor.clone(), codec),
            network_stats: stats::NetworkStatsDetail::new(db.clone(), descriptor.clone()),
            accounts: accounts::AccountList::new(db.clone(), descriptor.clone()),
            account: accounts::AccountDetail::new(db.clone(), descriptor.clone(), codec),
            transfers: transfers::TransferList::new(db, descriptor, codec),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    pub(crate) fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::default()
    }

    #[cfg(feature = "mocks")]
    pub(crate) fn sample_db() -> DBClient {
        use crate::data::indexer_db::mock_repository::MockRepository;

        DBClient::new(std::sync::Arc::new(MockRepository::sample_chain()))
    }

    #[derive(Serialize)]
    struct Sample {
        id: i32,
        name: &'static str,
        secret: &'static str,
    }

    impl ApiObject for Sample {
        const KIND: &'static str = "sample";
        const EXCLUDED: &'static [&'static str] = &["secret"];

        fn object_id(&self) -> ResourceId {
            self.id.into()
        }
    }

    #[test]
    fn excluded_fields_are_not_attributes() {
        let object = Sample {
            id: 7,
            name: "seven",
            secret: "hidden",
        }
        .to_object()
        .unwrap();

        assert_eq!(object.kind, "sample");
        assert_eq!(object.id, ResourceId::Number(7));
        assert_eq!(Value::Object(object.attributes), json!({ "id": 7, "name": "seven" }));
    }

    #[test]
    fn pair_ids_need_two_numbers() {
        assert_eq!(split_pair_id("12-3"), Some((12, 3)));
        assert_eq!(split_pair_id("12"), None);
        assert_eq!(split_pair_id("12-x"), None);
        assert_eq!(split_pair_id("1-2-3"), None);
    }

    #[test]
    fn descriptor_overrides_keep_other_settings() {
        let descriptor = ResourceDescriptor::default().with_list_ttl_secs(60);

        assert_eq!(descriptor.list_ttl, Some(Duration::from_secs(60)));
        assert_eq!(descriptor.detail_ttl, ResourceDescriptor::default().detail_ttl);
        assert_eq!(ResourceDescriptor::default().with_detail_ttl_secs(0).detail_ttl, None);
    }
}
