use async_trait::async_trait;
use explorer_indexer_db::models::Event;

use super::{
    extrinsics::encode_typed_values, split_pair_id, AddressCodec, ApiObject, DetailResource,
    ListResource, QueryParams, QuerySource, ResourceDescriptor,
};
use crate::{
    data::indexer_db::{client::DBClient, repository::EventFilter},
    error::Result,
    models::{ResourceId, ResourceObject},
};

impl ApiObject for Event {
    const KIND: &'static str = "event";

    fn object_id(&self) -> ResourceId {
        format!("{}-{}", self.block_id, self.event_idx).into()
    }
}

/// An event with its `AccountId` attributes shown as SS58
pub fn event_object(event: &Event, codec: &AddressCodec) -> Result<ResourceObject> {
    let mut object = event.to_object()?;

    if let Some(attributes) = object.attributes.get_mut("attributes") {
        encode_typed_values(attributes, "AccountId", codec);
    }

    Ok(object)
}

#[derive(Clone)]
pub struct EventSource {
    db: DBClient,
    filter: EventFilter,
}

#[async_trait]
impl QuerySource for EventSource {
    type Item = Event;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Event>> {
        self.db.list_events(&self.filter, offset, limit).await
    }
}

/// Events other than the per-extrinsic system bookkeeping
#[derive(Clone)]
pub struct EventList {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl EventList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }
}

#[async_trait]
impl ListResource for EventList {
    type Item = Event;
    type Source = EventSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> EventSource {
        EventSource {
            db: self.db.clone(),
            filter: EventFilter {
                system: Some(0),
                ..Default::default()
            },
        }
    }

    async fn apply_filters(
        &self,
        mut source: EventSource,
        params: &QueryParams,
    ) -> Result<EventSource> {
        source.filter.module_id = params.filter("module_id").map(str::to_string);
        source.filter.event_id = params.filter("event_id").map(str::to_string);
        Ok(source)
    }

    fn serialize_item(&self, event: &Event) -> Result<ResourceObject> {
        event_object(event, &self.codec)
    }
}

#[derive(Clone)]
pub struct EventDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl EventDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }
}

#[async_trait]
impl DetailResource for EventDetail {
    type Item = Event;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<Event>> {
        match split_pair_id(item_id) {
            Some((block_id, event_idx)) => self.db.get_event(block_id, event_idx).await,
            None => Ok(None),
        }
    }

    async fn serialize_item(&self, event: &Event) -> Result<ResourceObject> {
        let mut object = event_object(event, &self.codec)?;

        let documentation = self
            .db
            .get_runtime_event(event.spec_version_id, &event.module_id, &event.event_id)
            .await?
            .and_then(|runtime_event| runtime_event.documentation);
        object
            .attributes
            .insert("documentation".to_string(), documentation.into());

        Ok(object)
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        constants::sample::accounts::{ALICE_SS58, BOB_SS58},
        resources::{
            request::get,
            tests::{descriptor, sample_db},
        },
    };

    #[tokio::test]
    async fn list_leaves_out_system_events() {
        let list = EventList::new(sample_db(), descriptor(), AddressCodec::new(42));
        let request = get("/system/event");

        let source = list.apply_filters(list.source(), &request.params).await.unwrap();
        let events = list.apply_paging(source, &request.params).await.unwrap();

        assert_eq!(events.len(), 25);
        assert!(events.iter().all(|e| e.system == 0));
        assert_eq!(events[0].block_id, 30);
    }

    #[tokio::test]
    async fn detail_shows_accounts_and_documentation() {
        let detail = EventDetail::new(sample_db(), descriptor(), AddressCodec::new(42));
        let event = detail.get_item("9-1").await.unwrap().unwrap();

        let object = detail.serialize_item(&event).await.unwrap();

        assert_eq!(object.id, ResourceId::Text("9-1".into()));
        assert_eq!(object.attributes["attributes"][0]["value"], json!(ALICE_SS58));
        assert_eq!(object.attributes["attributes"][1]["value"], json!(BOB_SS58));
        assert_eq!(
            object.attributes["documentation"],
            json!(" Transfer succeeded (from, to, value, fees).")
        );
        assert!(detail.get_item("9").await.unwrap().is_none());
    }
}
