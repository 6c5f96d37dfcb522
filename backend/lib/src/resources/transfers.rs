use async_trait::async_trait;
use explorer_indexer_db::models::Event;
use serde_json::{Map, Value};

use super::{AddressCodec, ListResource, QuerySource, ResourceDescriptor};
use crate::{
    data::indexer_db::{client::DBClient, repository::EventFilter},
    error::Result,
    models::ResourceObject,
};

const TRANSFER_KIND: &str = "balancetransfer";

/// `value` of the attribute at `index`
fn attribute(event: &Event, index: usize) -> Value {
    event
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.get(index))
        .and_then(|attribute| attribute.get("value"))
        .cloned()
        .unwrap_or(Value::Null)
}

/// A `balances.Transfer` event presented as a transfer
///
/// The event attributes are, in order: sender, destination, value and fee.
pub fn transfer_object(event: &Event, codec: &AddressCodec) -> Result<ResourceObject> {
    let id = format!("{}-{}", event.block_id, event.event_idx);
    let account = |index| {
        let account_id = attribute(event, index)
            .as_str()
            .map(|raw| raw.trim_start_matches("0x").to_string());
        let address = account_id.as_deref().and_then(|id| codec.encode(id));
        (address, account_id)
    };

    let (sender, sender_id) = account(0);
    let (destination, destination_id) = account(1);

    let mut attributes = Map::new();
    attributes.insert("block_id".to_string(), event.block_id.into());
    attributes.insert("event_idx".to_string(), id.clone().into());
    attributes.insert("sender".to_string(), sender.into());
    attributes.insert("sender_id".to_string(), sender_id.into());
    attributes.insert("destination".to_string(), destination.into());
    attributes.insert("destination_id".to_string(), destination_id.into());
    attributes.insert("value".to_string(), attribute(event, 2));
    attributes.insert("fee".to_string(), attribute(event, 3));

    Ok(ResourceObject::new(TRANSFER_KIND, id, attributes))
}

#[derive(Clone)]
pub struct TransferSource {
    db: DBClient,
}

#[async_trait]
impl QuerySource for TransferSource {
    type Item = Event;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Event>> {
        let filter = EventFilter {
            module_id: Some("balances".to_string()),
            event_id: Some("Transfer".to_string()),
            ..Default::default()
        };

        self.db.list_events(&filter, offset, limit).await
    }
}

/// Balance transfers, newest first
#[derive(Clone)]
pub struct TransferList {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl TransferList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }
}

#[async_trait]
impl ListResource for TransferList {
    type Item = Event;
    type Source = TransferSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> TransferSource {
        TransferSource {
            db: self.db.clone(),
        }
    }

    fn serialize_item(&self, event: &Event) -> Result<ResourceObject> {
        transfer_object(event, &self.codec)
    }
}
