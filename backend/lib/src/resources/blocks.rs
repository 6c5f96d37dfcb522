use async_trait::async_trait;
use explorer_indexer_db::models::{Block, Log};

use super::{
    events::event_object, extrinsics::extrinsic_object, to_objects, AddressCodec, ApiObject,
    DetailResource, ListResource, QuerySource, ResourceDescriptor,
};
use crate::{
    constants::database::UNBOUNDED,
    data::indexer_db::{
        client::DBClient,
        repository::{EventFilter, ExtrinsicFilter},
    },
    error::Result,
    models::{ResourceId, ResourceObject},
};

impl ApiObject for Block {
    const KIND: &'static str = "block";
    const EXCLUDED: &'static [&'static str] = &["debug_info"];

    fn object_id(&self) -> ResourceId {
        self.id.into()
    }
}

impl ApiObject for Log {
    const KIND: &'static str = "log";

    fn object_id(&self) -> ResourceId {
        format!("{}-{}", self.block_id, self.log_idx).into()
    }
}

/// Blocks, newest first
#[derive(Clone)]
pub struct BlockSource {
    db: DBClient,
}

#[async_trait]
impl QuerySource for BlockSource {
    type Item = Block;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Block>> {
        self.db.list_blocks(offset, limit).await
    }
}

#[derive(Clone)]
pub struct BlockList {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl BlockList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self { db, descriptor }
    }
}

#[async_trait]
impl ListResource for BlockList {
    type Item = Block;
    type Source = BlockSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> BlockSource {
        BlockSource {
            db: self.db.clone(),
        }
    }
}

/// A block by number or by hash
#[derive(Clone)]
pub struct BlockDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl BlockDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }

    async fn extrinsics(&self, block: &Block, signed: Option<i16>) -> Result<Vec<ResourceObject>> {
        let filter = ExtrinsicFilter {
            block_id: Some(block.id),
            signed,
            ..Default::default()
        };

        self.db
            .list_extrinsics(&filter, 0, UNBOUNDED)
            .await?
            .iter()
            .map(|extrinsic| extrinsic_object(extrinsic, &self.codec))
            .collect()
    }
}

#[async_trait]
impl DetailResource for BlockDetail {
    type Item = Block;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<Block>> {
        match item_id.parse::<i32>() {
            Ok(number) => self.db.get_block_by_id(number).await,
            Err(_) => self.db.get_block_by_hash(item_id).await,
        }
    }

    fn relationships(&self) -> &'static [&'static str] {
        &["extrinsics", "transactions", "inherents", "events", "logs"]
    }

    async fn get_relationship(&self, name: &str, block: &Block) -> Result<Vec<ResourceObject>> {
        match name {
            "extrinsics" => self.extrinsics(block, None).await,
            "transactions" => self.extrinsics(block, Some(1)).await,
            "inherents" => self.extrinsics(block, Some(0)).await,
            "events" => {
                let filter = EventFilter {
                    block_id: Some(block.id),
                    system: Some(0),
                    ..Default::default()
                };

                self.db
                    .list_events(&filter, 0, UNBOUNDED)
                    .await?
                    .iter()
                    .map(|event| event_object(event, &self.codec))
                    .collect()
            }
            "logs" => to_objects(&self.db.list_block_logs(block.id).await?),
            _ => Ok(Vec::new()),
        }
    }
}
