use async_trait::async_trait;
use explorer_indexer_db::models::Extrinsic;
use serde_json::Value;

use super::{
    split_pair_id, AddressCodec, ApiObject, DetailResource, ListResource, QueryParams,
    QuerySource, ResourceDescriptor,
};
use crate::{
    data::indexer_db::{client::DBClient, repository::ExtrinsicFilter},
    error::{Error, Result},
    models::{ResourceId, ResourceObject},
};

impl ApiObject for Extrinsic {
    const KIND: &'static str = "extrinsic";

    fn object_id(&self) -> ResourceId {
        format!("{}-{}", self.block_id, self.extrinsic_idx).into()
    }
}

/// Replace the hex account ids of the `{type, value}` entries of `type_name`
/// by their SS58 address
pub(crate) fn encode_typed_values(values: &mut Value, type_name: &str, codec: &AddressCodec) {
    let Some(values) = values.as_array_mut() else {
        return;
    };

    for entry in values {
        if entry.get("type").and_then(Value::as_str) != Some(type_name) {
            continue;
        }

        let encoded = entry
            .get("value")
            .and_then(Value::as_str)
            .and_then(|raw| codec.encode(raw));
        if let Some(address) = encoded {
            entry["value"] = Value::String(address);
        }
    }
}

/// An extrinsic with its signer and `Address` parameters shown as SS58
pub fn extrinsic_object(extrinsic: &Extrinsic, codec: &AddressCodec) -> Result<ResourceObject> {
    let mut object = extrinsic.to_object()?;

    if let Some(address) = extrinsic.address.as_deref().and_then(|a| codec.encode(a)) {
        object
            .attributes
            .insert("address".to_string(), Value::String(address));
    }

    if let Some(params) = object.attributes.get_mut("params") {
        encode_typed_values(params, "Address", codec);
    }

    Ok(object)
}

#[derive(Clone)]
pub struct ExtrinsicSource {
    db: DBClient,
    filter: ExtrinsicFilter,
}

#[async_trait]
impl QuerySource for ExtrinsicSource {
    type Item = Extrinsic;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Extrinsic>> {
        self.db.list_extrinsics(&self.filter, offset, limit).await
    }
}

#[derive(Clone)]
pub struct ExtrinsicList {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl ExtrinsicList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }
}

#[async_trait]
impl ListResource for ExtrinsicList {
    type Item = Extrinsic;
    type Source = ExtrinsicSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> ExtrinsicSource {
        ExtrinsicSource {
            db: self.db.clone(),
            filter: ExtrinsicFilter::default(),
        }
    }

    async fn apply_filters(
        &self,
        mut source: ExtrinsicSource,
        params: &QueryParams,
    ) -> Result<ExtrinsicSource> {
        source.filter.signed = params.parse_filter("signed")?;
        source.filter.module_id = params.filter("module_id").map(str::to_string);
        source.filter.call_id = params.filter("call_id").map(str::to_string);

        if let Some(address) = params.filter("address") {
            let account_id = self.codec.account_id(address).ok_or_else(|| {
                Error::invalid_parameter("filter[address]", "not an address of this network")
            })?;
            source.filter.address = Some(account_id);
        }

        Ok(source)
    }

    fn serialize_item(&self, extrinsic: &Extrinsic) -> Result<ResourceObject> {
        extrinsic_object(extrinsic, &self.codec)
    }
}

/// An extrinsic by `0x` prefixed hash or by `{block}-{index}`
#[derive(Clone)]
pub struct ExtrinsicDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl ExtrinsicDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor,
            codec,
        }
    }
}

#[async_trait]
impl DetailResource for ExtrinsicDetail {
    type Item = Extrinsic;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<Extrinsic>> {
        if let Some(hash) = item_id.strip_prefix("0x") {
            return self.db.get_extrinsic_by_hash(hash).await;
        }

        match split_pair_id(item_id) {
            Some((block_id, extrinsic_idx)) => {
                self.db.get_extrinsic(block_id, extrinsic_idx).await
            }
            None => Ok(None),
        }
    }

    /// Adds the documentation of the called function
    async fn serialize_item(&self, extrinsic: &Extrinsic) -> Result<ResourceObject> {
        let mut object = extrinsic_object(extrinsic, &self.codec)?;

        let documentation = self
            .db
            .get_runtime_call(
                extrinsic.spec_version_id,
                &extrinsic.module_id,
                &extrinsic.call_id,
            )
            .await?
            .and_then(|call| call.documentation);
        object
            .attributes
            .insert("documentation".to_string(), documentation.into());

        Ok(object)
    }
}
