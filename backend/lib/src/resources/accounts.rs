use async_trait::async_trait;
use explorer_indexer_db::models::Account;

use super::{
    extrinsics::extrinsic_object, AddressCodec, ApiObject, DetailResource, ListResource,
    QuerySource, ResourceDescriptor,
};
use crate::{
    constants::{api::RECENT_ITEMS, ttl::ACCOUNT_DETAIL_SECS},
    data::indexer_db::{client::DBClient, repository::ExtrinsicFilter},
    error::Result,
    models::{ResourceId, ResourceObject},
};

impl ApiObject for Account {
    const KIND: &'static str = "account";

    fn object_id(&self) -> ResourceId {
        self.address.clone().into()
    }
}

#[derive(Clone)]
pub struct AccountSource {
    db: DBClient,
}

#[async_trait]
impl QuerySource for AccountSource {
    type Item = Account;

    async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Account>> {
        self.db.list_accounts(offset, limit).await
    }
}

/// Accounts, most recently updated first
#[derive(Clone)]
pub struct AccountList {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl AccountList {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self { db, descriptor }
    }
}

#[async_trait]
impl ListResource for AccountList {
    type Item = Account;
    type Source = AccountSource;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn source(&self) -> AccountSource {
        AccountSource {
            db: self.db.clone(),
        }
    }
}

/// An account by `0x` prefixed account id or by SS58 address
///
/// Balances follow the chain head, so details are only kept for a few seconds.
#[derive(Clone)]
pub struct AccountDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
    codec: AddressCodec,
}

impl AccountDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor, codec: AddressCodec) -> Self {
        Self {
            db,
            descriptor: descriptor.with_detail_ttl_secs(ACCOUNT_DETAIL_SECS),
            codec,
        }
    }
}

#[async_trait]
impl DetailResource for AccountDetail {
    type Item = Account;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<Account>> {
        match item_id.strip_prefix("0x") {
            Some(account_id) => self.db.get_account_by_id(account_id).await,
            None => self.db.get_account_by_address(item_id).await,
        }
    }

    fn relationships(&self) -> &'static [&'static str] {
        &["recent_extrinsics"]
    }

    async fn get_relationship(
        &self,
        name: &str,
        account: &Account,
    ) -> Result<Vec<ResourceObject>> {
        if name != "recent_extrinsics" {
            return Ok(Vec::new());
        }

        let filter = ExtrinsicFilter {
            address: Some(account.id.clone()),
            ..Default::default()
        };

        self.db
            .list_extrinsics(&filter, 0, RECENT_ITEMS)
            .await?
            .iter()
            .map(|extrinsic| extrinsic_object(extrinsic, &self.codec))
            .collect()
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::{
        constants::sample::accounts::{ALICE_ACCOUNT_ID, ALICE_SS58, BOB_SS58},
        resources::tests::{descriptor, sample_db},
    };

    fn detail() -> AccountDetail {
        AccountDetail::new(sample_db(), descriptor(), AddressCodec::new(42))
    }

    #[tokio::test]
    async fn accounts_resolve_by_id_or_address() {
        let detail = detail();

        let by_id = detail
            .get_item(&format!("0x{ALICE_ACCOUNT_ID}"))
            .await
            .unwrap()
            .unwrap();
        let by_address = detail.get_item(ALICE_SS58).await.unwrap().unwrap();

        assert_eq!(by_id.object_id(), ResourceId::Text(ALICE_SS58.into()));
        assert_eq!(by_address.id, ALICE_ACCOUNT_ID);
        assert!(detail.get_item(ALICE_ACCOUNT_ID).await.unwrap().is_none());
        assert_eq!(detail.descriptor().detail_ttl, Some(Duration::from_secs(6)));
    }

    #[tokio::test]
    async fn recent_extrinsics_are_the_signed_ones() {
        let detail = detail();
        let alice = detail.get_item(ALICE_SS58).await.unwrap().unwrap();
        let bob = detail.get_item(BOB_SS58).await.unwrap().unwrap();

        let sent = detail.get_relationship("recent_extrinsics", &alice).await.unwrap();
        let received = detail.get_relationship("recent_extrinsics", &bob).await.unwrap();

        assert_eq!(sent.len(), RECENT_ITEMS as usize);
        assert!(sent.iter().all(|e| e.attributes["address"] == json!(ALICE_SS58)));
        assert!(received.is_empty());
    }
}
