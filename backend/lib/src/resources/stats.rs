use async_trait::async_trait;
use serde::Serialize;

use super::{ApiObject, DetailResource, ResourceDescriptor};
use crate::{
    constants::ttl::NETWORK_STATS_SECS, data::indexer_db::client::DBClient, error::Result,
    models::ResourceId,
};

/// Chain-wide counters as of the best indexed block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    #[serde(skip)]
    pub network_id: String,
    pub best_block: i32,
    pub total_signed_extrinsics: i64,
    pub total_events: i64,
    pub total_events_module: i64,
    pub total_blocks: &'static str,
    pub total_accounts: i64,
    pub total_runtimes: i64,
}

impl NetworkStats {
    fn empty(network_id: String) -> Self {
        Self {
            network_id,
            best_block: 0,
            total_signed_extrinsics: 0,
            total_events: 0,
            total_events_module: 0,
            total_blocks: "N/A",
            total_accounts: 0,
            total_runtimes: 0,
        }
    }
}

impl ApiObject for NetworkStats {
    const KIND: &'static str = "networkstats";

    fn object_id(&self) -> ResourceId {
        self.network_id.clone().into()
    }
}

/// Statistics of the network named in the path, which is echoed as the id
#[derive(Clone)]
pub struct NetworkStatsDetail {
    db: DBClient,
    descriptor: ResourceDescriptor,
}

impl NetworkStatsDetail {
    pub fn new(db: DBClient, descriptor: ResourceDescriptor) -> Self {
        Self {
            db,
            descriptor: descriptor.with_detail_ttl_secs(NETWORK_STATS_SECS),
        }
    }
}

#[async_trait]
impl DetailResource for NetworkStatsDetail {
    type Item = NetworkStats;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn get_item(&self, network_id: &str) -> Result<Option<NetworkStats>> {
        let Some(best) = self.db.get_best_block_total().await? else {
            return Ok(Some(NetworkStats::empty(network_id.to_string())));
        };

        Ok(Some(NetworkStats {
            network_id: network_id.to_string(),
            best_block: best.id,
            total_signed_extrinsics: best.total_extrinsics_signed,
            total_events: best.total_events,
            total_events_module: best.total_events_module,
            total_blocks: "N/A",
            total_accounts: best.total_accounts,
            total_runtimes: self.db.count_runtimes().await?,
        }))
    }
}
