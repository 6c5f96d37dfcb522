//! Services module for the explorer API

pub mod engine;
pub mod health;

use std::sync::Arc;

use crate::{
    config::Config,
    data::{cache::BoxedCacheStore, indexer_db::client::DBClient},
    resources::Resources,
};

use self::{engine::ResourceEngine, health::HealthService};

/// Container for all backend services
#[derive(Clone)]
pub struct Services {
    pub engine: Arc<ResourceEngine>,
    pub resources: Arc<Resources>,
    pub health: Arc<HealthService>,
}

impl Services {
    pub fn new(cache: Arc<dyn BoxedCacheStore>, db: DBClient, config: &Config) -> Self {
        let engine = Arc::new(ResourceEngine::new(cache.clone(), config));
        let resources = Arc::new(Resources::new(db.clone(), config));
        let health = Arc::new(HealthService::new(cache, db));

        Self {
            engine,
            resources,
            health,
        }
    }
}

#[cfg(feature = "mocks")]
impl Services {
    /// Services over the sample chain and an in-memory cache, with the default configuration
    pub fn mocks() -> Self {
        Self::mocks_with_config(&Config::default())
    }

    pub fn mocks_with_config(config: &Config) -> Self {
        use crate::data::{
            cache::{boxed, InMemoryCacheStore},
            indexer_db::mock_repository::MockRepository,
        };

        let db = DBClient::new(Arc::new(MockRepository::sample_chain()));
        Self::new(boxed(InMemoryCacheStore::new()), db, config)
    }
}
