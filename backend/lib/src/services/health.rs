use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::{
    constants::server::SERVICE_NAME, data::cache::BoxedCacheStore,
    data::indexer_db::client::DBClient,
};

const HEALTHY: &str = "healthy";
const UNHEALTHY: &str = "unhealthy";

#[derive(Debug, Serialize)]
pub struct DetailedHealthStatus {
    pub status: String,
    pub version: String,
    pub service: String,
    pub components: HealthComponents,
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
    pub cache: ComponentHealth,
    pub database: ComponentHealth,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    fn healthy() -> Self {
        Self {
            status: HEALTHY.to_string(),
            message: None,
        }
    }

    fn unhealthy(message: String) -> Self {
        Self {
            status: UNHEALTHY.to_string(),
            message: Some(message),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

pub struct HealthService {
    cache: Arc<dyn BoxedCacheStore>,
    db: DBClient,
}

impl HealthService {
    pub fn new(cache: Arc<dyn BoxedCacheStore>, db: DBClient) -> Self {
        Self { cache, db }
    }

    pub async fn check_health(&self) -> DetailedHealthStatus {
        let cache_health = self.check_cache().await;
        let database_health = self.check_database().await;

        let overall_status = if cache_health.is_healthy() && database_health.is_healthy() {
            HEALTHY
        } else {
            UNHEALTHY
        };

        DetailedHealthStatus {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: SERVICE_NAME.to_string(),
            components: HealthComponents {
                cache: cache_health,
                database: database_health,
            },
        }
    }

    async fn check_cache(&self) -> ComponentHealth {
        match self.cache.health_check().await {
            Ok(true) => ComponentHealth::healthy(),
            Ok(false) => ComponentHealth::unhealthy("Cache did not answer".to_string()),
            Err(e) => {
                warn!(target: "health_service", error = %e, "Cache health check failed");
                ComponentHealth::unhealthy(format!("Cache error: {}", e))
            }
        }
    }

    async fn check_database(&self) -> ComponentHealth {
        match self.db.test_connection().await {
            Ok(_) => ComponentHealth::healthy(),
            Err(e) => {
                warn!(target: "health_service", error = %e, "Database health check failed");
                ComponentHealth::unhealthy(format!("Database error: {}", e))
            }
        }
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use super::*;
    use crate::data::{cache::test_cache, indexer_db::mock_repository::MockRepository};

    #[tokio::test]
    async fn unavailable_database_is_reported() {
        let repo = Arc::new(MockRepository::sample_chain());
        let service = HealthService::new(test_cache(), DBClient::new(repo.clone()));

        let status = service.check_health().await;
        assert_eq!(status.status, "healthy");
        assert!(status.components.database.message.is_none());

        repo.set_unavailable(true);
        let status = service.check_health().await;
        assert_eq!(status.status, "unhealthy");
        assert_eq!(status.components.cache.status, "healthy");
        assert!(status.components.database.message.is_some());
    }
}
