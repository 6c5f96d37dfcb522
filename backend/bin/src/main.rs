//! Polkascan Explorer API Binary
//!
//! Main entry point for the explorer API service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
#[cfg(feature = "mocks")]
use explorer_api_lib::data::indexer_db::mock_repository::MockRepository;
use explorer_api_lib::{
    api::create_app,
    config::{CacheBackend, Config},
    data::{
        cache::{boxed, BoxedCacheStore, InMemoryCacheStore, RedisCacheStore},
        indexer_db::{client::DBClient, repository::postgres::Repository},
    },
    log::initialize_logging,
    services::Services,
};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CacheBackendArg {
    Memory,
    Redis,
}

impl From<CacheBackendArg> for CacheBackend {
    fn from(arg: CacheBackendArg) -> Self {
        match arg {
            CacheBackendArg::Memory => CacheBackend::Memory,
            CacheBackendArg::Redis => CacheBackend::Redis,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "explorer-api")]
#[command(about = "Polkascan Explorer API Service", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Override response cache backend
    #[arg(long, value_enum)]
    cache_backend: Option<CacheBackendArg>,

    /// Override Redis URL
    #[arg(long)]
    redis_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    initialize_logging(config.log_format);

    info!("Starting Explorer API");
    info!("Server will run on {}:{}", config.host, config.port);

    let cache = create_cache(&config).await?;
    let db = create_db_client(&config).await?;
    let services = Services::new(cache, db, &config);

    // Start server
    let app = create_app(services);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context("Failed to bind TCP listener")?;

    info!("Server listening on http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn load_config() -> Result<Config> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?,
        // logging is not initialized yet, its format comes from the config
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }
    if let Some(backend) = args.cache_backend {
        config.cache.backend = backend.into();
    }
    if let Some(redis_url) = args.redis_url {
        config.cache.redis_url = redis_url;
    }

    Ok(config)
}

async fn create_cache(config: &Config) -> Result<Arc<dyn BoxedCacheStore>> {
    match config.cache.backend {
        CacheBackend::Memory => {
            info!("Using in-memory response cache");
            Ok(boxed(InMemoryCacheStore::new()))
        }
        CacheBackend::Redis => {
            let store = RedisCacheStore::connect(&config.cache.redis_url)
                .await
                .context("Failed to connect to Redis")?;

            info!("Connected to Redis response cache");
            Ok(boxed(store))
        }
    }
}

async fn create_db_client(config: &Config) -> Result<DBClient> {
    #[cfg(feature = "mocks")]
    {
        if config.database.mock_mode {
            info!("Using mock repository (mock_mode enabled)");

            let client = DBClient::new(Arc::new(MockRepository::sample_chain()));

            // Test the connection (mock always succeeds)
            client
                .test_connection()
                .await
                .context("Failed to query mock repository")?;

            return Ok(client);
        }
    }

    let repository = Repository::new(&config.database.url)
        .await
        .context("Failed to create PostgreSQL repository")?;

    let client = DBClient::new(Arc::new(repository));
    client
        .test_connection()
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("Connected to PostgreSQL");
    Ok(client)
}
