//! SmartPool implementation for automatic test transaction management.
//!
//! ## Features
//! - Automatic test transactions in test mode (single connection)
//! - TLS-aware pooling in production mode
//!
//! ## TLS
//! Production connections negotiate TLS through rustls. The verification mode
//! is picked from the environment:
//! - `EXPLORER_DB_TLS_INSECURE` set: any certificate is accepted
//! - `EXPLORER_DB_TLS_CA_FILE=<path>`: only certificates signed by the given CAs
//! - otherwise the platform trust store is used

#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(not(test))]
use {
    crate::constants::database::POOL_MAX_SIZE,
    diesel::{ConnectionError, ConnectionResult},
    diesel_async::pooled_connection::ManagerConfig,
    diesel_async::RunQueryDsl,
    futures::{future::BoxFuture, FutureExt},
    rustls::{
        client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
        pki_types::{CertificateDer, ServerName, UnixTime},
        version, ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
    },
    rustls_pemfile::certs as load_pem_certs,
    rustls_platform_verifier::ConfigVerifierExt,
    std::{fs::File, io::BufReader, time::Duration},
    tracing::warn,
};

#[cfg(test)]
use diesel_async::AsyncConnection;
use diesel_async::{
    pooled_connection::{bb8::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection,
};
use explorer_indexer_db::DbConnection;

use super::error::RepositoryError;

pub type DbPool = Pool<AsyncPgConnection>;

/// Smart connection pool that automatically manages test transactions.
///
/// In test mode a single connection is used and a test transaction is opened
/// on first use, so nothing a test does outlives it.
pub struct SmartPool {
    inner: Arc<DbPool>,

    /// Track whether test transaction has been initialized (test mode only)
    #[cfg(test)]
    test_tx_initialized: AtomicBool,
}

impl SmartPool {
    /// Create a new SmartPool connected to `database_url`
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        #[cfg(test)]
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        #[cfg(not(test))]
        let manager = {
            let mut manager_cfg = ManagerConfig::default();
            manager_cfg.custom_setup = Box::new(|config: &str| establish_connection(config));
            AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
                database_url,
                manager_cfg,
            )
        };

        #[cfg(test)]
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .await
            .map_err(|e| RepositoryError::Pool(format!("Failed to create test pool: {}", e)))?;

        #[cfg(not(test))]
        let pool = {
            let pool = Pool::builder()
                .max_size(POOL_MAX_SIZE)
                .connection_timeout(Duration::from_secs(15))
                .idle_timeout(Some(Duration::from_secs(300)))
                .max_lifetime(Some(Duration::from_secs(3600)))
                .min_idle(Some(4))
                .build(manager)
                .await
                .map_err(|e| {
                    RepositoryError::Pool(format!("Failed to create production pool: {}", e))
                })?;

            // surface connection and TLS errors at startup
            {
                let mut conn = pool.get().await.map_err(|e| {
                    RepositoryError::Pool(format!("Failed to get connection: {}", e))
                })?;
                diesel::sql_query("SELECT 1")
                    .execute(&mut conn)
                    .await
                    .map_err(|e| RepositoryError::Pool(format!("Healthcheck failed: {}", e)))?;
            }

            pool
        };

        Ok(Self {
            inner: Arc::new(pool),
            #[cfg(test)]
            test_tx_initialized: AtomicBool::new(false),
        })
    }

    /// Get a connection from the pool.
    ///
    /// In test mode, this will automatically begin a test transaction
    /// on the first call, which will be rolled back when the test ends.
    pub async fn get(&self) -> Result<DbConnection<'_>, RepositoryError> {
        #[allow(unused_mut)]
        let mut conn = self
            .inner
            .get()
            .await
            .map_err(|e| RepositoryError::Pool(format!("Failed to get connection: {}", e)))?;

        #[cfg(test)]
        {
            if self
                .test_tx_initialized
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                conn.begin_test_transaction()
                    .await
                    .map_err(RepositoryError::Database)?;
            }
        }

        Ok(conn)
    }
}

// --- TLS setup and custom connection establishment ---

#[derive(Debug)]
#[cfg(not(test))]
struct NoCertificateVerification;

#[cfg(not(test))]
impl ServerCertVerifier for NoCertificateVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::ED25519,
        ]
    }
}

#[cfg(not(test))]
fn ring_builder(
) -> Result<rustls::ConfigBuilder<ClientConfig, rustls::WantsVerifier>, rustls::Error> {
    let provider = rustls::crypto::ring::default_provider();
    ClientConfig::builder_with_provider(provider.into())
        .with_protocol_versions(&[&version::TLS13, &version::TLS12])
}

#[cfg(not(test))]
fn load_roots(path: &std::ffi::OsStr) -> std::io::Result<RootCertStore> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut roots = RootCertStore::empty();

    for cert in load_pem_certs(&mut reader) {
        if let Err(err) = roots.add(cert?) {
            warn!(error = %err, "Failed to add certificate to root store");
        }
    }

    Ok(roots)
}

#[cfg(not(test))]
fn rustls_config_from_env() -> Result<ClientConfig, rustls::Error> {
    if std::env::var_os("EXPLORER_DB_TLS_INSECURE").is_some() {
        warn!("Database TLS certificate verification is disabled");
        return Ok(ring_builder()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoCertificateVerification))
            .with_no_client_auth());
    }

    if let Some(path) = std::env::var_os("EXPLORER_DB_TLS_CA_FILE") {
        match load_roots(&path) {
            Ok(roots) => {
                return Ok(ring_builder()?
                    .with_root_certificates(roots)
                    .with_no_client_auth())
            }
            Err(err) => {
                warn!(path = ?path, error = %err, "Failed to load CA file, falling back to platform verifier");
            }
        }
    }

    Ok(ClientConfig::with_platform_verifier())
}

#[cfg(not(test))]
fn establish_connection(config: &str) -> BoxFuture<'_, ConnectionResult<AsyncPgConnection>> {
    let fut = async {
        let rustls_config =
            rustls_config_from_env().map_err(|e| ConnectionError::BadConnection(e.to_string()))?;
        let tls = tokio_postgres_rustls::MakeRustlsConnect::new(rustls_config);
        let (client, conn) = tokio_postgres::connect(config, tls)
            .await
            .map_err(|e| ConnectionError::BadConnection(e.to_string()))?;

        AsyncPgConnection::try_from_client_and_connection(client, conn).await
    };
    fut.boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::indexer_db::test_helpers::setup_test_db;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn connections_run_inside_a_test_transaction() {
        let (_container, url) = setup_test_db(vec![]).await;

        let pool = SmartPool::new(&url).await.expect("able to create pool");

        pool.get().await.expect("able to get connection");

        assert!(
            pool.test_tx_initialized.load(Ordering::SeqCst),
            "connection initialized with test_transaction"
        );
    }
}
