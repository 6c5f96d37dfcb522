use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use explorer_indexer_db::MIGRATIONS;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

pub mod snapshot {
    use crate::constants::sample::{accounts::*, chain::*};

    /// SQL recreating the blocks, extrinsics, accounts and runtime of the
    /// sample chain served by the mock repository
    pub fn sample_chain_sql() -> Vec<String> {
        vec![
            format!(
                "INSERT INTO data_block (id, parent_id, hash, parent_hash, state_root, \
                 extrinsics_root, count_extrinsics, datetime, spec_version_id) \
                 SELECT n, n - 1, \
                 '0x' || lpad(to_hex(n), 64, '0'), \
                 '0x' || lpad(to_hex(n - 1), 64, '0'), \
                 '0x' || lpad(to_hex(20480 + n), 64, '0'), \
                 '0x' || lpad(to_hex(40960 + n), 64, '0'), \
                 {EXTRINSICS_PER_BLOCK}, \
                 to_timestamp({GENESIS_TIMESTAMP} + 6 * (n - 1)) AT TIME ZONE 'UTC', \
                 {SPEC_VERSION} \
                 FROM generate_series(1, {BLOCK_COUNT}) AS n"
            ),
            format!(
                "INSERT INTO data_extrinsic (block_id, extrinsic_idx, signed, unsigned, \
                 module_id, call_id, spec_version_id) \
                 SELECT n, 0, 0, 1, 'timestamp', 'set', {SPEC_VERSION} \
                 FROM generate_series(1, {BLOCK_COUNT}) AS n"
            ),
            format!(
                "INSERT INTO data_extrinsic (block_id, extrinsic_idx, extrinsic_hash, signed, \
                 unsigned, address, nonce, module_id, call_id, spec_version_id) \
                 SELECT n, 1, lpad(to_hex(57344 + n), 64, '0'), 1, 0, '{ALICE_ACCOUNT_ID}', \
                 n - 1, 'balances', 'transfer', {SPEC_VERSION} \
                 FROM generate_series(1, {BLOCK_COUNT}) AS n"
            ),
            format!(
                "INSERT INTO data_account (id, address, balance, created_at_block, \
                 updated_at_block) VALUES \
                 ('{ALICE_ACCOUNT_ID}', '{ALICE_SS58}', 1000, 1, {BLOCK_COUNT}), \
                 ('{BOB_ACCOUNT_ID}', '{BOB_SS58}', 1000, 1, {BLOCK_COUNT})"
            ),
            format!(
                "INSERT INTO runtime (id, spec_version, spec_name) \
                 VALUES ({SPEC_VERSION}, {SPEC_VERSION}, 'node')"
            ),
        ]
    }
}

/// Setup an indexer-db instance (thru a container) and run the provided raw SQL
/// queries after the migrations
pub async fn setup_test_db(post_migrations: Vec<String>) -> (ContainerAsync<Postgres>, String) {
    let container = Postgres::default()
        .with_db_name("explorer")
        .with_user("postgres")
        .with_password("postgres")
        .with_tag("15")
        .start()
        .await
        .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/explorer", host, port);

    let mut conn =
        diesel::PgConnection::establish(&database_url).expect("Failed to connect for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    for (i, query) in post_migrations.into_iter().enumerate() {
        diesel::RunQueryDsl::execute(diesel::sql_query(query), &mut conn)
            .unwrap_or_else(|e| panic!("Failed to execute init SQL #{i}: {e:?}"));
    }

    (container, database_url)
}
