use diesel_async::{pooled_connection::bb8::PooledConnection, AsyncPgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub mod models;
pub mod schema;
pub mod types;

pub type DbConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Migrations creating the explorer tables, as written by the indexer.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
