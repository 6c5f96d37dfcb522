//! Data access layer: the indexer database and the response cache

pub mod cache;
pub mod indexer_db;
