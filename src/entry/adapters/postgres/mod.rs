//! `PostgreSQL` adapters for the entry persistence ports.

mod models;
mod schema;
mod store;

pub use store::{EntryPgPool, PostgresBackupStore, PostgresMappingStore};
