//! `PostgreSQL` adapter for the job snapshot port.

mod models;
mod schema;
mod snapshot;

pub use snapshot::{JobSyncPgPool, PostgresJobSnapshots};
