//! `PostgreSQL` adapter for the retry queue.

mod queue;
mod schema;

pub use queue::{PendingRetry, PostgresRetryQueue, RetryPgPool};
