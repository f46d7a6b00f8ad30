//! `PostgreSQL`-backed durable retry queue.
//!
//! Messages are drained in enqueue order and deleted only after successful
//! replay, so a crashed worker redelivers them; consumers stay idempotent.

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use serde_json::Value;
use tracing::warn;

use super::schema::retry_messages;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::{RetryQueue, RetryQueueError, RetryQueueResult};

/// `PostgreSQL` connection pool type used by the queue adapter.
pub type RetryPgPool = Pool<ConnectionManager<PgConnection>>;

/// A queued operation together with its queue position.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRetry {
    /// Queue position, used to acknowledge the message after replay.
    pub id: i64,
    /// The deferred mutation.
    pub operation: RetryOperation,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = retry_messages)]
struct NewRetryMessage {
    enqueued_at: chrono::DateTime<Utc>,
    payload: Value,
}

/// `PostgreSQL`-backed retry queue.
#[derive(Debug, Clone)]
pub struct PostgresRetryQueue {
    pool: RetryPgPool,
}

impl PostgresRetryQueue {
    /// Creates a queue from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RetryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RetryQueueResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RetryQueueResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| RetryQueueError::connection(err.to_string()))?;
            f(&mut connection)
        })
        .await
        .map_err(RetryQueueError::enqueue)?
    }

    /// Fetches up to `limit` pending messages in enqueue order.
    ///
    /// Rows whose payload no longer decodes are logged and left in place
    /// for operator inspection rather than silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RetryQueueError`] when the query fails.
    pub async fn fetch_batch(&self, limit: u32) -> RetryQueueResult<Vec<PendingRetry>> {
        self.run_blocking(move |connection| {
            let rows = retry_messages::table
                .order(retry_messages::id.asc())
                .limit(i64::from(limit))
                .select((retry_messages::id, retry_messages::payload))
                .load::<(i64, Value)>(connection)
                .map_err(RetryQueueError::enqueue)?;

            let mut pending = Vec::with_capacity(rows.len());
            for (id, payload) in rows {
                match serde_json::from_value::<RetryOperation>(payload) {
                    Ok(operation) => pending.push(PendingRetry { id, operation }),
                    Err(err) => {
                        warn!(message = id, error = %err, "undecodable retry message left queued");
                    }
                }
            }
            Ok(pending)
        })
        .await
    }

    /// Deletes replayed messages by queue position.
    ///
    /// # Errors
    ///
    /// Returns [`RetryQueueError`] when the delete fails.
    pub async fn acknowledge(&self, ids: Vec<i64>) -> RetryQueueResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.run_blocking(move |connection| {
            diesel::delete(retry_messages::table.filter(retry_messages::id.eq_any(ids)))
                .execute(connection)
                .map_err(RetryQueueError::enqueue)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl RetryQueue for PostgresRetryQueue {
    async fn enqueue(&self, operation: &RetryOperation) -> RetryQueueResult<()> {
        let payload = serde_json::to_value(operation).map_err(RetryQueueError::enqueue)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(retry_messages::table)
                .values(NewRetryMessage {
                    enqueued_at: Utc::now(),
                    payload,
                })
                .execute(connection)
                .map_err(RetryQueueError::enqueue)?;
            Ok(())
        })
        .await
    }
}
