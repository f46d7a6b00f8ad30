//! Drains the durable retry queue against the bridge's stores.
//!
//! Usage:
//!
//! ```text
//! retry_worker
//! ```
//!
//! Configuration comes entirely from the environment (see
//! [`chronobridge::config::BridgeConfig`]). The worker polls the
//! `PostgreSQL`-backed queue in bounded batches, replays each message
//! through [`chronobridge::retry::services::RetryWorker`], and
//! acknowledges only the messages that applied; failed messages stay
//! queued for the next cycle.

use std::sync::Arc;
use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chronobridge::config::BridgeConfig;
use chronobridge::connect::adapters::http::HttpTrackerClient;
use chronobridge::entry::adapters::postgres::{PostgresBackupStore, PostgresMappingStore};
use chronobridge::jobsync::adapters::postgres::PostgresJobSnapshots;
use chronobridge::retry::adapters::postgres::PostgresRetryQueue;
use chronobridge::retry::services::RetryWorker;

/// Messages fetched per polling cycle.
const BATCH_SIZE: u32 = 25;

/// Idle delay between polls of an empty queue.
const IDLE_DELAY: Duration = Duration::from_secs(5);

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BridgeConfig::from_env()?;
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = Pool::builder().build(manager)?;

    let queue = PostgresRetryQueue::new(pool.clone());
    let worker = RetryWorker::new(
        Arc::new(PostgresMappingStore::new(pool.clone())),
        Arc::new(PostgresBackupStore::new(pool.clone())),
        Arc::new(PostgresJobSnapshots::new(pool)),
        Arc::new(HttpTrackerClient::new(&config.tracker)?),
    );

    info!("retry worker started");
    loop {
        let pending = match queue.fetch_batch(BATCH_SIZE).await {
            Ok(pending) => pending,
            Err(err) => {
                error!(error = %err, "failed to fetch retry batch");
                tokio::time::sleep(IDLE_DELAY).await;
                continue;
            }
        };

        if pending.is_empty() {
            tokio::time::sleep(IDLE_DELAY).await;
            continue;
        }

        let operations: Vec<_> = pending
            .iter()
            .map(|message| message.operation.clone())
            .collect();
        let report = worker.process_batch(&operations).await;

        let replayed: Vec<i64> = pending
            .iter()
            .enumerate()
            .filter(|(index, _)| report.succeeded(*index))
            .map(|(_, message)| message.id)
            .collect();
        if let Err(err) = queue.acknowledge(replayed).await {
            error!(error = %err, "failed to acknowledge replayed messages");
        }
    }
}
