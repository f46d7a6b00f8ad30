//! Stateless replay of deferred mutations.

use std::sync::Arc;

use tracing::{info, warn};

use crate::connect::ports::TrackerPort;
use crate::entry::ports::{BackupStore, MappingStore};
use crate::jobsync::ports::JobSnapshotStore;
use crate::retry::domain::RetryOperation;

/// One message that failed to replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the message within the delivered batch.
    pub index: usize,
    /// Wire name of the failed operation.
    pub operation: &'static str,
    /// Failure detail.
    pub detail: String,
}

/// Aggregate result of replaying one delivered batch.
///
/// Every message is attempted regardless of earlier failures; a failure on
/// one message never drops the rest of the batch. Failed messages are left
/// to the queue's own redelivery mechanics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Messages replayed successfully.
    pub applied: usize,
    /// Messages that failed, in batch order.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Returns `true` when a message at the given batch index succeeded.
    #[must_use]
    pub fn succeeded(&self, index: usize) -> bool {
        !self.failures.iter().any(|failure| failure.index == index)
    }

    /// Collapses the report into a single batch-level result.
    ///
    /// # Errors
    ///
    /// Returns a summary error when any message failed.
    pub fn into_result(self) -> Result<usize, String> {
        if self.failures.is_empty() {
            Ok(self.applied)
        } else {
            Err(format!(
                "{} of {} retry messages failed (first: {})",
                self.failures.len(),
                self.applied + self.failures.len(),
                self.failures
                    .first()
                    .map(|failure| failure.detail.clone())
                    .unwrap_or_default(),
            ))
        }
    }
}

/// Consumer that replays queued mutations against the stores.
///
/// Each operation maps to exactly one idempotent store mutation; payloads
/// captured at enqueue time are authoritative, and nothing is re-derived
/// from the source systems.
#[derive(Clone)]
pub struct RetryWorker<S, B, J, T>
where
    S: MappingStore,
    B: BackupStore,
    J: JobSnapshotStore,
    T: TrackerPort,
{
    mappings: Arc<S>,
    backups: Arc<B>,
    snapshots: Arc<J>,
    tracker: Arc<T>,
}

impl<S, B, J, T> RetryWorker<S, B, J, T>
where
    S: MappingStore,
    B: BackupStore,
    J: JobSnapshotStore,
    T: TrackerPort,
{
    /// Creates the worker over the replay targets.
    #[must_use]
    pub const fn new(
        mappings: Arc<S>,
        backups: Arc<B>,
        snapshots: Arc<J>,
        tracker: Arc<T>,
    ) -> Self {
        Self {
            mappings,
            backups,
            snapshots,
            tracker,
        }
    }

    /// Replays a delivered batch, attempting every message.
    pub async fn process_batch(&self, batch: &[RetryOperation]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, operation) in batch.iter().enumerate() {
            match self.apply(operation).await {
                Ok(()) => report.applied += 1,
                Err(detail) => {
                    warn!(index, kind = operation.kind(), %detail, "retry replay failed");
                    report.failures.push(BatchFailure {
                        index,
                        operation: operation.kind(),
                        detail,
                    });
                }
            }
        }
        info!(
            applied = report.applied,
            failed = report.failures.len(),
            "retry batch processed"
        );
        report
    }

    async fn apply(&self, operation: &RetryOperation) -> Result<(), String> {
        match operation {
            RetryOperation::WriteMapping(mapping) | RetryOperation::UpdateMapping(mapping) => {
                self.mappings
                    .put(mapping)
                    .await
                    .map_err(|err| err.to_string())
            }
            RetryOperation::DeleteEntry { source_id } => self
                .mappings
                .delete(*source_id)
                .await
                .map_err(|err| err.to_string()),
            RetryOperation::CreateClient(client) => self
                .tracker
                .create_client(client)
                .await
                .map(|_| ())
                .map_err(|err| err.to_string()),
            RetryOperation::CreateProject(project) => self
                .tracker
                .create_project(project)
                .await
                .map_err(|err| err.to_string()),
            RetryOperation::UpdateJob(job) => self
                .snapshots
                .upsert(job)
                .await
                .map_err(|err| err.to_string()),
            RetryOperation::DeleteJob { job_id } => self
                .snapshots
                .delete(*job_id)
                .await
                .map_err(|err| err.to_string()),
            RetryOperation::StoreBackup(backup) | RetryOperation::UpdateBackup(backup) => self
                .backups
                .put(backup)
                .await
                .map_err(|err| err.to_string()),
            RetryOperation::DeleteBackup { source_id } => self
                .backups
                .delete(*source_id)
                .await
                .map(|_| ())
                .map_err(|err| err.to_string()),
        }
    }
}
