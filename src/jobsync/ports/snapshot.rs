//! Repository port for the job snapshot store.

use crate::connect::domain::{JobId, JobRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job snapshot operations.
pub type JobSnapshotResult<T> = Result<T, JobSnapshotError>;

/// Durable mirror of the agency's active-job state.
///
/// Rows are compared structurally against the live list and fully
/// overwritten on drift; upserts are therefore idempotent.
#[async_trait]
pub trait JobSnapshotStore: Send + Sync {
    /// Returns every snapshot row.
    ///
    /// # Errors
    ///
    /// Returns [`JobSnapshotError`] when the scan fails.
    async fn fetch_all(&self) -> JobSnapshotResult<Vec<JobRecord>>;

    /// Writes a snapshot row, overwriting any previous row for the job.
    ///
    /// # Errors
    ///
    /// Returns [`JobSnapshotError`] when the write fails.
    async fn upsert(&self, job: &JobRecord) -> JobSnapshotResult<()>;

    /// Deletes the snapshot row for a job.
    ///
    /// Deleting an absent row is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`JobSnapshotError`] when the delete fails.
    async fn delete(&self, job_id: JobId) -> JobSnapshotResult<()>;
}

/// Errors returned by job snapshot store implementations.
#[derive(Debug, Clone, Error)]
pub enum JobSnapshotError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// A connection could not be obtained.
    #[error("connection error: {0}")]
    Connection(String),
}

impl JobSnapshotError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}
