//! Orchestration services for catalog reconciliation.

mod catalog;
mod changes;

pub use catalog::{CatalogSyncService, CatalogSyncWorkflow};
pub use changes::ChangeSyncService;

use crate::connect::domain::ConnectError;
use crate::jobsync::ports::JobSnapshotError;
use thiserror::Error;

/// Hard failures that abort a reconciliation pass.
#[derive(Debug, Error)]
pub enum JobSyncError {
    /// A remote call failed unexpectedly.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// A snapshot store operation failed.
    #[error(transparent)]
    Snapshot(#[from] JobSnapshotError),

    /// The agency reported no live jobs; reconciling against an empty list
    /// would delete every snapshot row, so the pass aborts instead.
    #[error("no jobs found on the agency platform")]
    NoAgencyJobs,

    /// The tracker reported no clients.
    #[error("no clients found on the tracker")]
    NoTrackerClients,
}

/// Result type for reconciliation orchestration.
pub type JobSyncResult<T> = Result<T, JobSyncError>;
