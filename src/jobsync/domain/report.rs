//! Per-pass outcome reports for the reconciliation workflows.

use crate::connect::domain::{ClientDirectory, JobId, NewClient, NewProject};

/// A client creation that failed and is eligible for replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedClientCreate {
    /// Agency client code the creation was for.
    pub client_code: String,
    /// Failure detail.
    pub error: String,
    /// The construction payload, replayable as a `create_client` retry.
    pub retry: NewClient,
}

/// A project creation that failed and is eligible for replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedProjectCreate {
    /// Project name the creation was for.
    pub project_name: String,
    /// Failure detail.
    pub error: String,
    /// The construction payload, replayable as a `create_project` retry.
    pub retry: NewProject,
}

/// Outcome of one client synchronization pass.
///
/// The service records outcomes per item and performs no enqueues itself;
/// replay of `failed` items is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSync {
    /// Client codes created on the tracker this pass.
    pub created: Vec<String>,
    /// Client codes that already existed.
    pub existing: Vec<String>,
    /// Creations that failed, with their replay payloads.
    pub failed: Vec<FailedClientCreate>,
    /// The tracker directory including clients created this pass.
    pub directory: ClientDirectory,
}

/// Outcome of one project synchronization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSync {
    /// Project names created on the tracker this pass.
    pub created: Vec<String>,
    /// Project names that already existed.
    pub existing: Vec<String>,
    /// Jobs skipped because their client never resolved; not retried.
    pub skipped_no_client: Vec<String>,
    /// Creations that failed, with their replay payloads.
    pub failed: Vec<FailedProjectCreate>,
}

/// Aggregate result of one update/delete reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Snapshot rows upserted because they were new or field-different.
    pub updated: Vec<JobId>,
    /// Snapshot rows removed because their job left the live list.
    pub deleted: Vec<JobId>,
    /// Tracker project identifiers deleted as orphans.
    pub orphaned: Vec<i64>,
}

impl ChangeSummary {
    /// Returns `true` when the pass converged with no changes.
    ///
    /// An empty summary is a valid, non-error terminal state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.deleted.is_empty() && self.orphaned.is_empty()
    }
}
