//! Update/delete reconciliation between the live job list, the snapshot
//! store, and the tracker's project catalog.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use super::{JobSyncError, JobSyncResult};
use crate::connect::domain::{JobId, JobRecord};
use crate::connect::ports::{AgencyPort, FailureNotifier, Notice, TrackerPort};
use crate::jobsync::domain::{ChangeSummary, is_excluded_client};
use crate::jobsync::ports::JobSnapshotStore;
use crate::response::WorkflowResponse;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::RetryQueue;

/// Three-way diff between the agency's live jobs, the durable snapshot,
/// and the tracker's projects.
///
/// - Live-only or field-different jobs are upserted into the snapshot.
/// - Snapshot rows whose job left the live list are deleted.
/// - Tracker projects whose external reference no longer matches a live
///   job are deleted as orphans; projects are never cascade-deleted from
///   client removal.
///
/// Equality is whole-record structural equality: any field drift triggers
/// a full overwrite, not a partial patch.
#[derive(Clone)]
pub struct ChangeSyncService<T, A, J, Q, N>
where
    T: TrackerPort,
    A: AgencyPort,
    J: JobSnapshotStore,
    Q: RetryQueue,
    N: FailureNotifier,
{
    tracker: Arc<T>,
    agency: Arc<A>,
    snapshots: Arc<J>,
    queue: Arc<Q>,
    notifier: Arc<N>,
}

impl<T, A, J, Q, N> ChangeSyncService<T, A, J, Q, N>
where
    T: TrackerPort,
    A: AgencyPort,
    J: JobSnapshotStore,
    Q: RetryQueue,
    N: FailureNotifier,
{
    /// Creates the change reconciliation service.
    #[must_use]
    pub const fn new(
        tracker: Arc<T>,
        agency: Arc<A>,
        snapshots: Arc<J>,
        queue: Arc<Q>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            tracker,
            agency,
            snapshots,
            queue,
            notifier,
        }
    }

    /// Runs one reconciliation pass and renders the uniform response.
    pub async fn handle(&self) -> WorkflowResponse {
        match self.reconcile().await {
            Ok(summary) if summary.is_empty() => {
                WorkflowResponse::ok("Update Complete", "No changes detected")
            }
            Ok(summary) => WorkflowResponse::ok(
                "Update Complete",
                format!(
                    "{} updated, {} deleted, {} orphaned",
                    summary.updated.len(),
                    summary.deleted.len(),
                    summary.orphaned.len(),
                ),
            ),
            Err(err) => {
                let detail = err.to_string();
                self.notifier
                    .notify(Notice::new("Job Update Error", detail.clone()))
                    .await;
                WorkflowResponse::failure("Job Update Error", detail)
            }
        }
    }

    /// Runs one reconciliation pass.
    ///
    /// Snapshot write failures enqueue `update_job`/`delete_job` retries
    /// and leave the affected row uncounted; it is re-diffed on the next
    /// pass either way.
    ///
    /// # Errors
    ///
    /// Returns [`JobSyncError`] when authentication or a listing fails, or
    /// when either platform reports an empty state that would make the
    /// diff destructive.
    pub async fn reconcile(&self) -> JobSyncResult<ChangeSummary> {
        let session = self.agency.authenticate().await?;
        let live: Vec<JobRecord> = self
            .agency
            .fetch_active_jobs(&session)
            .await?
            .into_iter()
            .filter(|job| !is_excluded_client(&job.client_code))
            .collect();
        if live.is_empty() {
            return Err(JobSyncError::NoAgencyJobs);
        }

        let snapshot = self.snapshots.fetch_all().await?;
        let clients = self.tracker.list_clients().await?;
        if clients.is_empty() {
            return Err(JobSyncError::NoTrackerClients);
        }
        let projects = self.tracker.list_projects().await?;

        let snapshot_by_id: HashMap<JobId, &JobRecord> =
            snapshot.iter().map(|row| (row.job_id, row)).collect();
        let live_ids: HashSet<JobId> = live.iter().map(|job| job.job_id).collect();

        let mut summary = ChangeSummary::default();

        for job in &live {
            let unchanged = snapshot_by_id
                .get(&job.job_id)
                .is_some_and(|row| *row == job);
            if unchanged {
                continue;
            }
            match self.snapshots.upsert(job).await {
                Ok(()) => summary.updated.push(job.job_id),
                Err(err) => {
                    warn!(job = %job.job_id, error = %err, "snapshot upsert queued for retry");
                    self.enqueue(RetryOperation::UpdateJob(job.clone())).await;
                }
            }
        }

        for row in &snapshot {
            if live_ids.contains(&row.job_id) {
                continue;
            }
            match self.snapshots.delete(row.job_id).await {
                Ok(()) => summary.deleted.push(row.job_id),
                Err(err) => {
                    warn!(job = %row.job_id, error = %err, "snapshot delete queued for retry");
                    self.enqueue(RetryOperation::DeleteJob { job_id: row.job_id })
                        .await;
                }
            }
        }

        for project in &projects {
            // A project the bridge never linked to a job is not an orphan.
            let Some(raw) = project.external_id.as_deref() else {
                warn!(project = %project.name, "project has no external reference; skipping");
                continue;
            };
            let Ok(job_id) = raw.trim().parse::<i64>() else {
                warn!(project = %project.name, external_id = raw, "unparseable external reference; skipping");
                continue;
            };
            if live_ids.contains(&JobId::new(job_id)) {
                continue;
            }
            match self.tracker.delete_project(project.id).await {
                Ok(()) => summary.orphaned.push(project.id),
                Err(err) => {
                    warn!(project = %project.name, error = %err, "orphaned project deletion failed");
                }
            }
        }

        if summary.is_empty() {
            info!("no changes detected");
        }
        Ok(summary)
    }

    async fn enqueue(&self, operation: RetryOperation) {
        if let Err(err) = self.queue.enqueue(&operation).await {
            warn!(kind = operation.kind(), error = %err, "retry enqueue failed");
        }
    }
}
