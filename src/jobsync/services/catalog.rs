//! Client and project catalog synchronization.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::JobSyncResult;
use crate::connect::domain::{AgencySession, NewClient, normalized};
use crate::connect::ports::{AgencyPort, FailureNotifier, Notice, TrackerPort};
use crate::jobsync::domain::{
    ClientSync, FailedClientCreate, FailedProjectCreate, ProjectSync, is_excluded_client,
    new_project_for, project_key,
};
use crate::response::WorkflowResponse;
use crate::retry::domain::RetryOperation;
use crate::retry::ports::RetryQueue;

/// Side-effect-free catalog synchronization over the two platforms.
///
/// Records per-item outcomes and never enqueues retries itself; failed
/// creations carry their construction payloads for the caller to replay.
#[derive(Clone)]
pub struct CatalogSyncService<T, A>
where
    T: TrackerPort,
    A: AgencyPort,
{
    tracker: Arc<T>,
    agency: Arc<A>,
}

impl<T, A> CatalogSyncService<T, A>
where
    T: TrackerPort,
    A: AgencyPort,
{
    /// Creates the catalog service.
    #[must_use]
    pub const fn new(tracker: Arc<T>, agency: Arc<A>) -> Self {
        Self { tracker, agency }
    }

    /// Creates tracker clients for agency clients absent from the tracker.
    ///
    /// Denylisted client codes are skipped entirely. The returned directory
    /// includes clients created this pass, so a following project sync can
    /// resolve them.
    ///
    /// # Errors
    ///
    /// Returns [`super::JobSyncError::Connect`] when either listing fails;
    /// individual creation failures are recorded, not raised.
    pub async fn sync_clients(&self, session: &AgencySession) -> JobSyncResult<ClientSync> {
        let mut directory = self.tracker.list_clients().await?;
        let agency_clients = self.agency.list_clients(session).await?;

        let mut created = Vec::new();
        let mut existing = Vec::new();
        let mut failed = Vec::new();

        for client in agency_clients
            .iter()
            .filter(|client| !is_excluded_client(&client.code))
        {
            if directory.contains(&client.code) {
                existing.push(client.code.clone());
                continue;
            }

            let payload = NewClient {
                name: client.code.clone(),
                active: true,
                external_id: client.id,
            };
            match self.tracker.create_client(&payload).await {
                Ok(record) => {
                    directory.insert(&client.code, record.id);
                    created.push(client.code.clone());
                }
                Err(err) => {
                    warn!(code = %client.code, error = %err, "client creation failed");
                    failed.push(FailedClientCreate {
                        client_code: client.code.clone(),
                        error: err.to_string(),
                        retry: payload,
                    });
                }
            }
        }

        info!(
            created = created.len(),
            existing = existing.len(),
            failed = failed.len(),
            "client sync finished"
        );
        Ok(ClientSync {
            created,
            existing,
            failed,
            directory,
        })
    }

    /// Creates tracker projects for agency jobs absent from the tracker.
    ///
    /// Jobs whose client is not in the directory are logged and skipped
    /// without retry, since a project without a resolvable client cannot be
    /// meaningfully created.
    ///
    /// # Errors
    ///
    /// Returns [`super::JobSyncError::Connect`] when either listing fails;
    /// individual creation failures are recorded, not raised.
    pub async fn sync_projects(
        &self,
        session: &AgencySession,
        directory: &crate::connect::domain::ClientDirectory,
        created_on: Option<NaiveDate>,
    ) -> JobSyncResult<ProjectSync> {
        let jobs = self.agency.list_jobs(session, created_on).await?;
        let projects = self.tracker.list_projects().await?;
        let known: HashSet<String> = projects
            .iter()
            .map(|project| normalized(&project.name))
            .collect();

        let mut created = Vec::new();
        let mut existing = Vec::new();
        let mut skipped_no_client = Vec::new();
        let mut failed = Vec::new();

        for job in &jobs {
            let key = project_key(&job.job_name, &job.job_code);
            if known.contains(&key) {
                existing.push(job.job_name.clone());
                continue;
            }

            let Some(client_id) = directory.get(&job.client_code) else {
                warn!(job = %job.job_name, client = %job.client_code, "no client found for project");
                skipped_no_client.push(job.job_name.clone());
                continue;
            };

            let payload = new_project_for(job, client_id);
            match self.tracker.create_project(&payload).await {
                Ok(()) => created.push(job.job_name.clone()),
                Err(err) => {
                    warn!(job = %job.job_name, error = %err, "project creation failed");
                    failed.push(FailedProjectCreate {
                        project_name: job.job_name.clone(),
                        error: err.to_string(),
                        retry: payload,
                    });
                }
            }
        }

        info!(
            created = created.len(),
            existing = existing.len(),
            skipped = skipped_no_client.len(),
            failed = failed.len(),
            "project sync finished"
        );
        Ok(ProjectSync {
            created,
            existing,
            skipped_no_client,
            failed,
        })
    }
}

/// Timer entry point wrapping the catalog service.
///
/// Runs client sync then project sync, enqueues `create_client` and
/// `create_project` retries for the failed items, and renders the uniform
/// response.
#[derive(Clone)]
pub struct CatalogSyncWorkflow<T, A, Q, N>
where
    T: TrackerPort,
    A: AgencyPort,
    Q: RetryQueue,
    N: FailureNotifier,
{
    catalog: CatalogSyncService<T, A>,
    agency: Arc<A>,
    queue: Arc<Q>,
    notifier: Arc<N>,
}

impl<T, A, Q, N> CatalogSyncWorkflow<T, A, Q, N>
where
    T: TrackerPort,
    A: AgencyPort,
    Q: RetryQueue,
    N: FailureNotifier,
{
    /// Creates the workflow.
    #[must_use]
    pub fn new(tracker: Arc<T>, agency: Arc<A>, queue: Arc<Q>, notifier: Arc<N>) -> Self {
        Self {
            catalog: CatalogSyncService::new(tracker, Arc::clone(&agency)),
            agency,
            queue,
            notifier,
        }
    }

    /// Runs both passes and renders the uniform workflow response.
    pub async fn handle(&self) -> WorkflowResponse {
        match self.run().await {
            Ok((clients, projects)) => WorkflowResponse::ok(
                "Synchronization Complete",
                format!(
                    "Created {} clients and {} projects ({} client failures, {} project failures queued)",
                    clients.created.len(),
                    projects.created.len(),
                    clients.failed.len(),
                    projects.failed.len(),
                ),
            ),
            Err(err) => {
                let detail = err.to_string();
                self.notifier
                    .notify(Notice::new("Job Synchronization Error", detail.clone()))
                    .await;
                WorkflowResponse::failure("Job Synchronization Error", detail)
            }
        }
    }

    /// Runs client sync then project sync and queues failed creations.
    ///
    /// # Errors
    ///
    /// Returns [`super::JobSyncError`] when authentication or a listing fails.
    pub async fn run(&self) -> JobSyncResult<(ClientSync, ProjectSync)> {
        let session = self.agency.authenticate().await?;
        let clients = self.catalog.sync_clients(&session).await?;
        let projects = self
            .catalog
            .sync_projects(&session, &clients.directory, None)
            .await?;

        for failure in &clients.failed {
            let operation = RetryOperation::CreateClient(failure.retry.clone());
            if let Err(err) = self.queue.enqueue(&operation).await {
                warn!(code = %failure.client_code, error = %err, "client retry enqueue failed");
            }
        }
        for failure in &projects.failed {
            let operation = RetryOperation::CreateProject(failure.retry.clone());
            if let Err(err) = self.queue.enqueue(&operation).await {
                warn!(project = %failure.project_name, error = %err, "project retry enqueue failed");
            }
        }

        Ok((clients, projects))
    }
}
