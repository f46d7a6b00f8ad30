//! Shared fixtures for reconciliation tests.

use std::sync::Arc;

use crate::connect::adapters::memory::{InMemoryAgency, InMemoryTracker, RecordingNotifier};
use crate::connect::domain::{ClientId, JobId, JobRecord};
use crate::jobsync::adapters::memory::InMemoryJobSnapshots;
use crate::jobsync::services::{CatalogSyncService, CatalogSyncWorkflow, ChangeSyncService};
use crate::retry::adapters::memory::InMemoryRetryQueue;

/// Bundle of in-memory collaborators shared by the reconciliation tests.
pub(super) struct JobSyncHarness {
    pub tracker: Arc<InMemoryTracker>,
    pub agency: Arc<InMemoryAgency>,
    pub snapshots: Arc<InMemoryJobSnapshots>,
    pub queue: Arc<InMemoryRetryQueue>,
    pub notifier: Arc<RecordingNotifier>,
}

/// A live agency job under client `ACME`.
pub(super) fn job(id: i64) -> JobRecord {
    JobRecord {
        job_id: JobId::new(id),
        client_id: ClientId::new(5),
        client_code: "ACME".to_owned(),
        client_name: "Acme Co".to_owned(),
        job_code: format!("J-{id}"),
        job_name: format!("Job {id}"),
    }
}

impl JobSyncHarness {
    pub fn new() -> Self {
        Self {
            tracker: Arc::new(InMemoryTracker::new()),
            agency: Arc::new(InMemoryAgency::new()),
            snapshots: Arc::new(InMemoryJobSnapshots::new()),
            queue: Arc::new(InMemoryRetryQueue::new()),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    pub fn catalog_service(&self) -> CatalogSyncService<InMemoryTracker, InMemoryAgency> {
        CatalogSyncService::new(Arc::clone(&self.tracker), Arc::clone(&self.agency))
    }

    pub fn catalog_workflow(
        &self,
    ) -> CatalogSyncWorkflow<InMemoryTracker, InMemoryAgency, InMemoryRetryQueue, RecordingNotifier>
    {
        CatalogSyncWorkflow::new(
            Arc::clone(&self.tracker),
            Arc::clone(&self.agency),
            Arc::clone(&self.queue),
            Arc::clone(&self.notifier),
        )
    }

    pub fn change_service(
        &self,
    ) -> ChangeSyncService<
        InMemoryTracker,
        InMemoryAgency,
        InMemoryJobSnapshots,
        InMemoryRetryQueue,
        RecordingNotifier,
    > {
        ChangeSyncService::new(
            Arc::clone(&self.tracker),
            Arc::clone(&self.agency),
            Arc::clone(&self.snapshots),
            Arc::clone(&self.queue),
            Arc::clone(&self.notifier),
        )
    }
}
