//! Thread-safe in-memory job snapshot store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::connect::domain::{JobId, JobRecord};
use crate::jobsync::ports::{JobSnapshotError, JobSnapshotResult, JobSnapshotStore};

#[derive(Debug, Default)]
struct SnapshotState {
    jobs: BTreeMap<JobId, JobRecord>,
    reject_writes: bool,
    reject_deletes: bool,
}

/// In-memory job snapshot store with rejection toggles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobSnapshots {
    state: Arc<RwLock<SnapshotState>>,
}

impl InMemoryJobSnapshots {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SnapshotState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a snapshot row directly.
    pub fn insert(&self, job: JobRecord) {
        self.write().jobs.insert(job.job_id, job);
    }

    /// Makes subsequent upserts fail.
    pub fn reject_writes(&self) {
        self.write().reject_writes = true;
    }

    /// Makes subsequent deletes fail.
    pub fn reject_deletes(&self) {
        self.write().reject_deletes = true;
    }
}

#[async_trait]
impl JobSnapshotStore for InMemoryJobSnapshots {
    async fn fetch_all(&self) -> JobSnapshotResult<Vec<JobRecord>> {
        Ok(self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .jobs
            .values()
            .cloned()
            .collect())
    }

    async fn upsert(&self, job: &JobRecord) -> JobSnapshotResult<()> {
        let mut state = self.write();
        if state.reject_writes {
            return Err(JobSnapshotError::persistence(std::io::Error::other(
                "upsert rejected",
            )));
        }
        state.jobs.insert(job.job_id, job.clone());
        Ok(())
    }

    async fn delete(&self, job_id: JobId) -> JobSnapshotResult<()> {
        let mut state = self.write();
        if state.reject_deletes {
            return Err(JobSnapshotError::persistence(std::io::Error::other(
                "delete rejected",
            )));
        }
        state.jobs.remove(&job_id);
        Ok(())
    }
}
