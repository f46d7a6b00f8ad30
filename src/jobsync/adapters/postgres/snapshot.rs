//! `PostgreSQL` job snapshot store adapter.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

use super::models::JobSnapshotRow;
use super::schema::job_snapshots;
use crate::connect::domain::{JobId, JobRecord};
use crate::jobsync::ports::{JobSnapshotError, JobSnapshotResult, JobSnapshotStore};

/// `PostgreSQL` connection pool type used by the snapshot adapter.
pub type JobSyncPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed job snapshot store.
#[derive(Debug, Clone)]
pub struct PostgresJobSnapshots {
    pool: JobSyncPgPool,
}

impl PostgresJobSnapshots {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: JobSyncPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JobSnapshotResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JobSnapshotResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| JobSnapshotError::connection(err.to_string()))?;
            f(&mut connection)
        })
        .await
        .map_err(JobSnapshotError::persistence)?
    }
}

#[async_trait]
impl JobSnapshotStore for PostgresJobSnapshots {
    async fn fetch_all(&self) -> JobSnapshotResult<Vec<JobRecord>> {
        self.run_blocking(|connection| {
            let rows = job_snapshots::table
                .order(job_snapshots::job_id.asc())
                .select(JobSnapshotRow::as_select())
                .load::<JobSnapshotRow>(connection)
                .map_err(JobSnapshotError::persistence)?;
            Ok(rows.into_iter().map(JobRecord::from).collect())
        })
        .await
    }

    async fn upsert(&self, job: &JobRecord) -> JobSnapshotResult<()> {
        let row = JobSnapshotRow::from(job);
        self.run_blocking(move |connection| {
            diesel::insert_into(job_snapshots::table)
                .values(&row)
                .on_conflict(job_snapshots::job_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(JobSnapshotError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, job_id: JobId) -> JobSnapshotResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(job_snapshots::table.filter(job_snapshots::job_id.eq(job_id.value())))
                .execute(connection)
                .map_err(JobSnapshotError::persistence)?;
            Ok(())
        })
        .await
    }
}
