//! Diesel row models for job snapshot persistence.

use super::schema::job_snapshots;
use crate::connect::domain::{ClientId, JobId, JobRecord};
use diesel::prelude::*;

/// Row model for snapshot records; doubles as the insert/upsert payload.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = job_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobSnapshotRow {
    /// Agency job identifier.
    pub job_id: i64,
    /// Agency client identifier.
    pub client_id: i64,
    /// Short client code.
    pub client_code: String,
    /// Client display name.
    pub client_name: String,
    /// Short job code.
    pub job_code: String,
    /// Job display name.
    pub job_name: String,
}

impl From<&JobRecord> for JobSnapshotRow {
    fn from(job: &JobRecord) -> Self {
        Self {
            job_id: job.job_id.value(),
            client_id: job.client_id.value(),
            client_code: job.client_code.clone(),
            client_name: job.client_name.clone(),
            job_code: job.job_code.clone(),
            job_name: job.job_name.clone(),
        }
    }
}

impl From<JobSnapshotRow> for JobRecord {
    fn from(row: JobSnapshotRow) -> Self {
        Self {
            job_id: JobId::new(row.job_id),
            client_id: ClientId::new(row.client_id),
            client_code: row.client_code,
            client_name: row.client_name,
            job_code: row.job_code,
            job_name: row.job_name,
        }
    }
}
