//! The closed union of replayable mutations.

use crate::connect::domain::{JobId, JobRecord, NewClient, NewProject, SourceEntryId};
use crate::entry::domain::{EntryBackup, EntryMapping};
use serde::{Deserialize, Serialize};

/// A deferred mutation captured at enqueue time.
///
/// The payload is authoritative and final: replay never re-derives data
/// from the source systems. On the wire each message is
/// `{"operation": <kind>, "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "data", rename_all = "snake_case")]
pub enum RetryOperation {
    /// Write the mapping row recorded after a successful creation.
    WriteMapping(EntryMapping),
    /// Rewrite the mapping row recorded after a successful update.
    UpdateMapping(EntryMapping),
    /// Remove a mapping row.
    DeleteEntry {
        /// Tracker entry whose row is removed.
        source_id: SourceEntryId,
    },
    /// Create a tracker client that failed during catalog sync.
    CreateClient(NewClient),
    /// Create a tracker project that failed during catalog sync.
    CreateProject(NewProject),
    /// Upsert a job snapshot row.
    UpdateJob(JobRecord),
    /// Remove a job snapshot row.
    DeleteJob {
        /// Agency job whose snapshot row is removed.
        job_id: JobId,
    },
    /// Write an entry backup row.
    StoreBackup(EntryBackup),
    /// Overwrite an entry backup row with fresh data.
    UpdateBackup(EntryBackup),
    /// Remove an entry backup row.
    DeleteBackup {
        /// Tracker entry whose backup row is removed.
        source_id: SourceEntryId,
    },
}

impl RetryOperation {
    /// Canonical wire name of the operation, for logs and diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::WriteMapping(_) => "write_mapping",
            Self::UpdateMapping(_) => "update_mapping",
            Self::DeleteEntry { .. } => "delete_entry",
            Self::CreateClient(_) => "create_client",
            Self::CreateProject(_) => "create_project",
            Self::UpdateJob(_) => "update_job",
            Self::DeleteJob { .. } => "delete_job",
            Self::StoreBackup(_) => "store_backup",
            Self::UpdateBackup(_) => "update_backup",
            Self::DeleteBackup { .. } => "delete_backup",
        }
    }
}
