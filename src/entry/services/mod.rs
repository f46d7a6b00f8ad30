//! Orchestration services for the entry workflows.
//!
//! Each service is a stateless, run-to-completion unit generic over the
//! ports it touches. `process` methods return typed outcomes for tests;
//! `handle` methods wrap them into the uniform workflow response, with no
//! error crossing the boundary uncaught.

mod backup;
mod cleanup;
mod create;
mod delete;
mod update;

pub use backup::BackupService;
pub use cleanup::{CleanupReport, CleanupService};
pub use create::CreateEntryService;
pub use delete::DeleteEntryService;
pub use update::UpdateEntryService;

use crate::connect::domain::{ConnectError, SourceEntryId};
use crate::connect::ports::{FailureNotifier, Notice};
use crate::entry::ports::MappingStoreError;
use crate::response::WorkflowResponse;
use crate::retry::ports::RetryQueueError;
use thiserror::Error;
use tracing::error;

/// Hard failures that escalate an entry workflow to a system error.
#[derive(Debug, Error)]
pub enum EntryWorkflowError {
    /// A remote call failed unexpectedly.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// A mapping or backup store operation failed.
    #[error(transparent)]
    Store(#[from] MappingStoreError),

    /// The tracker entry required by the workflow could not be fetched.
    #[error("entry {0} could not be fetched from the tracker")]
    EntryUnavailable(SourceEntryId),

    /// The bookkeeping write failed and so did its retry enqueue.
    ///
    /// This is the only path on which a mutation could be lost, so it is
    /// always surfaced as fatal.
    #[error("bookkeeping for entry {source_id} failed and could not be queued: {detail}")]
    BookkeepingLost {
        /// Tracker entry whose bookkeeping was lost.
        source_id: SourceEntryId,
        /// Store and queue failure details.
        detail: String,
    },
}

/// Result type for entry workflow orchestration.
pub type EntryWorkflowResult<T> = Result<T, EntryWorkflowError>;

/// Logs a hard failure, notifies the operator, and renders a 500 response.
///
/// Notification is best-effort and never alters the returned response.
pub(crate) async fn report_failure<N>(
    notifier: &N,
    title: &str,
    err: &EntryWorkflowError,
) -> WorkflowResponse
where
    N: FailureNotifier + ?Sized,
{
    error!(error = %err, title, "entry workflow failed");
    notifier.notify(Notice::new(title, err.to_string())).await;
    WorkflowResponse::failure(title, err.to_string())
}

/// Folds a failed store write and failed enqueue into the fatal error.
pub(crate) fn bookkeeping_lost(
    source_id: SourceEntryId,
    store_err: &MappingStoreError,
    queue_err: &RetryQueueError,
) -> EntryWorkflowError {
    EntryWorkflowError::BookkeepingLost {
        source_id,
        detail: format!("{store_err}; {queue_err}"),
    }
}
