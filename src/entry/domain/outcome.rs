//! Typed terminal outcomes for the entry workflows.
//!
//! Soft failures are expected steady-state conditions (out-of-scope
//! categories, stale webhooks, rejected writes at the remote boundary) and
//! are reported as `200` with a descriptive title. Hard failures live in
//! the service error types and escalate the status instead.

use super::mapping::EntryMapping;
use crate::connect::domain::{LabelId, SourceEntryId, TargetEntryId};
use crate::response::WorkflowResponse;

/// A business-level condition that terminates a workflow without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftFailure {
    /// The event referred to an AI-generated suggestion.
    SuggestionSkipped,
    /// The tracker no longer knows the entry.
    EntryNotFound(SourceEntryId),
    /// No usable label remained after dropping parent labels.
    NoUsableLabel,
    /// No task mapping exists for the resolved label.
    TaskMappingMissing(LabelId),
    /// The entry lacks a field required to build the submission.
    MissingReference(&'static str),
    /// The job-scoped task list could not be fetched.
    TasksUnavailable,
    /// No agency task matched the mapped task name.
    TaskNotFound(String),
    /// No mapping row exists for the entry being updated.
    MappingMissing(SourceEntryId),
    /// An update arrived for an entry the tracker already deleted.
    MisroutedDeletion(SourceEntryId),
    /// The agency rejected the timesheet submission.
    SubmissionRejected(String),
    /// The agency rejected the timesheet update.
    UpdateRejected(String),
    /// The tracker no longer knows the entry being deleted.
    DeletionEntryMissing(SourceEntryId),
    /// No mapping row exists for the entry being deleted.
    DeletionMappingMissing(SourceEntryId),
    /// The agency rejected the timesheet deletion.
    DeletionRejected(String),
}

impl SoftFailure {
    /// Short response title for the condition.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::SuggestionSkipped => "Skipped Entry",
            Self::EntryNotFound(_) | Self::TasksUnavailable => "Fetch Error",
            Self::NoUsableLabel | Self::MissingReference(_) => "Invalid Entry",
            Self::TaskMappingMissing(_) => "Mapping Error",
            Self::TaskNotFound(_) => "Task Not Found",
            Self::MappingMissing(_) => "No Entry Found",
            Self::MisroutedDeletion(_) => "Script Aborted",
            Self::SubmissionRejected(_) => "Submission Error",
            Self::UpdateRejected(_) => "Update Error",
            Self::DeletionEntryMissing(_)
            | Self::DeletionMappingMissing(_)
            | Self::DeletionRejected(_) => "Deletion Error",
        }
    }

    /// Longer response description for the condition.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::SuggestionSkipped => "AI-generated suggestion ignored".to_owned(),
            Self::EntryNotFound(id) => format!("Entry {id} not found on the tracker"),
            Self::NoUsableLabel => {
                "No valid label ID found after excluding parent labels".to_owned()
            }
            Self::TaskMappingMissing(label) => {
                format!("No task mapping found for label ID: {label}")
            }
            Self::MissingReference(what) => format!("Entry is missing its {what}"),
            Self::TasksUnavailable => "Failed to fetch tasks".to_owned(),
            Self::TaskNotFound(name) => {
                format!("No matching task ID found for task name: {name}")
            }
            Self::MappingMissing(_) => "No entry ID found. Cannot update timesheet.".to_owned(),
            Self::MisroutedDeletion(_) => "Deletion flagged as update. Script aborted.".to_owned(),
            Self::SubmissionRejected(detail) => format!("Timesheet submission failed: {detail}"),
            Self::UpdateRejected(detail) => format!("Timesheet update failed: {detail}"),
            Self::DeletionEntryMissing(id) => {
                format!("Event not found on the tracker for entry ID: {id}")
            }
            Self::DeletionMappingMissing(id) => {
                format!("No matching entry found for entry ID: {id}")
            }
            Self::DeletionRejected(detail) => format!("Failed to delete timesheet: {detail}"),
        }
    }
}

/// Terminal result of an entry workflow invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    /// A timesheet row was created and its mapping written or queued.
    Created(EntryMapping),
    /// The existing timesheet row was updated.
    Updated(TargetEntryId),
    /// The timesheet row and its mapping were removed.
    Deleted(SourceEntryId),
    /// A backup row was stored.
    BackedUp(SourceEntryId),
    /// A backup row was overwritten with fresh data.
    BackupRefreshed(SourceEntryId),
    /// A backup row was removed.
    BackupRemoved(SourceEntryId),
    /// No backup row existed for the entry.
    BackupMissing(SourceEntryId),
    /// The workflow terminated on an expected business condition.
    Soft(SoftFailure),
}

impl EntryOutcome {
    /// Renders the outcome as the uniform workflow response.
    #[must_use]
    pub fn into_response(self) -> WorkflowResponse {
        match self {
            Self::Created(_) => {
                WorkflowResponse::ok("Success", "Timesheet processed successfully")
            }
            Self::Updated(_) => WorkflowResponse::ok(
                "Update Successful",
                "The timesheet entry was updated successfully.",
            ),
            Self::Deleted(_) => {
                WorkflowResponse::ok("Deletion Successful", "Timesheet entry deleted successfully")
            }
            Self::BackedUp(id) => {
                WorkflowResponse::ok("Backup Successful", format!("Entry {id} stored"))
            }
            Self::BackupRefreshed(id) => {
                WorkflowResponse::ok("Backup Updated", format!("Entry {id} refreshed"))
            }
            Self::BackupRemoved(id) => {
                WorkflowResponse::ok("Backup Deleted", format!("Entry {id} removed"))
            }
            Self::BackupMissing(id) => WorkflowResponse::not_found(
                "Backup Not Found",
                format!("No backup row exists for entry {id}"),
            ),
            Self::Soft(failure) => WorkflowResponse::ok(failure.title(), failure.description()),
        }
    }
}
