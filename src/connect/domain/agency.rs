//! Wire-facing records for the agency platform.

use super::ids::{ClientId, JobId, PersonId, TargetEntryId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An authenticated agency session token.
///
/// Valid for the remainder of a single workflow invocation only; sessions
/// are never cached across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgencySession(String);

impl AgencySession {
    /// Wraps a session token returned by the login endpoint.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// Returns the raw token for request headers.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// An active client on the agency platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyClientRecord {
    /// Agency client identifier.
    pub id: ClientId,
    /// Short client code.
    pub code: String,
    /// Client display name.
    pub name: String,
}

/// Denormalised snapshot of an active agency job and its client.
///
/// This is both the live record fetched from the agency and the shape
/// mirrored into the job snapshot store; rows are compared structurally and
/// fully overwritten on drift, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Agency job identifier.
    pub job_id: JobId,
    /// Agency client identifier.
    pub client_id: ClientId,
    /// Short client code.
    pub client_code: String,
    /// Client display name.
    pub client_name: String,
    /// Short job code.
    pub job_code: String,
    /// Job display name.
    pub job_name: String,
}

/// A task within an agency job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyTask {
    /// Agency task identifier.
    pub id: TaskId,
    /// Task display name, matched exactly against the task mapping.
    pub name: String,
}

/// Field set submitted with timesheet create and update calls.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetFields {
    /// Agency client reference taken from the tracker entry.
    pub client_ref: String,
    /// Agency job reference taken from the tracker entry.
    pub job_ref: String,
    /// Resolved job-scoped task.
    pub task_id: TaskId,
    /// Agency personnel reference for the acting user.
    pub person_id: PersonId,
    /// Decimal hours (seconds divided by 3600).
    pub hours: f64,
    /// Calendar day the entry belongs to.
    pub day: NaiveDate,
    /// Free-text note.
    pub note: String,
}

/// Receipt returned by a successful timesheet submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimesheetReceipt {
    /// Identifier assigned to the new timesheet row.
    pub entry_id: TargetEntryId,
}
