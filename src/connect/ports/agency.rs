//! Port contract for the agency platform.

use crate::connect::domain::{
    AgencyClientRecord, AgencySession, AgencyTask, ConnectResult, JobRecord, TargetEntryId,
    TimesheetFields, TimesheetReceipt,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Operations the bridge needs from the agency platform.
///
/// Every authenticated call takes the [`AgencySession`] obtained from
/// [`AgencyPort::authenticate`] in the same invocation; sessions are never
/// reused across invocations.
#[async_trait]
pub trait AgencyPort: Send + Sync {
    /// Logs in and returns a session for the current invocation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError::Auth`] when the
    /// credentials are rejected, or a transport error when the call fails.
    async fn authenticate(&self) -> ConnectResult<AgencySession>;

    /// Lists all active clients.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn list_clients(&self, session: &AgencySession) -> ConnectResult<Vec<AgencyClientRecord>>;

    /// Lists jobs, optionally restricted to ones created on the given day.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn list_jobs(
        &self,
        session: &AgencySession,
        created_on: Option<NaiveDate>,
    ) -> ConnectResult<Vec<JobRecord>>;

    /// Fetches the full live list of open, unarchived jobs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn fetch_active_jobs(&self, session: &AgencySession) -> ConnectResult<Vec<JobRecord>>;

    /// Lists the tasks configured on a job.
    ///
    /// Task identifiers are job-scoped, so resolution happens per call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn list_tasks(
        &self,
        session: &AgencySession,
        job_ref: &str,
    ) -> ConnectResult<Vec<AgencyTask>>;

    /// Submits a new timesheet row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the platform
    /// rejects the submission or the call fails. Callers must not retry a
    /// rejected submission automatically.
    async fn create_timesheet(
        &self,
        session: &AgencySession,
        fields: &TimesheetFields,
    ) -> ConnectResult<TimesheetReceipt>;

    /// Replaces an existing timesheet row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the platform
    /// rejects the update or the call fails.
    async fn update_timesheet(
        &self,
        session: &AgencySession,
        entry_id: TargetEntryId,
        fields: &TimesheetFields,
    ) -> ConnectResult<()>;

    /// Deletes a timesheet row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the platform
    /// rejects the deletion or the call fails.
    async fn delete_timesheet(
        &self,
        session: &AgencySession,
        entry_id: TargetEntryId,
    ) -> ConnectResult<()>;
}
