//! In-memory agency fake for workflow tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::connect::domain::{
    AgencyClientRecord, AgencySession, AgencyTask, ConnectError, ConnectResult, JobRecord,
    TargetEntryId, TimesheetFields, TimesheetReceipt,
};
use crate::connect::ports::AgencyPort;

#[derive(Debug, Default)]
struct AgencyState {
    clients: Vec<AgencyClientRecord>,
    jobs: Vec<JobRecord>,
    tasks: HashMap<String, Vec<AgencyTask>>,
    submissions: Vec<TimesheetFields>,
    updates: Vec<(TargetEntryId, TimesheetFields)>,
    deletions: Vec<TargetEntryId>,
    calls: Vec<&'static str>,
    sessions_issued: u32,
    next_entry_id: i64,
    reject_auth: bool,
    reject_submissions: Option<String>,
    reject_updates: Option<String>,
    reject_deletions: Option<String>,
    fail_task_listing: bool,
}

/// Thread-safe in-memory agency fake.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgency {
    state: Arc<RwLock<AgencyState>>,
}

impl InMemoryAgency {
    /// Creates an empty fake; submitted timesheets receive ids from 9000.
    #[must_use]
    pub fn new() -> Self {
        let fake = Self::default();
        fake.write().next_entry_id = 9000;
        fake
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AgencyState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, AgencyState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds an active client.
    pub fn insert_client(&self, client: AgencyClientRecord) {
        self.write().clients.push(client);
    }

    /// Seeds an active job.
    pub fn insert_job(&self, job: JobRecord) {
        self.write().jobs.push(job);
    }

    /// Seeds the task list for a job reference.
    pub fn insert_tasks(&self, job_ref: &str, tasks: Vec<AgencyTask>) {
        self.write().tasks.insert(job_ref.to_owned(), tasks);
    }

    /// Makes authentication fail.
    pub fn reject_auth(&self) {
        self.write().reject_auth = true;
    }

    /// Makes timesheet submissions fail with the given detail.
    pub fn reject_submissions(&self, detail: &str) {
        self.write().reject_submissions = Some(detail.to_owned());
    }

    /// Makes timesheet updates fail with the given detail.
    pub fn reject_updates(&self, detail: &str) {
        self.write().reject_updates = Some(detail.to_owned());
    }

    /// Makes timesheet deletions fail with the given detail.
    pub fn reject_deletions(&self, detail: &str) {
        self.write().reject_deletions = Some(detail.to_owned());
    }

    /// Makes task listing fail.
    pub fn fail_task_listing(&self) {
        self.write().fail_task_listing = true;
    }

    /// Returns every port call recorded so far, in order.
    #[must_use]
    pub fn recorded_calls(&self) -> Vec<&'static str> {
        self.read().calls.clone()
    }

    /// Returns the number of sessions issued.
    #[must_use]
    pub fn sessions_issued(&self) -> u32 {
        self.read().sessions_issued
    }

    /// Returns the accepted timesheet submissions.
    #[must_use]
    pub fn submissions(&self) -> Vec<TimesheetFields> {
        self.read().submissions.clone()
    }

    /// Returns the accepted timesheet updates.
    #[must_use]
    pub fn updates(&self) -> Vec<(TargetEntryId, TimesheetFields)> {
        self.read().updates.clone()
    }

    /// Returns the accepted timesheet deletions.
    #[must_use]
    pub fn deletions(&self) -> Vec<TargetEntryId> {
        self.read().deletions.clone()
    }
}

#[async_trait]
impl AgencyPort for InMemoryAgency {
    async fn authenticate(&self) -> ConnectResult<AgencySession> {
        let mut state = self.write();
        state.calls.push("authenticate");
        if state.reject_auth {
            return Err(ConnectError::Auth("invalid credentials".to_owned()));
        }
        state.sessions_issued += 1;
        Ok(AgencySession::new(format!(
            "session-{}",
            state.sessions_issued
        )))
    }

    async fn list_clients(
        &self,
        _session: &AgencySession,
    ) -> ConnectResult<Vec<AgencyClientRecord>> {
        let mut state = self.write();
        state.calls.push("list_clients");
        Ok(state.clients.clone())
    }

    async fn list_jobs(
        &self,
        _session: &AgencySession,
        _created_on: Option<NaiveDate>,
    ) -> ConnectResult<Vec<JobRecord>> {
        let mut state = self.write();
        state.calls.push("list_jobs");
        Ok(state.jobs.clone())
    }

    async fn fetch_active_jobs(&self, _session: &AgencySession) -> ConnectResult<Vec<JobRecord>> {
        let mut state = self.write();
        state.calls.push("fetch_active_jobs");
        Ok(state.jobs.clone())
    }

    async fn list_tasks(
        &self,
        _session: &AgencySession,
        job_ref: &str,
    ) -> ConnectResult<Vec<AgencyTask>> {
        let mut state = self.write();
        state.calls.push("list_tasks");
        if state.fail_task_listing {
            return Err(ConnectError::api("tasks", 500, "task listing unavailable"));
        }
        Ok(state.tasks.get(job_ref).cloned().unwrap_or_default())
    }

    async fn create_timesheet(
        &self,
        _session: &AgencySession,
        fields: &TimesheetFields,
    ) -> ConnectResult<TimesheetReceipt> {
        let mut state = self.write();
        state.calls.push("create_timesheet");
        if let Some(detail) = state.reject_submissions.clone() {
            return Err(ConnectError::api("timesheet", 422, detail));
        }
        state.next_entry_id += 1;
        let entry_id = TargetEntryId::new(state.next_entry_id);
        state.submissions.push(fields.clone());
        Ok(TimesheetReceipt { entry_id })
    }

    async fn update_timesheet(
        &self,
        _session: &AgencySession,
        entry_id: TargetEntryId,
        fields: &TimesheetFields,
    ) -> ConnectResult<()> {
        let mut state = self.write();
        state.calls.push("update_timesheet");
        if let Some(detail) = state.reject_updates.clone() {
            return Err(ConnectError::api("timesheet", 422, detail));
        }
        state.updates.push((entry_id, fields.clone()));
        Ok(())
    }

    async fn delete_timesheet(
        &self,
        _session: &AgencySession,
        entry_id: TargetEntryId,
    ) -> ConnectResult<()> {
        let mut state = self.write();
        state.calls.push("delete_timesheet");
        if let Some(detail) = state.reject_deletions.clone() {
            return Err(ConnectError::api("timesheet", 500, detail));
        }
        state.deletions.push(entry_id);
        Ok(())
    }
}
