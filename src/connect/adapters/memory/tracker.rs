//! In-memory tracker fake for workflow tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::connect::domain::{
    ClientDirectory, ConnectError, ConnectResult, CreatedClient, NewClient, NewProject,
    SourceEntryId, TrackerClientId, TrackerEntry, TrackerProject, TrackerUser, TrackerUserId,
};
use crate::connect::ports::TrackerPort;

#[derive(Debug, Default)]
struct TrackerState {
    entries: HashMap<SourceEntryId, TrackerEntry>,
    users: HashMap<TrackerUserId, TrackerUser>,
    clients: ClientDirectory,
    projects: Vec<TrackerProject>,
    created_clients: Vec<NewClient>,
    created_projects: Vec<NewProject>,
    deleted_projects: Vec<i64>,
    calls: Vec<&'static str>,
    next_client_id: i64,
    reject_client_creates: bool,
    reject_project_creates: bool,
    reject_project_deletes: bool,
}

/// Thread-safe in-memory tracker fake.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTracker {
    state: Arc<RwLock<TrackerState>>,
}

impl InMemoryTracker {
    /// Creates an empty fake.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, TrackerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, TrackerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a time entry.
    pub fn insert_entry(&self, entry: TrackerEntry) {
        self.write().entries.insert(entry.id, entry);
    }

    /// Seeds a user account.
    pub fn insert_user(&self, user: TrackerUser) {
        self.write().users.insert(user.id, user);
    }

    /// Seeds a client under the given name.
    pub fn insert_client(&self, name: &str, id: TrackerClientId) {
        self.write().clients.insert(name, id);
    }

    /// Seeds a project record.
    pub fn insert_project(&self, project: TrackerProject) {
        self.write().projects.push(project);
    }

    /// Makes subsequent client creations fail.
    pub fn reject_client_creates(&self) {
        self.write().reject_client_creates = true;
    }

    /// Makes subsequent project creations fail.
    pub fn reject_project_creates(&self) {
        self.write().reject_project_creates = true;
    }

    /// Makes subsequent project deletions fail.
    pub fn reject_project_deletes(&self) {
        self.write().reject_project_deletes = true;
    }

    /// Returns every port call recorded so far, in order.
    #[must_use]
    pub fn recorded_calls(&self) -> Vec<&'static str> {
        self.read().calls.clone()
    }

    /// Returns the client payloads accepted by `create_client`.
    #[must_use]
    pub fn created_clients(&self) -> Vec<NewClient> {
        self.read().created_clients.clone()
    }

    /// Returns the project payloads accepted by `create_project`.
    #[must_use]
    pub fn created_projects(&self) -> Vec<NewProject> {
        self.read().created_projects.clone()
    }

    /// Returns the project identifiers accepted by `delete_project`.
    #[must_use]
    pub fn deleted_projects(&self) -> Vec<i64> {
        self.read().deleted_projects.clone()
    }
}

#[async_trait]
impl TrackerPort for InMemoryTracker {
    async fn fetch_entry(&self, id: SourceEntryId) -> ConnectResult<Option<TrackerEntry>> {
        let mut state = self.write();
        state.calls.push("fetch_entry");
        Ok(state.entries.get(&id).cloned())
    }

    async fn fetch_user(&self, id: TrackerUserId) -> ConnectResult<Option<TrackerUser>> {
        let mut state = self.write();
        state.calls.push("fetch_user");
        Ok(state.users.get(&id).cloned())
    }

    async fn list_clients(&self) -> ConnectResult<ClientDirectory> {
        let mut state = self.write();
        state.calls.push("list_clients");
        Ok(state.clients.clone())
    }

    async fn create_client(&self, client: &NewClient) -> ConnectResult<CreatedClient> {
        let mut state = self.write();
        state.calls.push("create_client");
        if state.reject_client_creates {
            return Err(ConnectError::api("clients", 422, "client creation rejected"));
        }
        state.next_client_id += 1;
        let id = TrackerClientId::new(state.next_client_id);
        state.clients.insert(&client.name, id);
        state.created_clients.push(client.clone());
        Ok(CreatedClient { id })
    }

    async fn list_projects(&self) -> ConnectResult<Vec<TrackerProject>> {
        let mut state = self.write();
        state.calls.push("list_projects");
        Ok(state.projects.clone())
    }

    async fn create_project(&self, project: &NewProject) -> ConnectResult<()> {
        let mut state = self.write();
        state.calls.push("create_project");
        if state.reject_project_creates {
            return Err(ConnectError::api(
                "projects",
                422,
                "project creation rejected",
            ));
        }
        state.created_projects.push(project.clone());
        Ok(())
    }

    async fn update_project(&self, project_id: i64, _project: &NewProject) -> ConnectResult<()> {
        let mut state = self.write();
        state.calls.push("update_project");
        if state.projects.iter().any(|p| p.id == project_id) {
            Ok(())
        } else {
            Err(ConnectError::api("projects", 404, "unknown project"))
        }
    }

    async fn delete_project(&self, project_id: i64) -> ConnectResult<()> {
        let mut state = self.write();
        state.calls.push("delete_project");
        if state.reject_project_deletes {
            return Err(ConnectError::api(
                "projects",
                500,
                "project deletion rejected",
            ));
        }
        state.projects.retain(|p| p.id != project_id);
        state.deleted_projects.push(project_id);
        Ok(())
    }
}
