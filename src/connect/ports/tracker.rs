//! Port contract for the tracker platform.

use crate::connect::domain::{
    ClientDirectory, ConnectResult, CreatedClient, NewClient, NewProject, SourceEntryId,
    TrackerEntry, TrackerProject, TrackerUser, TrackerUserId,
};
use async_trait::async_trait;

/// Operations the bridge needs from the tracker platform.
///
/// Implementations must bound every call with a timeout; a timeout is
/// reported like any other transport failure.
#[async_trait]
pub trait TrackerPort: Send + Sync {
    /// Fetches a time entry by identifier.
    ///
    /// Returns `None` when the entry does not exist (or no longer exists).
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn fetch_entry(&self, id: SourceEntryId) -> ConnectResult<Option<TrackerEntry>>;

    /// Fetches a user account by identifier.
    ///
    /// Returns `None` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn fetch_user(&self, id: TrackerUserId) -> ConnectResult<Option<TrackerUser>>;

    /// Lists all clients, keyed by normalised name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn list_clients(&self) -> ConnectResult<ClientDirectory>;

    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the platform
    /// rejects the payload or the call fails.
    async fn create_client(&self, client: &NewClient) -> ConnectResult<CreatedClient>;

    /// Lists all projects.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the call fails.
    async fn list_projects(&self) -> ConnectResult<Vec<TrackerProject>>;

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the platform
    /// rejects the payload or the call fails.
    async fn create_project(&self, project: &NewProject) -> ConnectResult<()>;

    /// Replaces an existing project's fields.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the project is
    /// unknown or the call fails.
    async fn update_project(&self, project_id: i64, project: &NewProject) -> ConnectResult<()>;

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connect::domain::ConnectError`] when the project is
    /// unknown or the call fails.
    async fn delete_project(&self, project_id: i64) -> ConnectResult<()>;
}
