//! Wire-facing records for the tracker platform.

use super::ids::{ClientId, JobId, LabelId, PersonId, SourceEntryId, TrackerClientId, TrackerUserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowercases and trims a code or name for case-insensitive matching.
///
/// Both client codes and project keys are compared in this normalised form
/// across the two platforms.
#[must_use]
pub fn normalized(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Client reference embedded in a tracker entry's project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerClientRef {
    /// Client name as shown on the tracker.
    #[serde(default)]
    pub name: String,
    /// Agency client identifier mirrored onto the tracker record, if set.
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Project reference embedded in a tracker entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerProjectRef {
    /// Project name as shown on the tracker.
    #[serde(default)]
    pub name: String,
    /// Agency job identifier mirrored onto the tracker record, if set.
    #[serde(default)]
    pub external_id: Option<String>,
    /// The project's client.
    #[serde(default)]
    pub client: TrackerClientRef,
}

/// User reference embedded in a tracker entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerUserRef {
    /// Tracker user identifier.
    #[serde(default)]
    pub id: Option<TrackerUserId>,
    /// User display name.
    #[serde(default)]
    pub name: String,
}

/// A full time entry fetched from the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEntry {
    /// Entry identifier (the mapping key).
    pub id: SourceEntryId,
    /// Category labels attached to the entry, parents included.
    #[serde(default)]
    pub label_ids: Vec<LabelId>,
    /// The project the entry was logged against.
    #[serde(default)]
    pub project: TrackerProjectRef,
    /// The user who logged the entry.
    #[serde(default)]
    pub user: TrackerUserRef,
    /// Logged duration in seconds.
    #[serde(default)]
    pub duration: i64,
    /// Unix timestamp of the tracked day.
    #[serde(default)]
    pub timestamp: i64,
    /// Unix timestamp of the last modification.
    #[serde(default)]
    pub updated_at: i64,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
}

/// A tracker user account, carrying the agency personnel reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerUser {
    /// Tracker user identifier.
    pub id: TrackerUserId,
    /// Agency personnel identifier mirrored onto the account, if set.
    #[serde(default)]
    pub external_id: Option<PersonId>,
}

/// A project record on the tracker platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerProject {
    /// Tracker project identifier.
    pub id: i64,
    /// Project name.
    pub name: String,
    /// Agency job identifier mirrored onto the project, if set.
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Payload for creating a tracker client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Client name (the agency client code).
    pub name: String,
    /// Whether the client is active.
    pub active: bool,
    /// Agency client identifier recorded as the external reference.
    pub external_id: ClientId,
}

/// Response to a successful client creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedClient {
    /// Tracker identifier assigned to the new client.
    pub id: TrackerClientId,
}

/// A user granted access to a newly created project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// Tracker user identifier.
    pub user_id: i64,
}

/// A label attached to a newly created project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLabel {
    /// Whether entries on the project must carry this label.
    pub required: bool,
    /// Tracker label identifier.
    pub label_id: LabelId,
}

/// Payload for creating a tracker project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name, `"{job name} - {job code}"`.
    pub name: String,
    /// Owning tracker client.
    pub client_id: TrackerClientId,
    /// Display colour.
    pub color: String,
    /// Billing rate type.
    pub rate_type: String,
    /// Users granted access.
    pub users: Vec<ProjectMember>,
    /// Labels enabled on the project.
    pub labels: Vec<ProjectLabel>,
    /// Label mode.
    pub enable_labels: String,
    /// Agency job identifier recorded as the external reference.
    pub external_id: JobId,
}

/// Tracker clients keyed by normalised name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDirectory {
    entries: HashMap<String, TrackerClientId>,
}

impl ClientDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a client under its normalised name.
    pub fn insert(&mut self, name: &str, id: TrackerClientId) {
        self.entries.insert(normalized(name), id);
    }

    /// Looks up a client by name, normalising the key first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TrackerClientId> {
        self.entries.get(&normalized(name)).copied()
    }

    /// Returns `true` when a client with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalized(name))
    }

    /// Number of known clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no clients are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, TrackerClientId)> for ClientDirectory {
    fn from_iter<I: IntoIterator<Item = (String, TrackerClientId)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (name, id) in iter {
            directory.insert(&name, id);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientDirectory, TrackerClientId, normalized};

    #[test]
    fn normalized_trims_and_lowercases() {
        assert_eq!(normalized("  Acme CO "), "acme co");
    }

    #[test]
    fn directory_lookups_are_case_insensitive() {
        let mut directory = ClientDirectory::new();
        directory.insert("Acme CO", TrackerClientId::new(7));
        assert!(directory.contains("acme co"));
        assert_eq!(directory.get(" ACME CO"), Some(TrackerClientId::new(7)));
        assert!(!directory.contains("other"));
    }
}
