//! Denormalised audit copies of tracker entries.

use crate::connect::domain::{LabelId, SourceEntryId, TrackerEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A denormalised backup of a tracker entry.
///
/// Backups carry display names rather than references so they stay readable
/// after the source entry disappears; they hold no agency-side state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBackup {
    /// Tracker entry identifier (primary key).
    pub source_id: SourceEntryId,
    /// Day the backup row was recorded.
    pub recorded_on: NaiveDate,
    /// Display name of the user who logged the entry.
    pub user_name: String,
    /// Display name of the project.
    pub project_name: String,
    /// Display name of the project's client.
    pub client_name: String,
    /// Whole hours of the logged duration.
    pub hours: i32,
    /// Remaining minutes of the logged duration.
    pub minutes: i32,
    /// Free-text note.
    pub note: String,
    /// First label on the entry, if any.
    pub label_id: Option<LabelId>,
    /// Unix timestamp of the entry's last modification.
    pub updated_at: i64,
}

impl EntryBackup {
    /// Extracts a backup row from a fetched tracker entry.
    #[must_use]
    pub fn from_entry(entry: &TrackerEntry, recorded_on: NaiveDate) -> Self {
        let hours = entry.duration.div_euclid(3600);
        let minutes = entry.duration.rem_euclid(3600).div_euclid(60);
        Self {
            source_id: entry.id,
            recorded_on,
            user_name: entry.user.name.clone(),
            project_name: entry.project.name.clone(),
            client_name: entry.project.client.name.clone(),
            hours: i32::try_from(hours).unwrap_or_default(),
            minutes: i32::try_from(minutes).unwrap_or_default(),
            note: entry.note.clone(),
            label_id: entry.label_ids.first().copied(),
            updated_at: entry.updated_at,
        }
    }
}
