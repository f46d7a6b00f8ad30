//! Diesel row models for entry persistence.

use super::schema::{entry_backups, timesheet_mappings};
use crate::connect::domain::{LabelId, PersonId, SourceEntryId, TargetEntryId};
use crate::entry::domain::{EntryBackup, EntryMapping};
use chrono::NaiveDate;
use diesel::prelude::*;

/// Row model for mapping records; doubles as the insert/upsert payload.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = timesheet_mappings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimesheetMappingRow {
    /// Tracker entry identifier.
    pub source_id: i64,
    /// Agency timesheet identifier.
    pub target_entry_id: i64,
    /// Agency personnel reference.
    pub target_person_id: i64,
    /// Calendar day of the entry.
    pub day: NaiveDate,
}

impl From<&EntryMapping> for TimesheetMappingRow {
    fn from(mapping: &EntryMapping) -> Self {
        Self {
            source_id: mapping.source_id.value(),
            target_entry_id: mapping.target_entry_id.value(),
            target_person_id: mapping.target_person_id.value(),
            day: mapping.day,
        }
    }
}

impl From<TimesheetMappingRow> for EntryMapping {
    fn from(row: TimesheetMappingRow) -> Self {
        Self {
            source_id: SourceEntryId::new(row.source_id),
            target_entry_id: TargetEntryId::new(row.target_entry_id),
            target_person_id: PersonId::new(row.target_person_id),
            day: row.day,
        }
    }
}

/// Row model for backup records; doubles as the insert/upsert payload.
///
/// `treat_none_as_null` keeps upserts full-row overwrites: a vanished
/// label must clear the stored one, not be skipped.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = entry_backups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct EntryBackupRow {
    /// Tracker entry identifier.
    pub source_id: i64,
    /// Day the backup was recorded.
    pub recorded_on: NaiveDate,
    /// User display name.
    pub user_name: String,
    /// Project display name.
    pub project_name: String,
    /// Client display name.
    pub client_name: String,
    /// Whole hours of the logged duration.
    pub hours: i32,
    /// Remaining minutes of the logged duration.
    pub minutes: i32,
    /// Free-text note.
    pub note: String,
    /// First label on the entry, if any.
    pub label_id: Option<i64>,
    /// Unix timestamp of the entry's last modification.
    pub updated_at: i64,
}

impl From<&EntryBackup> for EntryBackupRow {
    fn from(backup: &EntryBackup) -> Self {
        Self {
            source_id: backup.source_id.value(),
            recorded_on: backup.recorded_on,
            user_name: backup.user_name.clone(),
            project_name: backup.project_name.clone(),
            client_name: backup.client_name.clone(),
            hours: backup.hours,
            minutes: backup.minutes,
            note: backup.note.clone(),
            label_id: backup.label_id.map(LabelId::value),
            updated_at: backup.updated_at,
        }
    }
}

impl From<EntryBackupRow> for EntryBackup {
    fn from(row: EntryBackupRow) -> Self {
        Self {
            source_id: SourceEntryId::new(row.source_id),
            recorded_on: row.recorded_on,
            user_name: row.user_name,
            project_name: row.project_name,
            client_name: row.client_name,
            hours: row.hours,
            minutes: row.minutes,
            note: row.note,
            label_id: row.label_id.map(LabelId::new),
            updated_at: row.updated_at,
        }
    }
}
