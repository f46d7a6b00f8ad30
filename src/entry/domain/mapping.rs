//! The durable cross-platform entry mapping.

use crate::connect::domain::{PersonId, SourceEntryId, TargetEntryId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Correspondence between a tracker entry and its agency timesheet row.
///
/// A row exists if and only if a successful create has completed for the
/// source entry. The key never changes; the remaining fields are replaced
/// wholesale on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMapping {
    /// Tracker entry identifier (primary key).
    pub source_id: SourceEntryId,
    /// Agency timesheet identifier created for the entry.
    pub target_entry_id: TargetEntryId,
    /// Agency personnel reference, kept to reconstruct future update calls.
    pub target_person_id: PersonId,
    /// Calendar day the entry belongs to; drives retention cleanup.
    pub day: NaiveDate,
}
