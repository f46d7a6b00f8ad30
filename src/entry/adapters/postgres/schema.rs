//! Diesel schema for entry persistence.

diesel::table! {
    /// Cross-platform entry mapping rows.
    timesheet_mappings (source_id) {
        /// Tracker entry identifier.
        source_id -> Int8,
        /// Agency timesheet identifier.
        target_entry_id -> Int8,
        /// Agency personnel reference.
        target_person_id -> Int8,
        /// Calendar day of the entry.
        day -> Date,
    }
}

diesel::table! {
    /// Static label-to-task reference data, populated out-of-band.
    task_mappings (label_id) {
        /// Tracker label identifier.
        label_id -> Int8,
        /// Agency task display name.
        #[max_length = 200]
        task_name -> Varchar,
    }
}

diesel::table! {
    /// Denormalised entry backup rows.
    entry_backups (source_id) {
        /// Tracker entry identifier.
        source_id -> Int8,
        /// Day the backup was recorded.
        recorded_on -> Date,
        /// User display name.
        #[max_length = 200]
        user_name -> Varchar,
        /// Project display name.
        #[max_length = 200]
        project_name -> Varchar,
        /// Client display name.
        #[max_length = 200]
        client_name -> Varchar,
        /// Whole hours of the logged duration.
        hours -> Int4,
        /// Remaining minutes of the logged duration.
        minutes -> Int4,
        /// Free-text note.
        note -> Text,
        /// First label on the entry, if any.
        label_id -> Nullable<Int8>,
        /// Unix timestamp of the entry's last modification.
        updated_at -> Int8,
    }
}
