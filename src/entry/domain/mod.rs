//! Domain model for time-entry synchronization.
//!
//! Explicit record types per workflow stage: the parsed webhook event, the
//! validated label resolution, the enriched submission payload, the durable
//! mapping row, and the typed terminal outcome. Each value is immutable
//! after construction.

mod backup;
mod event;
mod labels;
mod mapping;
mod outcome;
mod submission;

pub use backup::EntryBackup;
pub use event::{EntryEvent, EventParseError, SUGGESTION_MARKER};
pub use labels::{EXCLUDED_LABEL_IDS, authoritative_label};
pub use mapping::EntryMapping;
pub use outcome::{EntryOutcome, SoftFailure};
pub use submission::{build_fields, match_task};
