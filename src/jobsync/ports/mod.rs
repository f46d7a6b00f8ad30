//! Port contracts for job snapshot persistence.

pub mod snapshot;

pub use snapshot::{JobSnapshotError, JobSnapshotResult, JobSnapshotStore};
