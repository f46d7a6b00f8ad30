//! Port contracts for entry persistence.

pub mod backup;
pub mod store;

pub use backup::BackupStore;
pub use store::{MappingPage, MappingStore, MappingStoreError, MappingStoreResult};
