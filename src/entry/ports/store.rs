//! Repository port for the entry mapping store.

use crate::connect::domain::{LabelId, SourceEntryId};
use crate::entry::domain::EntryMapping;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mapping store operations.
pub type MappingStoreResult<T> = Result<T, MappingStoreError>;

/// One page of a bounded retention scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPage {
    /// Rows matched on this page.
    pub rows: Vec<EntryMapping>,
    /// Continuation key for the next page, or `None` when exhausted.
    pub next: Option<SourceEntryId>,
}

/// Durable key-value store of entry mappings and the static task table.
///
/// Implementations provide atomic single-key put and delete; no external
/// locking is required by the workflows. Puts are full-row overwrites, so
/// replaying one is idempotent.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Resolves a tracker label to its agency task name.
    ///
    /// Returns `None` when no mapping is configured for the label. The task
    /// table is reference data populated out-of-band; workflows never write
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStoreError`] when the lookup fails.
    async fn task_name(&self, label: LabelId) -> MappingStoreResult<Option<String>>;

    /// Fetches the mapping row for a tracker entry.
    ///
    /// Returns `None` when no row exists.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStoreError`] when the lookup fails.
    async fn fetch(&self, source: SourceEntryId) -> MappingStoreResult<Option<EntryMapping>>;

    /// Writes a mapping row, overwriting any previous row for the key.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStoreError`] when the write fails.
    async fn put(&self, mapping: &EntryMapping) -> MappingStoreResult<()>;

    /// Deletes the mapping row for a tracker entry.
    ///
    /// Deleting an absent row is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStoreError`] when the delete fails.
    async fn delete(&self, source: SourceEntryId) -> MappingStoreResult<()>;

    /// Returns one page of rows whose day falls strictly before the cutoff.
    ///
    /// Pages are keyed by `after`, the last key of the previous page;
    /// callers follow [`MappingPage::next`] until it is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStoreError`] when the scan fails.
    async fn scan_older_than(
        &self,
        cutoff: NaiveDate,
        after: Option<SourceEntryId>,
        limit: u32,
    ) -> MappingStoreResult<MappingPage>;
}

/// Errors returned by mapping store implementations.
#[derive(Debug, Clone, Error)]
pub enum MappingStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// A connection could not be obtained.
    #[error("connection error: {0}")]
    Connection(String),
}

impl MappingStoreError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}
