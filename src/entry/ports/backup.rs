//! Repository port for the entry backup store.

use super::store::MappingStoreResult;
use crate::connect::domain::SourceEntryId;
use crate::entry::domain::EntryBackup;
use async_trait::async_trait;

/// Durable store of denormalised entry backups.
///
/// Puts overwrite the whole row, so replaying one is idempotent.
#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Writes a backup row, overwriting any previous row for the key.
    ///
    /// # Errors
    ///
    /// Returns [`super::store::MappingStoreError`] when the write fails.
    async fn put(&self, backup: &EntryBackup) -> MappingStoreResult<()>;

    /// Fetches the backup row for a tracker entry.
    ///
    /// Returns `None` when no row exists.
    ///
    /// # Errors
    ///
    /// Returns [`super::store::MappingStoreError`] when the lookup fails.
    async fn fetch(&self, source: SourceEntryId) -> MappingStoreResult<Option<EntryBackup>>;

    /// Deletes the backup row for a tracker entry.
    ///
    /// Returns `true` when a row was removed, `false` when none existed.
    ///
    /// # Errors
    ///
    /// Returns [`super::store::MappingStoreError`] when the delete fails.
    async fn delete(&self, source: SourceEntryId) -> MappingStoreResult<bool>;
}
