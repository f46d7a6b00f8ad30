//! Thread-safe in-memory backup store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::connect::domain::SourceEntryId;
use crate::entry::domain::EntryBackup;
use crate::entry::ports::{BackupStore, MappingStoreError, MappingStoreResult};

#[derive(Debug, Default)]
struct BackupState {
    backups: HashMap<SourceEntryId, EntryBackup>,
    reject_writes: bool,
    reject_deletes: bool,
}

/// In-memory backup store with rejection toggles for failure-path tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackupStore {
    state: Arc<RwLock<BackupState>>,
}

impl InMemoryBackupStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BackupState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes subsequent puts fail.
    pub fn reject_writes(&self) {
        self.write().reject_writes = true;
    }

    /// Makes subsequent deletes fail.
    pub fn reject_deletes(&self) {
        self.write().reject_deletes = true;
    }
}

#[async_trait]
impl BackupStore for InMemoryBackupStore {
    async fn put(&self, backup: &EntryBackup) -> MappingStoreResult<()> {
        let mut state = self.write();
        if state.reject_writes {
            return Err(MappingStoreError::persistence(std::io::Error::other(
                "write rejected",
            )));
        }
        state.backups.insert(backup.source_id, backup.clone());
        Ok(())
    }

    async fn fetch(&self, source: SourceEntryId) -> MappingStoreResult<Option<EntryBackup>> {
        Ok(self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .backups
            .get(&source)
            .cloned())
    }

    async fn delete(&self, source: SourceEntryId) -> MappingStoreResult<bool> {
        let mut state = self.write();
        if state.reject_deletes {
            return Err(MappingStoreError::persistence(std::io::Error::other(
                "delete rejected",
            )));
        }
        Ok(state.backups.remove(&source).is_some())
    }
}
