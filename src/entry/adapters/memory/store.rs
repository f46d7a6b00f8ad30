//! Thread-safe in-memory mapping store.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::connect::domain::{LabelId, SourceEntryId};
use crate::entry::domain::EntryMapping;
use crate::entry::ports::{MappingPage, MappingStore, MappingStoreError, MappingStoreResult};

#[derive(Debug, Default)]
struct MappingState {
    mappings: BTreeMap<SourceEntryId, EntryMapping>,
    tasks: HashMap<LabelId, String>,
    reject_writes: bool,
    reject_deletes: bool,
}

/// In-memory mapping store with rejection toggles for failure-path tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMappingStore {
    state: Arc<RwLock<MappingState>>,
}

impl InMemoryMappingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MappingState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MappingState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a task mapping for a label.
    pub fn insert_task_mapping(&self, label: LabelId, task_name: &str) {
        self.write().tasks.insert(label, task_name.to_owned());
    }

    /// Seeds a mapping row directly.
    pub fn insert_mapping(&self, mapping: EntryMapping) {
        self.write().mappings.insert(mapping.source_id, mapping);
    }

    /// Makes subsequent puts fail.
    pub fn reject_writes(&self) {
        self.write().reject_writes = true;
    }

    /// Makes subsequent deletes fail.
    pub fn reject_deletes(&self) {
        self.write().reject_deletes = true;
    }

    /// Returns the number of stored mapping rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().mappings.len()
    }

    /// Returns `true` when no mapping rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().mappings.is_empty()
    }
}

fn rejected(what: &str) -> MappingStoreError {
    MappingStoreError::persistence(std::io::Error::other(format!("{what} rejected")))
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn task_name(&self, label: LabelId) -> MappingStoreResult<Option<String>> {
        Ok(self.read().tasks.get(&label).cloned())
    }

    async fn fetch(&self, source: SourceEntryId) -> MappingStoreResult<Option<EntryMapping>> {
        Ok(self.read().mappings.get(&source).copied())
    }

    async fn put(&self, mapping: &EntryMapping) -> MappingStoreResult<()> {
        let mut state = self.write();
        if state.reject_writes {
            return Err(rejected("write"));
        }
        state.mappings.insert(mapping.source_id, *mapping);
        Ok(())
    }

    async fn delete(&self, source: SourceEntryId) -> MappingStoreResult<()> {
        let mut state = self.write();
        if state.reject_deletes {
            return Err(rejected("delete"));
        }
        state.mappings.remove(&source);
        Ok(())
    }

    async fn scan_older_than(
        &self,
        cutoff: NaiveDate,
        after: Option<SourceEntryId>,
        limit: u32,
    ) -> MappingStoreResult<MappingPage> {
        let state = self.read();
        let mut matched = state
            .mappings
            .values()
            .filter(|mapping| mapping.day < cutoff)
            .filter(|mapping| after.is_none_or(|key| mapping.source_id > key))
            .copied()
            .collect::<Vec<_>>();

        let page_len = usize::try_from(limit).unwrap_or(usize::MAX);
        let next = if matched.len() > page_len {
            matched.truncate(page_len);
            matched.last().map(|mapping| mapping.source_id)
        } else {
            None
        };

        Ok(MappingPage {
            rows: matched,
            next,
        })
    }
}
