//! Shared fixtures for entry workflow tests.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::connect::adapters::memory::{InMemoryAgency, InMemoryTracker, RecordingNotifier};
use crate::connect::domain::{
    AgencyTask, PersonId, SourceEntryId, TaskId, TrackerClientRef, TrackerEntry,
    TrackerProjectRef, TrackerUser, TrackerUserId, TrackerUserRef,
};
use crate::entry::adapters::memory::{InMemoryBackupStore, InMemoryMappingStore};
use crate::entry::services::{
    BackupService, CleanupService, CreateEntryService, DeleteEntryService, UpdateEntryService,
};
use crate::retry::adapters::memory::InMemoryRetryQueue;

/// Label used by the seeded happy path.
pub(super) const DESIGN_LABEL: i64 = 4444;

/// Bundle of in-memory collaborators shared by the workflow tests.
pub(super) struct EntryHarness {
    pub tracker: Arc<InMemoryTracker>,
    pub agency: Arc<InMemoryAgency>,
    pub store: Arc<InMemoryMappingStore>,
    pub backups: Arc<InMemoryBackupStore>,
    pub queue: Arc<InMemoryRetryQueue>,
    pub notifier: Arc<RecordingNotifier>,
}

/// A tracker entry matching the seeded happy path: label 4444, project
/// reference `p1`, client reference `c1`, user 11, ninety minutes logged.
pub(super) fn sample_entry(id: i64) -> TrackerEntry {
    TrackerEntry {
        id: SourceEntryId::new(id),
        label_ids: vec![
            crate::connect::domain::LabelId::new(1111),
            crate::connect::domain::LabelId::new(DESIGN_LABEL),
        ],
        project: TrackerProjectRef {
            name: "Website".to_owned(),
            external_id: Some("p1".to_owned()),
            client: TrackerClientRef {
                name: "Acme".to_owned(),
                external_id: Some("c1".to_owned()),
            },
        },
        user: TrackerUserRef {
            id: Some(TrackerUserId::new(11)),
            name: "Sam Doe".to_owned(),
        },
        duration: 5400,
        timestamp: 1_700_000_000,
        updated_at: 1_700_000_100,
        note: "x".to_owned(),
    }
}

impl EntryHarness {
    pub fn new() -> Self {
        Self {
            tracker: Arc::new(InMemoryTracker::new()),
            agency: Arc::new(InMemoryAgency::new()),
            store: Arc::new(InMemoryMappingStore::new()),
            backups: Arc::new(InMemoryBackupStore::new()),
            queue: Arc::new(InMemoryRetryQueue::new()),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    /// Seeds everything a create for entry `id` needs to succeed.
    pub fn seed_happy_path(&self, id: i64) {
        self.tracker.insert_entry(sample_entry(id));
        self.tracker.insert_user(TrackerUser {
            id: TrackerUserId::new(11),
            external_id: Some(PersonId::new(501)),
        });
        self.store
            .insert_task_mapping(crate::connect::domain::LabelId::new(DESIGN_LABEL), "Design");
        self.agency.insert_tasks(
            "p1",
            vec![
                AgencyTask {
                    id: TaskId::new(70),
                    name: "QA".to_owned(),
                },
                AgencyTask {
                    id: TaskId::new(71),
                    name: "Design".to_owned(),
                },
            ],
        );
    }

    pub fn create_service(
        &self,
    ) -> CreateEntryService<
        InMemoryTracker,
        InMemoryAgency,
        InMemoryMappingStore,
        InMemoryRetryQueue,
        RecordingNotifier,
    > {
        CreateEntryService::new(
            Arc::clone(&self.tracker),
            Arc::clone(&self.agency),
            Arc::clone(&self.store),
            Arc::clone(&self.queue),
            Arc::clone(&self.notifier),
        )
    }

    pub fn update_service(
        &self,
    ) -> UpdateEntryService<
        InMemoryTracker,
        InMemoryAgency,
        InMemoryMappingStore,
        InMemoryRetryQueue,
        RecordingNotifier,
    > {
        UpdateEntryService::new(
            Arc::clone(&self.tracker),
            Arc::clone(&self.agency),
            Arc::clone(&self.store),
            Arc::clone(&self.queue),
            Arc::clone(&self.notifier),
        )
    }

    pub fn delete_service(
        &self,
    ) -> DeleteEntryService<
        InMemoryTracker,
        InMemoryAgency,
        InMemoryMappingStore,
        InMemoryRetryQueue,
        RecordingNotifier,
    > {
        DeleteEntryService::new(
            Arc::clone(&self.tracker),
            Arc::clone(&self.agency),
            Arc::clone(&self.store),
            Arc::clone(&self.queue),
            Arc::clone(&self.notifier),
        )
    }

    pub fn backup_service(
        &self,
    ) -> BackupService<
        InMemoryTracker,
        InMemoryBackupStore,
        InMemoryRetryQueue,
        RecordingNotifier,
        DefaultClock,
    > {
        BackupService::new(
            Arc::clone(&self.tracker),
            Arc::clone(&self.backups),
            Arc::clone(&self.queue),
            Arc::clone(&self.notifier),
            Arc::new(DefaultClock),
        )
    }

    pub fn cleanup_service(
        &self,
        retention_days: u32,
    ) -> CleanupService<InMemoryMappingStore, InMemoryRetryQueue, RecordingNotifier, DefaultClock>
    {
        CleanupService::new(
            Arc::clone(&self.store),
            Arc::clone(&self.queue),
            Arc::clone(&self.notifier),
            Arc::new(DefaultClock),
            retention_days,
        )
    }
}
