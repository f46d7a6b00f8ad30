//! End-to-end webhook scenarios over the in-memory adapters.
//!
//! Drives the public workflow services exactly as the webhook router
//! would: raw JSON in, uniform response out, durable state in the mapping
//! store between invocations.

use std::sync::Arc;

use serde_json::json;

use chronobridge::connect::adapters::memory::{
    InMemoryAgency, InMemoryTracker, RecordingNotifier,
};
use chronobridge::connect::domain::{
    AgencyTask, LabelId, PersonId, SourceEntryId, TargetEntryId, TaskId, TrackerClientRef,
    TrackerEntry, TrackerProjectRef, TrackerUser, TrackerUserId, TrackerUserRef,
};
use chronobridge::entry::adapters::memory::InMemoryMappingStore;
use chronobridge::entry::ports::MappingStore;
use chronobridge::entry::services::{CreateEntryService, DeleteEntryService, UpdateEntryService};
use chronobridge::retry::adapters::memory::InMemoryRetryQueue;

struct Bridge {
    tracker: Arc<InMemoryTracker>,
    agency: Arc<InMemoryAgency>,
    store: Arc<InMemoryMappingStore>,
    queue: Arc<InMemoryRetryQueue>,
    notifier: Arc<RecordingNotifier>,
}

fn bridge() -> Bridge {
    let tracker = Arc::new(InMemoryTracker::new());
    let agency = Arc::new(InMemoryAgency::new());
    let store = Arc::new(InMemoryMappingStore::new());
    let queue = Arc::new(InMemoryRetryQueue::new());
    let notifier = Arc::new(RecordingNotifier::new());

    tracker.insert_entry(TrackerEntry {
        id: SourceEntryId::new(123),
        label_ids: vec![LabelId::new(4444)],
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
        duration: 3600,
        timestamp: 1_700_000_000,
        updated_at: 1_700_000_000,
        note: "x".to_owned(),
    });
    tracker.insert_user(TrackerUser {
        id: TrackerUserId::new(11),
        external_id: Some(PersonId::new(501)),
    });
    store.insert_task_mapping(LabelId::new(4444), "Design");
    agency.insert_tasks(
        "p1",
        vec![AgencyTask {
            id: TaskId::new(71),
            name: "Design".to_owned(),
        }],
    );

    Bridge {
        tracker,
        agency,
        store,
        queue,
        notifier,
    }
}

impl Bridge {
    fn create(
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

    fn update(
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

    fn delete(
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
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_create_persists_the_cross_platform_mapping() {
    let bridge = bridge();
    let webhook = json!({"payload": {"entity_id": "123", "entity_path": "events/123"}});

    let response = bridge.create().handle(&webhook).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.title, "Success");

    let mapping = bridge
        .store
        .fetch(SourceEntryId::new(123))
        .await
        .expect("store lookup should succeed")
        .expect("mapping row should exist after the create");
    assert_eq!(mapping.target_entry_id, TargetEntryId::new(9001));
    assert_eq!(mapping.target_person_id, PersonId::new(501));
    assert_eq!(mapping.day.to_string(), "2023-11-14");

    let submissions = bridge.agency.submissions();
    assert_eq!(submissions.len(), 1);
    let fields = submissions.first().expect("one submission");
    assert_eq!(fields.client_ref, "c1");
    assert_eq!(fields.job_ref, "p1");
    assert_eq!(fields.task_id, TaskId::new(71));
    assert!((fields.hours - 1.0).abs() < f64::EPSILON);
    assert!(bridge.notifier.notices().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_then_update_reuses_the_stored_target_entry() {
    let bridge = bridge();
    let webhook = json!({"payload": {"entity_id": 123, "entity_path": "events/123"}});

    let created = bridge.create().handle(&webhook).await;
    assert_eq!(created.status_code, 200);

    let updated = bridge.update().handle(&webhook).await;
    assert_eq!(updated.status_code, 200);
    assert_eq!(updated.body.title, "Update Successful");

    let updates = bridge.agency.updates();
    assert_eq!(updates.len(), 1);
    assert!(
        updates
            .first()
            .is_some_and(|(target, _)| *target == TargetEntryId::new(9001))
    );
    // The update reused the mapping instead of creating a second timesheet.
    assert_eq!(bridge.agency.submissions().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_then_delete_clears_both_sides() {
    let bridge = bridge();
    let webhook = json!({"payload": {"entity_id": 123, "entity_path": "events/123"}});

    bridge.create().handle(&webhook).await;
    let response = bridge.delete().handle(&webhook).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.title, "Deletion Successful");
    assert_eq!(bridge.agency.deletions(), vec![TargetEntryId::new(9001)]);
    assert!(bridge.store.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn suggestion_webhooks_touch_nothing() {
    let bridge = bridge();
    let webhook = json!({
        "payload": {"entity_id": 123, "entity_path": "x/suggested_hours/123"}
    });

    let response = bridge.create().handle(&webhook).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.title, "Skipped Entry");
    assert!(bridge.tracker.recorded_calls().is_empty());
    assert!(bridge.agency.recorded_calls().is_empty());
    assert!(bridge.store.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_webhooks_are_rejected_with_a_400() {
    let bridge = bridge();
    let response = bridge.create().handle(&json!({"payload": {}})).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body.title, "Invalid Event");
    assert!(bridge.tracker.recorded_calls().is_empty());
}
