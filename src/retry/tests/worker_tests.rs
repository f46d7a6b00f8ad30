//! Replay worker tests.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use crate::connect::adapters::memory::InMemoryTracker;
use crate::connect::domain::{ClientId, NewClient, PersonId, SourceEntryId, TargetEntryId};
use crate::entry::adapters::memory::{InMemoryBackupStore, InMemoryMappingStore};
use crate::entry::domain::EntryMapping;
use crate::entry::ports::MappingStore;
use crate::jobsync::adapters::memory::InMemoryJobSnapshots;
use crate::retry::domain::RetryOperation;
use crate::retry::services::RetryWorker;

type TestWorker =
    RetryWorker<InMemoryMappingStore, InMemoryBackupStore, InMemoryJobSnapshots, InMemoryTracker>;

struct WorkerHarness {
    mappings: Arc<InMemoryMappingStore>,
    tracker: Arc<InMemoryTracker>,
    worker: TestWorker,
}

fn harness() -> WorkerHarness {
    let mappings = Arc::new(InMemoryMappingStore::new());
    let backups = Arc::new(InMemoryBackupStore::new());
    let snapshots = Arc::new(InMemoryJobSnapshots::new());
    let tracker = Arc::new(InMemoryTracker::new());
    let worker = RetryWorker::new(
        Arc::clone(&mappings),
        Arc::clone(&backups),
        Arc::clone(&snapshots),
        Arc::clone(&tracker),
    );
    WorkerHarness {
        mappings,
        tracker,
        worker,
    }
}

fn mapping(id: i64) -> EntryMapping {
    EntryMapping {
        source_id: SourceEntryId::new(id),
        target_entry_id: TargetEntryId::new(id + 800),
        target_person_id: PersonId::new(501),
        day: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap_or_default(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replaying_a_write_twice_equals_replaying_it_once() {
    let fixture = harness();
    let operation = RetryOperation::WriteMapping(mapping(123));

    let first = fixture.worker.process_batch(&[operation.clone()]).await;
    let second = fixture.worker.process_batch(&[operation]).await;

    assert!(first.failures.is_empty());
    assert!(second.failures.is_empty());
    assert_eq!(fixture.mappings.len(), 1);
    let stored = fixture
        .mappings
        .fetch(SourceEntryId::new(123))
        .await
        .unwrap_or_else(|err| panic!("fetch failed: {err}"));
    assert_eq!(stored, Some(mapping(123)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replaying_a_delete_twice_equals_replaying_it_once() {
    let fixture = harness();
    fixture.mappings.insert_mapping(mapping(123));
    let operation = RetryOperation::DeleteEntry {
        source_id: SourceEntryId::new(123),
    };

    let first = fixture.worker.process_batch(&[operation.clone()]).await;
    let second = fixture.worker.process_batch(&[operation]).await;

    assert!(first.failures.is_empty());
    assert!(second.failures.is_empty());
    assert!(fixture.mappings.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_failing_message_never_drops_the_rest_of_the_batch() {
    let fixture = harness();
    fixture.tracker.reject_client_creates();
    let batch = vec![
        RetryOperation::CreateClient(NewClient {
            name: "NOVA".to_owned(),
            active: true,
            external_id: ClientId::new(6),
        }),
        RetryOperation::WriteMapping(mapping(123)),
    ];

    let report = fixture.worker.process_batch(&batch).await;

    assert_eq!(report.applied, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(!report.succeeded(0));
    assert!(report.succeeded(1));
    assert_eq!(fixture.mappings.len(), 1);

    let result = report.into_result();
    assert!(result.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_clean_batch_collapses_to_its_applied_count() {
    let fixture = harness();
    let batch = vec![
        RetryOperation::WriteMapping(mapping(1)),
        RetryOperation::WriteMapping(mapping(2)),
    ];

    let report = fixture.worker.process_batch(&batch).await;
    assert_eq!(report.clone().into_result(), Ok(2));
    assert_eq!(report.applied, 2);
}
