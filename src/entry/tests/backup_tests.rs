//! Entry backup mirror tests.

use rstest::rstest;

use super::harness::{EntryHarness, sample_entry};
use crate::connect::domain::{LabelId, SourceEntryId};
use crate::entry::domain::{EntryEvent, EntryOutcome};
use crate::entry::ports::BackupStore;
use crate::retry::domain::RetryOperation;

fn event(id: i64) -> EntryEvent {
    EntryEvent::new(SourceEntryId::new(id), format!("events/{id}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_extracts_a_denormalised_copy() {
    let harness = EntryHarness::new();
    harness.tracker.insert_entry(sample_entry(123));

    let outcome = harness
        .backup_service()
        .record(&event(123))
        .await
        .unwrap_or_else(|err| panic!("backup failed: {err}"));

    assert_eq!(outcome, EntryOutcome::BackedUp(SourceEntryId::new(123)));
    let stored = harness
        .backups
        .fetch(SourceEntryId::new(123))
        .await
        .unwrap_or_else(|err| panic!("fetch failed: {err}"))
        .unwrap_or_else(|| panic!("backup row should exist"));
    assert_eq!(stored.user_name, "Sam Doe");
    assert_eq!(stored.project_name, "Website");
    assert_eq!(stored.client_name, "Acme");
    assert_eq!(stored.hours, 1);
    assert_eq!(stored.minutes, 30);
    assert_eq!(stored.label_id, Some(LabelId::new(1111)));
    assert_eq!(stored.updated_at, 1_700_000_100);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_without_a_tracker_entry_is_a_hard_failure() {
    let harness = EntryHarness::new();

    let result = harness.backup_service().record(&event(999)).await;
    assert!(result.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_overwrites_the_previous_copy() {
    let harness = EntryHarness::new();
    harness.tracker.insert_entry(sample_entry(123));
    let service = harness.backup_service();
    service
        .record(&event(123))
        .await
        .unwrap_or_else(|err| panic!("backup failed: {err}"));

    let mut changed = sample_entry(123);
    changed.note = "revised".to_owned();
    changed.duration = 7200;
    harness.tracker.insert_entry(changed);

    let outcome = service
        .refresh(&event(123))
        .await
        .unwrap_or_else(|err| panic!("refresh failed: {err}"));

    assert_eq!(
        outcome,
        EntryOutcome::BackupRefreshed(SourceEntryId::new(123))
    );
    let stored = harness
        .backups
        .fetch(SourceEntryId::new(123))
        .await
        .unwrap_or_else(|err| panic!("fetch failed: {err}"))
        .unwrap_or_else(|| panic!("backup row should exist"));
    assert_eq!(stored.note, "revised");
    assert_eq!(stored.hours, 2);
    assert_eq!(stored.minutes, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_reports_missing_rows_as_not_found() {
    let harness = EntryHarness::new();

    let outcome = harness
        .backup_service()
        .remove(&event(123))
        .await
        .unwrap_or_else(|err| panic!("remove failed: {err}"));

    assert_eq!(outcome, EntryOutcome::BackupMissing(SourceEntryId::new(123)));
    assert_eq!(outcome.into_response().status_code, 404);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_backup_write_is_queued() {
    let harness = EntryHarness::new();
    harness.tracker.insert_entry(sample_entry(123));
    harness.backups.reject_writes();

    let outcome = harness
        .backup_service()
        .record(&event(123))
        .await
        .unwrap_or_else(|err| panic!("backup failed: {err}"));

    assert_eq!(outcome, EntryOutcome::BackedUp(SourceEntryId::new(123)));
    let queued = harness.queue.drain();
    assert!(matches!(queued.as_slice(), [RetryOperation::StoreBackup(_)]));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_backup_delete_is_queued() {
    let harness = EntryHarness::new();
    harness.backups.reject_deletes();

    let outcome = harness
        .backup_service()
        .remove(&event(123))
        .await
        .unwrap_or_else(|err| panic!("remove failed: {err}"));

    assert_eq!(outcome, EntryOutcome::BackupRemoved(SourceEntryId::new(123)));
    let queued = harness.queue.drain();
    assert!(matches!(
        queued.as_slice(),
        [RetryOperation::DeleteBackup { .. }]
    ));
}
