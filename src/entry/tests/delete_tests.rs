//! Entry deletion workflow tests.

use chrono::NaiveDate;
use rstest::rstest;

use super::harness::EntryHarness;
use crate::connect::domain::{PersonId, SourceEntryId, TargetEntryId};
use crate::entry::domain::{EntryEvent, EntryMapping, EntryOutcome, SoftFailure};
use crate::entry::ports::MappingStore;
use crate::retry::domain::RetryOperation;

fn event(id: i64) -> EntryEvent {
    EntryEvent::new(SourceEntryId::new(id), format!("events/{id}"))
}

fn seeded_mapping(id: i64) -> EntryMapping {
    EntryMapping {
        source_id: SourceEntryId::new(id),
        target_entry_id: TargetEntryId::new(900),
        target_person_id: PersonId::new(501),
        day: NaiveDate::from_ymd_opt(2023, 11, 1).unwrap_or_default(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_delete_removes_remote_and_local_state() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    harness.store.insert_mapping(seeded_mapping(123));

    let outcome = harness
        .delete_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("delete failed: {err}"));

    assert_eq!(outcome, EntryOutcome::Deleted(SourceEntryId::new(123)));
    assert_eq!(harness.agency.deletions(), vec![TargetEntryId::new(900)]);
    assert!(harness.store.is_empty());
    assert!(harness.notifier.notices().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn suggestion_deletions_are_skipped_without_calls() {
    let harness = EntryHarness::new();
    let suggestion = EntryEvent::new(SourceEntryId::new(123), "x/suggested_hours/123");

    let outcome = harness
        .delete_service()
        .process(&suggestion)
        .await
        .unwrap_or_else(|err| panic!("delete failed: {err}"));

    assert_eq!(outcome, EntryOutcome::Soft(SoftFailure::SuggestionSkipped));
    assert!(harness.tracker.recorded_calls().is_empty());
    assert!(harness.agency.recorded_calls().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_webhook_without_a_tracker_entry_is_notified() {
    let harness = EntryHarness::new();
    harness.store.insert_mapping(seeded_mapping(123));

    let outcome = harness
        .delete_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("delete failed: {err}"));

    assert_eq!(
        outcome,
        EntryOutcome::Soft(SoftFailure::DeletionEntryMissing(SourceEntryId::new(123)))
    );
    assert_eq!(harness.notifier.notices().len(), 1);
    assert!(harness.agency.recorded_calls().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_mapping_row_is_notified_and_soft() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);

    let outcome = harness
        .delete_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("delete failed: {err}"));

    assert_eq!(
        outcome,
        EntryOutcome::Soft(SoftFailure::DeletionMappingMissing(SourceEntryId::new(123)))
    );
    assert_eq!(harness.notifier.notices().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_remote_delete_retains_the_mapping_row() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    harness.store.insert_mapping(seeded_mapping(123));
    harness.agency.reject_deletions("locked period");

    let outcome = harness
        .delete_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("delete failed: {err}"));

    assert!(matches!(
        outcome,
        EntryOutcome::Soft(SoftFailure::DeletionRejected(_))
    ));
    // The row stays so the deletion can be replayed without the tracker.
    let stored = harness
        .store
        .fetch(SourceEntryId::new(123))
        .await
        .unwrap_or_else(|err| panic!("fetch failed: {err}"));
    assert_eq!(stored, Some(seeded_mapping(123)));
    assert!(harness.queue.queued().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_local_delete_is_queued_and_still_succeeds() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    harness.store.insert_mapping(seeded_mapping(123));
    harness.store.reject_deletes();

    let outcome = harness
        .delete_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("delete failed: {err}"));

    assert_eq!(outcome, EntryOutcome::Deleted(SourceEntryId::new(123)));
    let queued = harness.queue.drain();
    assert!(matches!(
        queued.as_slice(),
        [RetryOperation::DeleteEntry { source_id }] if *source_id == SourceEntryId::new(123)
    ));
}
