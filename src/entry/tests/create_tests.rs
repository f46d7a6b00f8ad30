//! Entry creation workflow tests.

use chrono::NaiveDate;
use rstest::rstest;
use serde_json::json;

use super::harness::EntryHarness;
use crate::connect::domain::{PersonId, SourceEntryId, TargetEntryId};
use crate::entry::domain::{EntryEvent, EntryOutcome, SoftFailure};
use crate::entry::ports::MappingStore;
use crate::retry::domain::RetryOperation;

fn event(id: i64) -> EntryEvent {
    EntryEvent::new(SourceEntryId::new(id), format!("events/{id}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_create_writes_the_mapping() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);

    let outcome = harness
        .create_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    let EntryOutcome::Created(mapping) = outcome else {
        panic!("expected a created outcome, got {outcome:?}");
    };
    assert_eq!(mapping.source_id, SourceEntryId::new(123));
    assert_eq!(mapping.target_entry_id, TargetEntryId::new(9001));
    assert_eq!(mapping.target_person_id, PersonId::new(501));
    assert_eq!(mapping.day, NaiveDate::from_ymd_opt(2023, 11, 14).unwrap_or_default());

    let stored = harness
        .store
        .fetch(SourceEntryId::new(123))
        .await
        .unwrap_or_else(|err| panic!("fetch failed: {err}"));
    assert_eq!(stored, Some(mapping));

    let submissions = harness.agency.submissions();
    assert_eq!(submissions.len(), 1);
    assert!(harness.queue.queued().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn suggestion_events_perform_zero_remote_or_store_calls() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    let suggestion = EntryEvent::new(SourceEntryId::new(123), "x/suggested_hours/123");

    let outcome = harness
        .create_service()
        .process(&suggestion)
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    assert_eq!(outcome, EntryOutcome::Soft(SoftFailure::SuggestionSkipped));
    assert!(harness.tracker.recorded_calls().is_empty());
    assert!(harness.agency.recorded_calls().is_empty());
    assert!(harness.queue.queued().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_entry_is_a_soft_fetch_failure() {
    let harness = EntryHarness::new();

    let outcome = harness
        .create_service()
        .process(&event(999))
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    assert_eq!(
        outcome,
        EntryOutcome::Soft(SoftFailure::EntryNotFound(SourceEntryId::new(999)))
    );
    assert!(harness.agency.recorded_calls().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exclusively_parent_labels_are_an_invalid_entry() {
    let harness = EntryHarness::new();
    let mut entry = super::harness::sample_entry(123);
    entry.label_ids.truncate(1);
    harness.tracker.insert_entry(entry);

    let outcome = harness
        .create_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    assert_eq!(outcome, EntryOutcome::Soft(SoftFailure::NoUsableLabel));
    assert!(harness.agency.recorded_calls().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unmapped_label_is_a_mapping_error() {
    let harness = EntryHarness::new();
    harness.tracker.insert_entry(super::harness::sample_entry(123));

    let outcome = harness
        .create_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    assert!(matches!(
        outcome,
        EntryOutcome::Soft(SoftFailure::TaskMappingMissing(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unmatched_task_name_is_soft() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    harness.agency.insert_tasks("p1", Vec::new());

    let outcome = harness
        .create_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    assert_eq!(
        outcome,
        EntryOutcome::Soft(SoftFailure::TaskNotFound("Design".to_owned()))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_submission_notifies_and_stores_nothing() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    harness.agency.reject_submissions("quota exceeded");

    let outcome = harness
        .create_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    assert!(matches!(
        outcome,
        EntryOutcome::Soft(SoftFailure::SubmissionRejected(_))
    ));
    assert!(harness.store.is_empty());
    // A rejected submission is never queued for retry.
    assert!(harness.queue.queued().is_empty());
    let notices = harness.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(
        notices
            .first()
            .is_some_and(|notice| notice.title == "Submission Error")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_mapping_write_is_queued_and_still_succeeds() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    harness.store.reject_writes();

    let outcome = harness
        .create_service()
        .process(&event(123))
        .await
        .unwrap_or_else(|err| panic!("create failed: {err}"));

    assert!(matches!(outcome, EntryOutcome::Created(_)));
    let queued = harness.queue.drain();
    assert!(matches!(
        queued.as_slice(),
        [RetryOperation::WriteMapping(_)]
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_write_and_failed_enqueue_is_fatal() {
    let harness = EntryHarness::new();
    harness.seed_happy_path(123);
    harness.store.reject_writes();
    harness.queue.reject_enqueues();

    let result = harness.create_service().process(&event(123)).await;
    assert!(result.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handle_rejects_malformed_webhooks_before_any_side_effect() {
    let harness = EntryHarness::new();
    let response = harness
        .create_service()
        .handle(&json!({"payload": {"entity_path": "events/1"}}))
        .await;

    assert_eq!(response.status_code, 400);
    assert!(harness.tracker.recorded_calls().is_empty());
    assert!(harness.agency.recorded_calls().is_empty());
}
