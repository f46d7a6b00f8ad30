//! Retention cleanup tests.

use chrono::{Duration, Utc};
use rstest::rstest;

use super::harness::EntryHarness;
use crate::connect::domain::{PersonId, SourceEntryId, TargetEntryId};
use crate::entry::domain::EntryMapping;
use crate::entry::ports::MappingStore;
use crate::retry::domain::RetryOperation;

fn mapping_aged(id: i64, age_days: i64) -> EntryMapping {
    EntryMapping {
        source_id: SourceEntryId::new(id),
        target_entry_id: TargetEntryId::new(id + 1000),
        target_person_id: PersonId::new(501),
        day: Utc::now().date_naive() - Duration::days(age_days),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_rows_are_deleted_and_fresh_rows_survive() {
    let harness = EntryHarness::new();
    harness.store.insert_mapping(mapping_aged(1, 60));
    harness.store.insert_mapping(mapping_aged(2, 50));
    harness.store.insert_mapping(mapping_aged(3, 10));
    harness.store.insert_mapping(mapping_aged(4, 45));

    let report = harness
        .cleanup_service(45)
        .run()
        .await
        .unwrap_or_else(|err| panic!("cleanup failed: {err}"));

    assert_eq!(report.deleted, 2);
    assert_eq!(report.found, 2);
    // Rows at or after the cutoff are untouched.
    assert_eq!(harness.store.len(), 2);
    let fresh = harness
        .store
        .fetch(SourceEntryId::new(3))
        .await
        .unwrap_or_else(|err| panic!("fetch failed: {err}"));
    assert!(fresh.is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_still_notifies_completion() {
    let harness = EntryHarness::new();

    let report = harness
        .cleanup_service(45)
        .run()
        .await
        .unwrap_or_else(|err| panic!("cleanup failed: {err}"));

    assert_eq!(report.deleted, 0);
    assert_eq!(report.found, 0);
    let notices = harness.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(
        notices
            .first()
            .is_some_and(|notice| notice.title == "Cleanup Process Complete")
    );
    assert!(
        notices
            .first()
            .is_some_and(|notice| notice.description.starts_with("No entries found"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_deletions_queue_one_retry_each_and_do_not_abort() {
    let harness = EntryHarness::new();
    harness.store.insert_mapping(mapping_aged(1, 60));
    harness.store.insert_mapping(mapping_aged(2, 70));
    harness.store.reject_deletes();

    let report = harness
        .cleanup_service(45)
        .run()
        .await
        .unwrap_or_else(|err| panic!("cleanup failed: {err}"));

    assert_eq!(report.deleted, 0);
    assert_eq!(report.found, 2);
    let queued = harness.queue.drain();
    assert_eq!(queued.len(), 2);
    assert!(
        queued
            .iter()
            .all(|operation| matches!(operation, RetryOperation::DeleteEntry { .. }))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_pass_reports_the_deleted_count() {
    let harness = EntryHarness::new();
    harness.store.insert_mapping(mapping_aged(1, 60));

    let response = harness.cleanup_service(45).handle().await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.description, "Deleted 1 of 1 expired entries");
    let notices = harness.notifier.notices();
    assert!(
        notices
            .first()
            .is_some_and(|notice| notice.description.starts_with("Successfully deleted 1"))
    );
}
