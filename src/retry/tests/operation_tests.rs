//! Wire-format tests for retry messages.

use chrono::NaiveDate;
use serde_json::json;

use crate::connect::domain::{JobId, PersonId, SourceEntryId, TargetEntryId};
use crate::entry::domain::EntryMapping;
use crate::retry::domain::RetryOperation;

fn mapping() -> EntryMapping {
    EntryMapping {
        source_id: SourceEntryId::new(123),
        target_entry_id: TargetEntryId::new(900),
        target_person_id: PersonId::new(501),
        day: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap_or_default(),
    }
}

#[test]
fn write_mapping_serialises_with_operation_and_data_fields() {
    let operation = RetryOperation::WriteMapping(mapping());
    let value = serde_json::to_value(&operation).unwrap_or_default();

    assert_eq!(value["operation"], "write_mapping");
    assert_eq!(value["data"]["source_id"], 123);
    assert_eq!(value["data"]["target_entry_id"], 900);
    assert_eq!(value["data"]["day"], "2026-08-05");
}

#[test]
fn delete_entry_round_trips_through_the_wire_shape() {
    let wire = json!({"operation": "delete_entry", "data": {"source_id": 77}});
    let operation: RetryOperation =
        serde_json::from_value(wire).unwrap_or_else(|err| panic!("decode failed: {err}"));

    assert_eq!(
        operation,
        RetryOperation::DeleteEntry {
            source_id: SourceEntryId::new(77)
        }
    );
    assert_eq!(operation.kind(), "delete_entry");
}

#[test]
fn delete_job_round_trips_through_the_wire_shape() {
    let operation = RetryOperation::DeleteJob {
        job_id: JobId::new(9),
    };
    let value = serde_json::to_value(&operation).unwrap_or_default();
    assert_eq!(value["operation"], "delete_job");

    let decoded: RetryOperation =
        serde_json::from_value(value).unwrap_or_else(|err| panic!("decode failed: {err}"));
    assert_eq!(decoded, operation);
}

#[test]
fn unknown_operations_are_rejected() {
    let wire = json!({"operation": "compact_store", "data": {}});
    assert!(serde_json::from_value::<RetryOperation>(wire).is_err());
}
