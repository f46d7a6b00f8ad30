//! Webhook payload parsing tests.

use serde_json::json;

use crate::connect::domain::SourceEntryId;
use crate::entry::domain::{EntryEvent, EventParseError};

#[test]
fn parses_a_bare_event_object() {
    let payload = json!({"payload": {"entity_id": 123, "entity_path": "events/123"}});
    let event = EntryEvent::from_json(&payload).unwrap_or_else(|err| panic!("parse failed: {err}"));
    assert_eq!(event.source_id, SourceEntryId::new(123));
    assert_eq!(event.entity_path, "events/123");
    assert!(!event.is_suggestion());
}

#[test]
fn unwraps_a_string_body_and_coerces_a_string_id() {
    let payload = json!({
        "body": r#"{"payload": {"entity_id": "123", "entity_path": "events/123"}}"#
    });
    let event = EntryEvent::from_json(&payload).unwrap_or_else(|err| panic!("parse failed: {err}"));
    assert_eq!(event.source_id, SourceEntryId::new(123));
}

#[test]
fn suggestion_paths_are_flagged() {
    let payload = json!({"payload": {"entity_id": 5, "entity_path": "x/suggested_hours/5"}});
    let event = EntryEvent::from_json(&payload).unwrap_or_else(|err| panic!("parse failed: {err}"));
    assert!(event.is_suggestion());
}

#[test]
fn missing_payload_is_rejected() {
    assert_eq!(
        EntryEvent::from_json(&json!({"other": 1})),
        Err(EventParseError::MissingPayload)
    );
}

#[test]
fn missing_entity_id_is_rejected() {
    assert_eq!(
        EntryEvent::from_json(&json!({"payload": {"entity_path": "events/9"}})),
        Err(EventParseError::MissingEntityId)
    );
}

#[test]
fn non_numeric_entity_id_is_rejected() {
    let result = EntryEvent::from_json(&json!({"payload": {"entity_id": "abc"}}));
    assert!(matches!(result, Err(EventParseError::InvalidEntityId(_))));
}

#[test]
fn entity_path_defaults_to_empty() {
    let event = EntryEvent::from_json(&json!({"payload": {"entity_id": 7}}))
        .unwrap_or_else(|err| panic!("parse failed: {err}"));
    assert_eq!(event.entity_path, "");
}
