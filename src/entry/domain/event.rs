//! Parsing of inbound webhook trigger payloads.

use crate::connect::domain::SourceEntryId;
use serde_json::Value;
use thiserror::Error;

/// Path marker identifying AI-generated hour suggestions.
///
/// Events whose `entity_path` contains this marker are acknowledged but
/// never synchronized.
pub const SUGGESTION_MARKER: &str = "suggested_hours";

/// Errors raised while extracting an [`EntryEvent`] from webhook JSON.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventParseError {
    /// The wrapped `body` string is not valid JSON.
    #[error("event body is not valid JSON: {0}")]
    InvalidBody(String),

    /// The event carries no `payload` object.
    #[error("missing required payload data")]
    MissingPayload,

    /// The payload carries no `entity_id` field.
    #[error("missing required payload data")]
    MissingEntityId,

    /// The `entity_id` field is not coercible to an integer.
    #[error("entity_id '{0}' is not an integer")]
    InvalidEntityId(String),
}

/// A normalized inbound entry event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEvent {
    /// Tracker entry the event refers to.
    pub source_id: SourceEntryId,
    /// Tracker path of the entity, used for suggestion filtering.
    pub entity_path: String,
}

impl EntryEvent {
    /// Builds an event directly from its parts.
    #[must_use]
    pub fn new(source_id: SourceEntryId, entity_path: impl Into<String>) -> Self {
        Self {
            source_id,
            entity_path: entity_path.into(),
        }
    }

    /// Extracts an event from a webhook payload.
    ///
    /// Accepts either the bare event object or the same object wrapped as a
    /// JSON string under a `body` key. The `entity_id` may arrive as a
    /// number or a numeric string.
    ///
    /// # Errors
    ///
    /// Returns [`EventParseError`] when the payload is missing or malformed;
    /// no side effect may be performed before this validation passes.
    pub fn from_json(event: &Value) -> Result<Self, EventParseError> {
        let unwrapped;
        let body = match event.get("body") {
            Some(Value::String(raw)) => {
                unwrapped = serde_json::from_str::<Value>(raw)
                    .map_err(|err| EventParseError::InvalidBody(err.to_string()))?;
                &unwrapped
            }
            Some(inner) => inner,
            None => event,
        };

        let payload = body
            .get("payload")
            .and_then(Value::as_object)
            .ok_or(EventParseError::MissingPayload)?;

        let entity_id = payload
            .get("entity_id")
            .ok_or(EventParseError::MissingEntityId)?;
        let source_id = entity_id
            .as_i64()
            .or_else(|| {
                entity_id
                    .as_str()
                    .and_then(|text| text.trim().parse().ok())
            })
            .map(SourceEntryId::new)
            .ok_or_else(|| EventParseError::InvalidEntityId(entity_id.to_string()))?;

        let entity_path = payload
            .get("entity_path")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        Ok(Self {
            source_id,
            entity_path,
        })
    }

    /// Returns `true` when the event refers to an AI-generated suggestion.
    #[must_use]
    pub fn is_suggestion(&self) -> bool {
        self.entity_path.contains(SUGGESTION_MARKER)
    }
}
