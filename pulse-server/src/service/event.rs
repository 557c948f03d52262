//! Webhook Event Service
//!
//! Entry point for GitLab webhook deliveries: classifies the raw payload by
//! its `object_kind` discriminator and routes it to the matching reconciler.

use pulse_core::dto::event::{BuildEvent, PipelineEvent, WebhookEvent};
use serde_json::Value;
use sqlx::PgPool;

use crate::service::{job_service, pipeline_service};

/// Service error type
#[derive(Debug)]
pub enum EventError {
    /// The payload could not be classified or decoded. Callers should treat
    /// this as bad input, not a server fault.
    Parsing(String),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for EventError {
    fn from(err: sqlx::Error) -> Self {
        EventError::DatabaseError(err)
    }
}

/// Process one webhook delivery end to end.
///
/// At most one reconciler is invoked per call; a payload that fails
/// classification reaches no reconciler at all.
pub async fn process(pool: &PgPool, payload: &str) -> Result<(), EventError> {
    match classify(payload)? {
        WebhookEvent::Pipeline(event) => pipeline_service::reconcile(pool, &event).await?,
        WebhookEvent::Build(event) => job_service::reconcile(pool, &event).await?,
    }

    Ok(())
}

/// Classify a raw payload by its `object_kind` discriminator.
///
/// The discriminator is inspected before any structural decoding, so an
/// unsupported kind is rejected without touching the rest of the payload.
/// The comparison is exact: `" pipeline "` is not `"pipeline"`.
pub fn classify(payload: &str) -> Result<WebhookEvent, EventError> {
    let root: Value = serde_json::from_str(payload)
        .map_err(|e| EventError::Parsing(format!("Malformed JSON payload: {e}")))?;

    if !root.is_object() {
        return Err(EventError::Parsing("Unsupported payload type".to_string()));
    }

    let kind = match root.get("object_kind") {
        None | Some(Value::Null) => {
            return Err(EventError::Parsing(
                "Missing 'object_kind' in event payload".to_string(),
            ));
        }
        Some(value) => value
            .as_str()
            .map(str::to_owned)
            .unwrap_or_else(|| value.to_string()),
    };

    match kind.as_str() {
        "pipeline" => {
            let event: PipelineEvent = serde_json::from_value(root).map_err(|e| {
                EventError::Parsing(format!("Error while processing GitLab event: {e}"))
            })?;
            Ok(WebhookEvent::Pipeline(event))
        }
        "build" => {
            let event: BuildEvent = serde_json::from_value(root).map_err(|e| {
                EventError::Parsing(format!("Error while processing GitLab event: {e}"))
            })?;
            Ok(WebhookEvent::Build(event))
        }
        other => Err(EventError::Parsing(format!(
            "Event type not yet supported: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsing_message(result: Result<WebhookEvent, EventError>) -> String {
        match result {
            Err(EventError::Parsing(msg)) => msg,
            other => panic!("expected parsing error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_pipeline_event() {
        let payload = r#"{
            "object_kind": "pipeline",
            "object_attributes": {"id": 123, "status": "running"},
            "project": {"id": 200, "web_url": "https://gitlab.example.com/sg1/alpha"}
        }"#;

        let event = classify(payload).unwrap();
        assert!(matches!(event, WebhookEvent::Pipeline(e) if e.object_attributes.id == 123));
    }

    #[test]
    fn test_classify_build_event() {
        let payload = r#"{
            "object_kind": "build",
            "build_id": 456,
            "pipeline_id": 123,
            "project": {"id": 200, "web_url": "https://gitlab.example.com/sg1/alpha"}
        }"#;

        let event = classify(payload).unwrap();
        assert!(matches!(event, WebhookEvent::Build(e) if e.build_id == 456));
    }

    #[test]
    fn test_classify_missing_object_kind() {
        let msg = parsing_message(classify(r#"{"some_field": "value"}"#));
        assert_eq!(msg, "Missing 'object_kind' in event payload");

        let msg = parsing_message(classify("{}"));
        assert_eq!(msg, "Missing 'object_kind' in event payload");
    }

    #[test]
    fn test_classify_null_object_kind() {
        let msg = parsing_message(classify(r#"{"object_kind": null}"#));
        assert_eq!(msg, "Missing 'object_kind' in event payload");
    }

    #[test]
    fn test_classify_unsupported_kind() {
        let msg = parsing_message(classify(r#"{"object_kind": "merge_request"}"#));
        assert!(msg.contains("Event type not yet supported: merge_request"));
    }

    #[test]
    fn test_classify_does_not_trim_kind() {
        // Exact comparison: surrounding whitespace makes the kind unsupported
        let msg = parsing_message(classify(r#"{"object_kind": "  pipeline  "}"#));
        assert!(msg.contains("Event type not yet supported"));
    }

    #[test]
    fn test_classify_non_string_kind() {
        let msg = parsing_message(classify(r#"{"object_kind": 5}"#));
        assert!(msg.contains("Event type not yet supported: 5"));
    }

    #[test]
    fn test_classify_non_object_payload() {
        for payload in ["123", "\"pipeline\"", "[1, 2, 3]", "true"] {
            let msg = parsing_message(classify(payload));
            assert!(msg.contains("Unsupported payload type"), "payload: {payload}");
        }
    }

    #[test]
    fn test_classify_malformed_json() {
        let msg = parsing_message(classify("{invalid json"));
        assert!(msg.contains("Malformed JSON payload"));
    }

    #[test]
    fn test_classify_tolerates_extra_fields() {
        let payload = r#"{
            "object_kind": "pipeline",
            "extra_field": "value",
            "another": 123,
            "object_attributes": {"id": 1},
            "project": {"id": 2, "web_url": "https://gitlab.example.com/p"}
        }"#;

        assert!(classify(payload).is_ok());
    }

    #[test]
    fn test_classify_rejects_undecodable_known_kind() {
        // Correct discriminator but the shape cannot be decoded
        let msg = parsing_message(classify(r#"{"object_kind": "pipeline"}"#));
        assert!(msg.contains("Error while processing GitLab event"));
    }
}
