//! GitLab webhook event shapes
//!
//! GitLab discriminates webhook payloads with a top-level `object_kind`
//! string. The two kinds this system ingests are modeled as a tagged union:
//! the dispatcher confirms the discriminator first and only then decodes the
//! matching shape. Field names follow GitLab's snake_case payloads; unknown
//! fields are ignored.

pub mod datetime;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A classified webhook event, keyed by `object_kind`.
#[derive(Debug, Clone)]
pub enum WebhookEvent {
    /// A pipeline lifecycle notification (`object_kind: "pipeline"`).
    Pipeline(PipelineEvent),
    /// A job lifecycle notification (`object_kind: "build"`).
    Build(BuildEvent),
}

/// The repository a webhook event originates from.
#[derive(Debug, Clone, Deserialize)]
pub struct EventProject {
    pub id: i64,
    pub name: Option<String>,
    pub web_url: String,
    pub path_with_namespace: Option<String>,
}

/// Pipeline event payload (`object_kind: "pipeline"`).
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineEvent {
    pub object_attributes: PipelineAttributes,
    pub project: EventProject,
}

/// The `object_attributes` block of a pipeline event.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineAttributes {
    /// Pipeline id assigned by the CI provider.
    pub id: i64,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub sha: Option<String>,
    pub before_sha: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "datetime::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "datetime::deserialize_optional")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Job event payload (`object_kind: "build"`).
///
/// GitLab still calls these "build" events on the wire; the fields live at
/// the top level of the payload rather than under `object_attributes`.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildEvent {
    /// Job id assigned by the CI provider.
    pub build_id: i64,
    pub build_name: Option<String>,
    pub build_status: Option<String>,
    #[serde(default, deserialize_with = "datetime::deserialize_optional")]
    pub build_started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "datetime::deserialize_optional")]
    pub build_finished_at: Option<DateTime<Utc>>,
    /// CI id of the pipeline the job belongs to.
    pub pipeline_id: i64,
    pub project_id: Option<i64>,
    pub project: EventProject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pipeline_event() {
        let payload = r#"{
            "object_kind": "pipeline",
            "object_attributes": {
                "id": 123,
                "ref": "main",
                "sha": "abc123",
                "before_sha": "def456",
                "status": "success",
                "created_at": "2025-12-14T16:07:21+01:00",
                "finished_at": "2025-12-14 15:10:01 UTC"
            },
            "project": {
                "id": 200,
                "name": "alpha",
                "web_url": "https://gitlab.example.com/sg1/alpha",
                "path_with_namespace": "sg1/alpha"
            }
        }"#;

        let event: PipelineEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.object_attributes.id, 123);
        assert_eq!(event.object_attributes.git_ref.as_deref(), Some("main"));
        assert_eq!(event.object_attributes.sha.as_deref(), Some("abc123"));
        assert_eq!(event.project.id, 200);
        assert!(event.object_attributes.created_at.is_some());
        assert!(event.object_attributes.finished_at.is_some());
    }

    #[test]
    fn test_deserialize_pipeline_event_ignores_unknown_fields() {
        let payload = r#"{
            "object_kind": "pipeline",
            "extra_field": "value",
            "object_attributes": {"id": 1, "stages": ["build", "test"]},
            "project": {"id": 2, "web_url": "https://gitlab.example.com/p"}
        }"#;

        let event: PipelineEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.object_attributes.id, 1);
        assert!(event.object_attributes.status.is_none());
        assert!(event.object_attributes.finished_at.is_none());
    }

    #[test]
    fn test_deserialize_build_event() {
        let payload = r#"{
            "object_kind": "build",
            "build_id": 456,
            "build_name": "unit-tests",
            "build_status": "running",
            "build_started_at": "2025-12-14 15:10:01 UTC",
            "build_finished_at": null,
            "pipeline_id": 123,
            "project_id": 200,
            "project": {"id": 200, "web_url": "https://gitlab.example.com/sg1/alpha"}
        }"#;

        let event: BuildEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.build_id, 456);
        assert_eq!(event.build_name.as_deref(), Some("unit-tests"));
        assert_eq!(event.pipeline_id, 123);
        assert!(event.build_started_at.is_some());
        assert!(event.build_finished_at.is_none());
    }
}
