//! Project domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A repository tracked by the dashboard.
///
/// `repository_id` is the numeric id the CI provider assigned to the
/// repository; it is unique across projects and is how webhook events are
/// attributed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub repository_url: Option<String>,
    pub repository_id: i64,
    /// Tracked versions, highest version number first.
    pub versions: Vec<ProjectVersion>,
}

/// A tracked branch line of a project.
///
/// Pipelines are attributed to a version by matching the event's git ref
/// against `branch_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectVersion {
    pub id: Uuid,
    pub version: i32,
    pub branch_id: String,
    pub project_id: Uuid,
}
